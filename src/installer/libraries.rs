//! Replace the stale Phoenix client/server jars and link auxiliary libraries
//!
//! The thin-client jar shipped by Ambari has a broken services file
//! (PHOENIX-2531), and the query server has to run against the same Avatica
//! libraries the rebuilt client uses, so both jars are taken from the build.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::common::fs::copy_fresh;
use crate::common::lookup;
use crate::config::{InstallSettings, InstallationPaths};
use crate::error::{self, Result};

/// A built jar and the installed jar it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarReplacement {
    pub description: &'static str,
    pub source_dir: PathBuf,
    pub source_pattern: &'static str,
    pub dest_dir: PathBuf,
    pub dest_pattern: &'static str,
}

/// Outcome of linking one auxiliary library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Created,
    AlreadyLinked,
    /// A regular file of that name is in the way and was kept.
    Occupied,
}

pub fn jar_replacements(paths: &InstallationPaths) -> Vec<JarReplacement> {
    vec![
        JarReplacement {
            description: "phoenix-thin-client.jar",
            source_dir: paths.phoenix_repo.join("phoenix-server-client").join("target"),
            source_pattern: "phoenix-*thin-client.jar",
            dest_dir: paths.phoenix_home.clone(),
            dest_pattern: "phoenix-*-thin-client.jar",
        },
        JarReplacement {
            description: "phoenix-server.jar",
            source_dir: paths.phoenix_repo.join("phoenix-server").join("target"),
            source_pattern: "phoenix-server-*-runnable.jar",
            dest_dir: paths.phoenix_home.join("lib"),
            dest_pattern: "phoenix-server-*-runnable.jar",
        },
    ]
}

/// Fresh-copy the single built jar over the installed one.
///
/// With nothing installed yet, the jar lands in the destination directory
/// under its own name. Returns the written path.
pub fn replace_jar(replacement: &JarReplacement) -> Result<PathBuf> {
    info!("Copying {}", replacement.description);
    let source = lookup::exactly_one(&replacement.source_dir, replacement.source_pattern)?;
    let dest = match lookup::at_most_one(&replacement.dest_dir, replacement.dest_pattern)? {
        Some(installed) => installed,
        None => {
            let name = source
                .file_name()
                .ok_or_else(|| error::fs::source_missing(source.display().to_string()))?;
            replacement.dest_dir.join(name)
        }
    };
    copy_fresh(&source, &dest)?;
    Ok(dest)
}

pub fn replace_server_jars(paths: &InstallationPaths) -> Result<Vec<PathBuf>> {
    jar_replacements(paths).iter().map(replace_jar).collect()
}

/// Link each of `settings.link_libs` from the Phoenix lib directory into the
/// HBase lib directory.
pub fn link_extra_libs(
    paths: &InstallationPaths,
    settings: &InstallSettings,
) -> Result<Vec<(PathBuf, LinkOutcome)>> {
    let phoenix_lib = paths.phoenix_home.join("lib");
    let hbase_lib = paths.hbase_home.join("lib");

    settings
        .link_libs
        .iter()
        .map(|jar| {
            let source = phoenix_lib.join(jar);
            let dest = hbase_lib.join(jar);
            link_if_missing(&source, &dest).map(|outcome| (dest, outcome))
        })
        .collect()
}

fn link_if_missing(source: &Path, dest: &Path) -> Result<LinkOutcome> {
    match fs::symlink_metadata(dest) {
        Ok(meta) if meta.file_type().is_symlink() => {
            debug!("{} is already linked", dest.display());
            return Ok(LinkOutcome::AlreadyLinked);
        }
        Ok(_) => {
            warn!("Not linking {}: a file already exists there", dest.display());
            return Ok(LinkOutcome::Occupied);
        }
        Err(_) => {}
    }

    if !source.exists() {
        warn!(
            "Linking {} to {}, which does not exist",
            dest.display(),
            source.display()
        );
    }
    debug!("Symlinking {} to {}", source.display(), dest.display());
    symlink(source, dest).map_err(|e| error::fs::symlink_failed(dest, source, &e))?;
    Ok(LinkOutcome::Created)
}

#[cfg(unix)]
fn symlink(source: &Path, dest: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, dest)
}

#[cfg(not(unix))]
fn symlink(_source: &Path, _dest: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlinks are only supported on unix",
    ))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::InstallerError;
    use crate::installer::tests::Fixture;

    #[test]
    fn test_replace_server_jars_overwrites_stale_versions() {
        let fixture = Fixture::new();
        fixture.write_home_file("phoenix-4.4.0-thin-client.jar", "stale client");
        fixture.write_home_file("lib/phoenix-server-4.4.0-runnable.jar", "stale server");

        let written = replace_server_jars(&fixture.paths).unwrap();

        let home = &fixture.paths.phoenix_home;
        assert_eq!(
            written,
            vec![
                home.join("phoenix-4.4.0-thin-client.jar"),
                home.join("lib/phoenix-server-4.4.0-runnable.jar"),
            ]
        );
        assert_eq!(
            fs::read_to_string(home.join("phoenix-4.4.0-thin-client.jar")).unwrap(),
            "built thin client"
        );
        assert_eq!(
            fs::read_to_string(home.join("lib/phoenix-server-4.4.0-runnable.jar")).unwrap(),
            "built server"
        );
    }

    #[test]
    fn test_replace_server_jars_installs_when_absent() {
        let fixture = Fixture::new();

        replace_server_jars(&fixture.paths).unwrap();

        let home = &fixture.paths.phoenix_home;
        assert!(home.join("phoenix-4.7.0-thin-client.jar").is_file());
        assert!(home.join("lib/phoenix-server-4.7.0-runnable.jar").is_file());
    }

    #[test]
    fn test_replace_jar_rejects_ambiguous_source() {
        let fixture = Fixture::new();
        fixture.write_repo_file(
            "phoenix-server-client/target/phoenix-4.7.1-thin-client.jar",
            "second",
        );

        let result = replace_server_jars(&fixture.paths);
        assert!(matches!(result, Err(InstallerError::AmbiguousMatch { .. })));
    }

    #[test]
    fn test_replace_jar_rejects_ambiguous_destination() {
        let fixture = Fixture::new();
        fixture.write_home_file("phoenix-4.4.0-thin-client.jar", "a");
        fixture.write_home_file("phoenix-4.5.0-thin-client.jar", "b");

        let result = replace_server_jars(&fixture.paths);
        assert!(matches!(result, Err(InstallerError::AmbiguousMatch { .. })));
    }

    #[test]
    fn test_replace_jar_requires_built_jar() {
        let fixture = Fixture::new();
        fs::remove_dir_all(fixture.paths.phoenix_repo.join("phoenix-server/target")).unwrap();

        let result = replace_server_jars(&fixture.paths);
        assert!(matches!(result, Err(InstallerError::NoMatch { .. })));
    }

    #[test]
    fn test_link_extra_libs_is_idempotent() {
        let fixture = Fixture::new();
        fixture.write_home_file("lib/commons-csv-1.0.jar", "csv");
        let settings = InstallSettings::default();

        let first = link_extra_libs(&fixture.paths, &settings).unwrap();
        let second = link_extra_libs(&fixture.paths, &settings).unwrap();

        let link = fixture.paths.hbase_home.join("lib/commons-csv-1.0.jar");
        assert_eq!(first, vec![(link.clone(), LinkOutcome::Created)]);
        assert_eq!(second, vec![(link.clone(), LinkOutcome::AlreadyLinked)]);
        assert_eq!(
            fs::read_link(&link).unwrap(),
            fixture.paths.phoenix_home.join("lib/commons-csv-1.0.jar")
        );
    }

    #[test]
    fn test_link_extra_libs_keeps_existing_file() {
        let fixture = Fixture::new();
        let dest = fixture.paths.hbase_home.join("lib/commons-csv-1.0.jar");
        fs::write(&dest, "hbase's own copy").unwrap();

        let outcome = link_extra_libs(&fixture.paths, &InstallSettings::default()).unwrap();

        assert_eq!(outcome, vec![(dest.clone(), LinkOutcome::Occupied)]);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "hbase's own copy");
    }
}
