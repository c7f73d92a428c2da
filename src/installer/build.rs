//! Build the Phoenix checkout with Maven and install the pherf jars

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::common::fs::copy_fresh;
use crate::common::lookup;
use crate::config::{InstallSettings, InstallationPaths};
use crate::error::{self, Result};
use crate::process::{Invocation, ProcessLauncher};

const PHERF_JAR_PATTERN: &str = "phoenix-pherf*.jar";

/// `base` with `JAVA_HOME` set and the JDK's `bin` first on `PATH`.
pub fn build_env<I>(java_home: &Path, base: I) -> Result<Vec<(OsString, OsString)>>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut old_path = OsString::new();
    let mut env = Vec::new();
    for (key, value) in base {
        if key == "PATH" {
            old_path = value;
        } else if key != "JAVA_HOME" {
            env.push((key, value));
        }
    }

    let mut search_path = vec![java_home.join("bin")];
    if !old_path.is_empty() {
        search_path.extend(std::env::split_paths(&old_path));
    }
    let search_path = std::env::join_paths(search_path)
        .map_err(|e| error::fs::io_error(format!("Cannot build PATH for the build: {e}")))?;

    env.push(("JAVA_HOME".into(), java_home.as_os_str().to_os_string()));
    env.push(("PATH".into(), search_path));
    Ok(env)
}

/// `mvn package` for the checkout, run from its root.
pub fn maven_invocation(
    paths: &InstallationPaths,
    settings: &InstallSettings,
    env: Vec<(OsString, OsString)>,
) -> Invocation {
    Invocation::new(paths.maven_installation.join("bin").join("mvn"))
        .args([
            "package".to_string(),
            "-DskipTests".to_string(),
            format!("-Dcalcite.version={}", settings.calcite_version),
        ])
        .current_dir(&paths.phoenix_repo)
        .envs(env)
}

/// Run the build, then fresh-copy every pherf jar into `<phoenix home>/lib`.
///
/// A non-zero Maven exit is returned as [`error::InstallerError::ProcessFailed`]
/// carrying Maven's code. Returns the installed jars.
pub fn build_and_install_pherf_jars(
    paths: &InstallationPaths,
    settings: &InstallSettings,
    launcher: &dyn ProcessLauncher,
) -> Result<Vec<PathBuf>> {
    let env = build_env(&paths.java_home, std::env::vars_os())?;
    let invocation = maven_invocation(paths, settings, env);
    info!(
        "Running '{}' in {}",
        invocation.command_line(),
        paths.phoenix_repo.display()
    );

    let code = launcher.run(&invocation)?;
    if code != 0 {
        return Err(error::process::failed(invocation.command_line(), code));
    }

    let target_dir = paths.phoenix_repo.join("phoenix-pherf").join("target");
    let jars = lookup::at_least_one(&target_dir, PHERF_JAR_PATTERN)?;

    let lib_dir = paths.phoenix_home.join("lib");
    let mut installed = Vec::with_capacity(jars.len());
    for jar in jars {
        let Some(name) = jar.file_name() else {
            continue;
        };
        let dest = lib_dir.join(name);
        info!("Installing {}", dest.display());
        copy_fresh(&jar, &dest)?;
        installed.push(dest);
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstallerError;
    use crate::installer::tests::Fixture;
    use crate::process::testing::RecordingLauncher;

    fn lookup_env<'a>(env: &'a [(OsString, OsString)], key: &str) -> Option<&'a OsString> {
        env.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[test]
    fn test_build_env_sets_java_home_and_path() {
        let base = vec![
            ("HOME".into(), "/home/hbase".into()),
            ("JAVA_HOME".into(), "/old/jdk".into()),
            ("PATH".into(), "/usr/local/bin:/usr/bin".into()),
        ];
        let env = build_env(Path::new("/usr/jdk64/jdk1.8.0_60"), base).unwrap();

        assert_eq!(
            lookup_env(&env, "JAVA_HOME"),
            Some(&OsString::from("/usr/jdk64/jdk1.8.0_60"))
        );
        assert_eq!(lookup_env(&env, "HOME"), Some(&OsString::from("/home/hbase")));
        assert_eq!(env.iter().filter(|(k, _)| k == "JAVA_HOME").count(), 1);

        let path = lookup_env(&env, "PATH").unwrap();
        let entries: Vec<_> = std::env::split_paths(path).collect();
        assert_eq!(
            entries,
            vec![
                PathBuf::from("/usr/jdk64/jdk1.8.0_60/bin"),
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/usr/bin"),
            ]
        );
    }

    #[test]
    fn test_maven_invocation_arguments() {
        let fixture = Fixture::new();
        let invocation = maven_invocation(&fixture.paths, &InstallSettings::default(), Vec::new());

        assert_eq!(
            invocation.program,
            fixture.paths.maven_installation.join("bin/mvn")
        );
        assert_eq!(
            invocation.args,
            vec!["package", "-DskipTests", "-Dcalcite.version=1.6.0"]
        );
        assert_eq!(invocation.cwd.as_ref(), Some(&fixture.paths.phoenix_repo));
    }

    #[test]
    fn test_build_installs_all_pherf_jars() {
        let fixture = Fixture::new();
        fixture.write_repo_file("phoenix-pherf/target/phoenix-pherf-4.7.0-minimal.jar", "minimal");
        let launcher = RecordingLauncher::default();

        let installed =
            build_and_install_pherf_jars(&fixture.paths, &InstallSettings::default(), &launcher)
                .unwrap();

        assert_eq!(installed.len(), 2);
        let lib = fixture.paths.phoenix_home.join("lib");
        assert!(lib.join("phoenix-pherf-4.7.0.jar").is_file());
        assert_eq!(
            std::fs::read_to_string(lib.join("phoenix-pherf-4.7.0-minimal.jar")).unwrap(),
            "minimal"
        );
        assert_eq!(launcher.calls.borrow().len(), 1);
    }

    #[test]
    fn test_build_failure_propagates_exit_code() {
        let fixture = Fixture::new();
        let launcher = RecordingLauncher::with_exit_codes(&[2]);

        let err = build_and_install_pherf_jars(&fixture.paths, &InstallSettings::default(), &launcher)
            .unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(!fixture.paths.phoenix_home.join("lib/phoenix-pherf-4.7.0.jar").exists());
    }

    #[test]
    fn test_build_without_artifacts_fails_even_on_success() {
        let fixture = Fixture::new();
        std::fs::remove_dir_all(fixture.paths.phoenix_repo.join("phoenix-pherf/target")).unwrap();
        let launcher = RecordingLauncher::default();

        let result =
            build_and_install_pherf_jars(&fixture.paths, &InstallSettings::default(), &launcher);

        assert!(matches!(result, Err(InstallerError::NoMatch { .. })));
    }
}
