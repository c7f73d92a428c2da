//! Installer configuration
//!
//! Settings are layered: command-line flag, then `PHERF_*` environment
//! variable (both handled by clap), then the optional YAML file, then the
//! built-in defaults below. The result is validated once, before anything on
//! disk is touched.

pub mod file;
pub mod jdk;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{self, Result};

pub use file::SettingsLayer;

pub const DEFAULT_PHOENIX_HOME: &str = "/usr/hdp/current/phoenix-client/";
pub const DEFAULT_HBASE_HOME: &str = "/usr/hdp/current/hbase-client/";
pub const DEFAULT_HADOOP_HOME: &str = "/usr/hdp/current/hadoop-client/";
pub const DEFAULT_CALCITE_VERSION: &str = "1.6.0";
pub const DEFAULT_SERVICE_USER: &str = "hbase";
pub const DEFAULT_LINK_LIBS: &[&str] = &["commons-csv-1.0.jar"];

/// Directory names looked up next to the installer executable.
const DEFAULT_REPO_DIR: &str = "phoenix";
const DEFAULT_MAVEN_DIR: &str = "apache-maven-3.2.5";
const DEFAULT_CONFIGS_DIR: &str = "pherf-configs";

/// Every directory the installer reads from or writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationPaths {
    /// Target Phoenix installation.
    pub phoenix_home: PathBuf,
    /// Phoenix source checkout.
    pub phoenix_repo: PathBuf,
    pub hbase_home: PathBuf,
    pub hadoop_home: PathBuf,
    pub maven_installation: PathBuf,
    pub java_home: PathBuf,
    /// Pherf scenario configs shipped with the installer.
    pub configs_dir: PathBuf,
}

impl InstallationPaths {
    fn labelled(&self) -> [(&'static str, &Path); 7] {
        [
            ("phoenix home", &self.phoenix_home),
            ("phoenix repo", &self.phoenix_repo),
            ("maven installation", &self.maven_installation),
            ("java home", &self.java_home),
            ("hbase home", &self.hbase_home),
            ("hadoop home", &self.hadoop_home),
            ("pherf configs", &self.configs_dir),
        ]
    }

    /// Check that every path is an existing directory.
    pub fn validate(&self) -> Result<()> {
        for (label, path) in self.labelled() {
            if !path.is_dir() {
                return Err(error::config::not_a_directory(path.display().to_string()));
            }
            debug!("Using {label}: {}", path.display());
        }
        Ok(())
    }
}

/// Knobs that are not paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSettings {
    pub calcite_version: String,
    pub service_user: String,
    /// Jars in the Phoenix lib directory to link into the HBase lib directory.
    pub link_libs: Vec<String>,
    pub skip_restart: bool,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            calcite_version: DEFAULT_CALCITE_VERSION.to_string(),
            service_user: DEFAULT_SERVICE_USER.to_string(),
            link_libs: DEFAULT_LINK_LIBS.iter().map(ToString::to_string).collect(),
            skip_restart: false,
        }
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    pub paths: InstallationPaths,
    pub settings: InstallSettings,
}

impl InstallerConfig {
    /// Apply defaults to `layer`.
    ///
    /// `program_dir` anchors the defaults that live next to the installer.
    /// A JDK is only searched for when no java home was given.
    pub fn resolve(layer: SettingsLayer, program_dir: &Path) -> Result<Self> {
        let java_home = match layer.java_home {
            Some(path) => path,
            None => {
                let search_dir = layer
                    .jdk_search_dir
                    .unwrap_or_else(|| PathBuf::from(jdk::DEFAULT_SEARCH_DIR));
                jdk::detect(&search_dir)?
            }
        };

        let defaults = InstallSettings::default();
        let paths = InstallationPaths {
            phoenix_home: layer
                .phoenix_home
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PHOENIX_HOME)),
            phoenix_repo: layer
                .phoenix_repo
                .unwrap_or_else(|| program_dir.join(DEFAULT_REPO_DIR)),
            hbase_home: layer
                .hbase_home
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HBASE_HOME)),
            hadoop_home: layer
                .hadoop_home
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HADOOP_HOME)),
            maven_installation: layer
                .maven_installation
                .unwrap_or_else(|| program_dir.join(DEFAULT_MAVEN_DIR)),
            java_home,
            configs_dir: layer
                .configs_dir
                .unwrap_or_else(|| program_dir.join(DEFAULT_CONFIGS_DIR)),
        };

        let settings = InstallSettings {
            calcite_version: layer.calcite_version.unwrap_or(defaults.calcite_version),
            service_user: layer.service_user.unwrap_or(defaults.service_user),
            link_libs: if layer.link_libs.is_empty() {
                defaults.link_libs
            } else {
                layer.link_libs
            },
            skip_restart: layer.skip_restart.unwrap_or(defaults.skip_restart),
        };

        Ok(Self { paths, settings })
    }
}

/// Canonical directory containing the running executable.
pub fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| error::config::program_dir_unavailable(e.to_string()))?;
    let exe = dunce::canonicalize(&exe)
        .map_err(|e| error::config::program_dir_unavailable(e.to_string()))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| error::config::program_dir_unavailable(exe.display().to_string()))
}
