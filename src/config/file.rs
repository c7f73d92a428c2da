//! Installer settings layer (`--config <file>.yaml`)
//!
//! Every key is optional. The same struct carries the values taken from the
//! command line, so layers can be stacked with [`SettingsLayer::or`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// One layer of installer settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsLayer {
    pub phoenix_home: Option<PathBuf>,
    pub hbase_home: Option<PathBuf>,
    pub phoenix_repo: Option<PathBuf>,
    pub hadoop_home: Option<PathBuf>,
    pub maven_installation: Option<PathBuf>,
    pub java_home: Option<PathBuf>,
    pub configs_dir: Option<PathBuf>,
    pub jdk_search_dir: Option<PathBuf>,
    pub calcite_version: Option<String>,
    pub service_user: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link_libs: Vec<String>,
    pub skip_restart: Option<bool>,
}

impl SettingsLayer {
    /// Parse a settings layer from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load a settings layer from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&content)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))
    }

    /// Fill every unset value of `self` from `lower`.
    #[must_use]
    pub fn or(self, lower: SettingsLayer) -> SettingsLayer {
        SettingsLayer {
            phoenix_home: self.phoenix_home.or(lower.phoenix_home),
            hbase_home: self.hbase_home.or(lower.hbase_home),
            phoenix_repo: self.phoenix_repo.or(lower.phoenix_repo),
            hadoop_home: self.hadoop_home.or(lower.hadoop_home),
            maven_installation: self.maven_installation.or(lower.maven_installation),
            java_home: self.java_home.or(lower.java_home),
            configs_dir: self.configs_dir.or(lower.configs_dir),
            jdk_search_dir: self.jdk_search_dir.or(lower.jdk_search_dir),
            calcite_version: self.calcite_version.or(lower.calcite_version),
            service_user: self.service_user.or(lower.service_user),
            link_libs: if self.link_libs.is_empty() {
                lower.link_libs
            } else {
                self.link_libs
            },
            skip_restart: self.skip_restart.or(lower.skip_restart),
        }
    }
}
