//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::SettingsLayer;

/// pherf installer
///
/// Deploy pherf into an HDP Phoenix installation and restart the query server.
#[derive(Parser, Debug)]
#[command(
    name = "pherf-installer",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Deploy pherf into an HDP Phoenix installation",
    long_about = "Copies the pherf module, scripts and scenario configs from a Phoenix checkout \
                  into a Phoenix installation, builds and installs the pherf jars, removes dead \
                  symlinks left by Ambari, replaces the thin-client and query server jars and \
                  restarts the Phoenix Query Server.",
    after_help = "EXAMPLES:\n  \
                  Deploy with HDP defaults:\n    pherf-installer\n\n\
                  Deploy from a checkout elsewhere:\n    pherf-installer --phoenix-repo ~/src/phoenix --java-home /usr/jdk64/jdk1.8.0_60\n\n\
                  Deploy without restarting the query server:\n    pherf-installer --skip-restart\n\n\
                  Read locations from a file:\n    pherf-installer --config pherf-installer.yaml"
)]
pub struct Cli {
    /// The location of the Phoenix installation
    #[arg(long, alias = "phoenix_home", env = "PHERF_PHOENIX_HOME", value_name = "DIR")]
    pub phoenix_home: Option<PathBuf>,

    /// The location of the HBase installation
    #[arg(long, alias = "hbase_home", env = "PHERF_HBASE_HOME", value_name = "DIR")]
    pub hbase_home: Option<PathBuf>,

    /// The location of the Phoenix codebase
    #[arg(long, alias = "phoenix_repo", env = "PHERF_PHOENIX_REPO", value_name = "DIR")]
    pub phoenix_repo: Option<PathBuf>,

    /// The location of the Hadoop installation
    #[arg(long, alias = "hadoop_home", env = "PHERF_HADOOP_HOME", value_name = "DIR")]
    pub hadoop_home: Option<PathBuf>,

    /// The location of a Maven installation
    #[arg(
        long,
        alias = "maven_installation",
        env = "PHERF_MAVEN_INSTALLATION",
        value_name = "DIR"
    )]
    pub maven_installation: Option<PathBuf>,

    /// The location of JAVA_HOME (detected under --jdk-search-dir when omitted)
    #[arg(long, alias = "java_home", env = "PHERF_JAVA_HOME", value_name = "DIR")]
    pub java_home: Option<PathBuf>,

    /// Directory of pherf scenario configs to install as bin/config
    #[arg(long, env = "PHERF_CONFIGS_DIR", value_name = "DIR")]
    pub configs_dir: Option<PathBuf>,

    /// Where to look for JDKs when --java-home is not given [default: /usr/jdk64]
    #[arg(long, env = "PHERF_JDK_SEARCH_DIR", value_name = "DIR")]
    pub jdk_search_dir: Option<PathBuf>,

    /// Calcite version to build Phoenix against [default: 1.6.0]
    #[arg(long, env = "PHERF_CALCITE_VERSION", value_name = "VERSION")]
    pub calcite_version: Option<String>,

    /// System user the query server runs as [default: hbase]
    #[arg(long, env = "PHERF_SERVICE_USER", value_name = "USER")]
    pub service_user: Option<String>,

    /// Jar in the Phoenix lib directory to link into the HBase lib directory (repeatable)
    #[arg(long = "link-lib", value_name = "JAR")]
    pub link_libs: Vec<String>,

    /// Deploy without restarting the query server
    #[arg(long)]
    pub skip_restart: bool,

    /// YAML file with any of the settings above
    #[arg(long, short = 'c', env = "PHERF_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Settings given on the command line or through the environment.
    pub fn settings_layer(&self) -> SettingsLayer {
        SettingsLayer {
            phoenix_home: self.phoenix_home.clone(),
            hbase_home: self.hbase_home.clone(),
            phoenix_repo: self.phoenix_repo.clone(),
            hadoop_home: self.hadoop_home.clone(),
            maven_installation: self.maven_installation.clone(),
            java_home: self.java_home.clone(),
            configs_dir: self.configs_dir.clone(),
            jdk_search_dir: self.jdk_search_dir.clone(),
            calcite_version: self.calcite_version.clone(),
            service_user: self.service_user.clone(),
            link_libs: self.link_libs.clone(),
            skip_restart: self.skip_restart.then_some(true),
        }
    }
}
