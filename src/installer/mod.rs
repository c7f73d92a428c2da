//! Deployment pipeline for pherf
//!
//! Stages run strictly in order and the first failure ends the run:
//! Validate → SyncFiles → Build → RepairSymlinks → PatchLibraries → Restart.
//! Nothing is rolled back; every stage replaces its outputs wholesale, so a
//! rerun after fixing the cause converges on the same tree.

pub mod build;
pub mod libraries;
pub mod service;
pub mod symlinks;
pub mod sync;


use std::fmt;
use std::path::PathBuf;

use tracing::info;

use crate::config::InstallerConfig;
use crate::error::Result;
use crate::process::ProcessLauncher;

use libraries::LinkOutcome;

/// Deployment pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    SyncFiles,
    Build,
    RepairSymlinks,
    PatchLibraries,
    Restart,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validate => "validate",
            Stage::SyncFiles => "sync files",
            Stage::Build => "build",
            Stage::RepairSymlinks => "repair symlinks",
            Stage::PatchLibraries => "patch libraries",
            Stage::Restart => "restart",
        };
        f.write_str(name)
    }
}

/// What a successful run changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeploymentReport {
    pub synced: Vec<PathBuf>,
    pub pherf_jars: Vec<PathBuf>,
    pub removed_links: Vec<PathBuf>,
    pub replaced_jars: Vec<PathBuf>,
    pub created_links: Vec<PathBuf>,
    pub restarted: bool,
}

impl fmt::Display for DeploymentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries synced, {} pherf jars installed, {} broken links removed, \
             {} server jars replaced, {} libraries linked",
            self.synced.len(),
            self.pherf_jars.len(),
            self.removed_links.len(),
            self.replaced_jars.len(),
            self.created_links.len(),
        )?;
        if self.restarted {
            write!(f, ", query server restarted")?;
        }
        Ok(())
    }
}

/// Runs the deployment stages against one resolved configuration
pub struct Installer<'a> {
    config: &'a InstallerConfig,
    launcher: &'a dyn ProcessLauncher,
}

impl<'a> Installer<'a> {
    pub fn new(config: &'a InstallerConfig, launcher: &'a dyn ProcessLauncher) -> Self {
        Self { config, launcher }
    }

    pub fn run(&self) -> Result<DeploymentReport> {
        let paths = &self.config.paths;
        let settings = &self.config.settings;
        let mut report = DeploymentReport::default();

        Self::enter(Stage::Validate);
        paths.validate()?;

        Self::enter(Stage::SyncFiles);
        report.synced = sync::sync_files(paths)?;

        Self::enter(Stage::Build);
        report.pherf_jars = build::build_and_install_pherf_jars(paths, settings, self.launcher)?;

        Self::enter(Stage::RepairSymlinks);
        info!("Removing dead symlinks in hbase and hadoop installations");
        for home in [&paths.hbase_home, &paths.hadoop_home] {
            report
                .removed_links
                .extend(symlinks::remove_bad_symlinks(&home.join("lib"))?);
        }

        Self::enter(Stage::PatchLibraries);
        report.replaced_jars = libraries::replace_server_jars(paths)?;
        report.created_links = libraries::link_extra_libs(paths, settings)?
            .into_iter()
            .filter(|(_, outcome)| *outcome == LinkOutcome::Created)
            .map(|(link, _)| link)
            .collect();

        if settings.skip_restart {
            info!("Skipping query server restart");
        } else {
            Self::enter(Stage::Restart);
            service::restart_queryserver(paths, settings, self.launcher)?;
            report.restarted = true;
        }

        info!("Deployment finished: {report}");
        Ok(report)
    }

    fn enter(stage: Stage) {
        tracing::debug!("Entering stage: {stage}");
    }
}
