//! Copy the pherf sources, scripts and scenario configs into the installation

use std::path::PathBuf;

use tracing::info;

use crate::common::fs::copy_fresh;
use crate::config::InstallationPaths;
use crate::error::Result;

/// One entry to replace in the installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    pub description: &'static str,
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Entries to synchronize, in copy order.
pub fn sync_plan(paths: &InstallationPaths) -> Vec<SyncEntry> {
    let repo = &paths.phoenix_repo;
    let home = &paths.phoenix_home;
    vec![
        SyncEntry {
            description: "phoenix-pherf directory",
            source: repo.join("phoenix-pherf"),
            dest: home.join("phoenix-pherf"),
        },
        SyncEntry {
            description: "pherf-cluster.py",
            source: repo.join("bin").join("pherf-cluster.py"),
            dest: home.join("bin").join("pherf-cluster.py"),
        },
        SyncEntry {
            description: "pherf-configs",
            source: paths.configs_dir.clone(),
            dest: home.join("bin").join("config"),
        },
        SyncEntry {
            description: "phoenix_utils.py",
            source: repo.join("bin").join("phoenix_utils.py"),
            dest: home.join("bin").join("phoenix_utils.py"),
        },
    ]
}

/// Fresh-copy every entry of [`sync_plan`]. Returns the destinations written.
pub fn sync_files(paths: &InstallationPaths) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for entry in sync_plan(paths) {
        info!("Copying {}", entry.description);
        copy_fresh(&entry.source, &entry.dest)?;
        written.push(entry.dest);
    }
    Ok(written)
}
