//! Install command implementation
//!
//! Resolves the configuration layers, then hands off to the
//! [`Installer`] pipeline with the real process launcher.

use console::Style;
use tracing::debug;

use crate::cli::Cli;
use crate::config::{self, InstallerConfig, SettingsLayer};
use crate::error::Result;
use crate::installer::{DeploymentReport, Installer};
use crate::process::SystemLauncher;

/// Merge flags/env with the optional config file and apply defaults.
pub fn resolve_config(cli: &Cli) -> Result<InstallerConfig> {
    let mut layer = cli.settings_layer();
    if let Some(path) = &cli.config {
        debug!("Reading settings from {}", path.display());
        layer = layer.or(SettingsLayer::load(path)?);
    }
    InstallerConfig::resolve(layer, &config::program_dir()?)
}

/// Run install command
pub fn run(cli: &Cli) -> Result<DeploymentReport> {
    let config = resolve_config(cli)?;
    let report = Installer::new(&config, &SystemLauncher).run()?;

    let done = Style::new().green().bold();
    println!("{} {report}", done.apply_to("Deployed:"));
    Ok(report)
}
