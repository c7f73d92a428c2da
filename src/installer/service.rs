//! Restart the Phoenix Query Server so it picks up the new libraries

use std::fmt;

use tracing::{info, warn};

use crate::config::{InstallSettings, InstallationPaths};
use crate::error::{self, Result};
use crate::process::{Invocation, ProcessLauncher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Stop,
    Start,
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceAction::Stop => write!(f, "stop"),
            ServiceAction::Start => write!(f, "start"),
        }
    }
}

/// `su -c "<phoenix home>/bin/queryserver.py <action>" - <user>`
pub fn queryserver_invocation(
    paths: &InstallationPaths,
    settings: &InstallSettings,
    action: ServiceAction,
) -> Invocation {
    let script = paths.phoenix_home.join("bin").join("queryserver.py");
    Invocation::new("su").args([
        "-c".to_string(),
        format!("{} {action}", script.display()),
        "-".to_string(),
        settings.service_user.clone(),
    ])
}

/// Stop then start the query server.
///
/// A failed stop is only logged since the server may not be running. A
/// failed start is returned with the script's exit code.
pub fn restart_queryserver(
    paths: &InstallationPaths,
    settings: &InstallSettings,
    launcher: &dyn ProcessLauncher,
) -> Result<()> {
    for action in [ServiceAction::Stop, ServiceAction::Start] {
        let invocation = queryserver_invocation(paths, settings, action);
        info!("Running {}", invocation.command_line());
        let code = launcher.run(&invocation)?;
        if code == 0 {
            continue;
        }
        match action {
            ServiceAction::Stop => warn!("Query server stop exited with {code}, continuing"),
            ServiceAction::Start => {
                return Err(error::process::failed(invocation.command_line(), code));
            }
        }
    }
    Ok(())
}
