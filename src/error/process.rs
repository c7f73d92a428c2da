//! External process errors

use super::InstallerError;

pub fn spawn_failed(command: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::SpawnFailed {
        command: command.into(),
        reason: reason.into(),
    }
}

/// Creates an error carrying a child's non-zero exit status
pub fn failed(command: impl Into<String>, code: i32) -> InstallerError {
    InstallerError::ProcessFailed {
        command: command.into(),
        code,
    }
}
