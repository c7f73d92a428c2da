//! Argument and configuration errors

use super::InstallerError;

/// Creates an error for a path that should be an existing directory
pub fn not_a_directory(path: impl Into<String>) -> InstallerError {
    InstallerError::NotADirectory { path: path.into() }
}

/// Creates an error for an empty JDK search root
pub fn no_jdk(search_dir: impl Into<String>) -> InstallerError {
    InstallerError::NoJdkFound {
        search_dir: search_dir.into(),
    }
}

/// Creates an error for an unresolvable executable location
pub fn program_dir_unavailable(reason: impl Into<String>) -> InstallerError {
    InstallerError::ProgramDirUnavailable {
        reason: reason.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
