//! File system errors

use std::path::Path;

use super::InstallerError;

/// Creates an error for a copy source that does not exist
pub fn source_missing(path: impl Into<String>) -> InstallerError {
    InstallerError::SourceMissing { path: path.into() }
}

/// Creates an error for a strict copy onto an existing destination
pub fn destination_exists(path: impl Into<String>) -> InstallerError {
    InstallerError::DestinationExists { path: path.into() }
}

pub fn copy_failed(from: &Path, to: &Path, err: &std::io::Error) -> InstallerError {
    InstallerError::CopyFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        reason: err.to_string(),
    }
}

pub fn remove_failed(path: &Path, err: &std::io::Error) -> InstallerError {
    InstallerError::RemoveFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

pub fn read_dir_failed(path: &Path, err: &impl std::fmt::Display) -> InstallerError {
    InstallerError::ReadDirFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

pub fn symlink_failed(link: &Path, target: &Path, err: &std::io::Error) -> InstallerError {
    InstallerError::SymlinkFailed {
        link: link.display().to_string(),
        target: target.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> InstallerError {
    InstallerError::IoError {
        message: message.into(),
    }
}
