//! Error types and handling for the pherf installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructor helpers are grouped into sub-modules by error domain:
//! - [`config`]: Argument and configuration errors
//! - [`fs`]: File system errors
//! - [`lookup`]: Glob lookup errors
//! - [`process`]: External process errors

pub mod config;
pub mod fs;
pub mod lookup;
pub mod process;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallerError {
    // Configuration errors
    #[error("{path} is not a directory")]
    #[diagnostic(
        code(pherf::config::not_a_directory),
        help("Pass the correct location with the matching --flag or PHERF_* variable")
    )]
    NotADirectory { path: String },

    #[error("Found no JDKs under {search_dir}, try specifying by --java-home")]
    #[diagnostic(code(pherf::config::no_jdk))]
    NoJdkFound { search_dir: String },

    #[error("Could not determine the installer's own directory: {reason}")]
    #[diagnostic(code(pherf::config::program_dir))]
    ProgramDirUnavailable { reason: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(pherf::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(pherf::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // File system errors
    #[error("Source to copy does not exist: '{path}'")]
    #[diagnostic(code(pherf::fs::source_missing))]
    SourceMissing { path: String },

    #[error("Destination to copy should not exist: '{path}'")]
    #[diagnostic(
        code(pherf::fs::destination_exists),
        help("Use a fresh copy to replace an existing destination")
    )]
    DestinationExists { path: String },

    #[error("Failed to copy {from} to {to}: {reason}")]
    #[diagnostic(code(pherf::fs::copy_failed))]
    CopyFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Failed to remove {path}: {reason}")]
    #[diagnostic(code(pherf::fs::remove_failed))]
    RemoveFailed { path: String, reason: String },

    #[error("Failed to read directory {path}: {reason}")]
    #[diagnostic(code(pherf::fs::read_dir_failed))]
    ReadDirFailed { path: String, reason: String },

    #[error("Failed to link {link} to {target}: {reason}")]
    #[diagnostic(code(pherf::fs::symlink_failed))]
    SymlinkFailed {
        link: String,
        target: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(pherf::fs::io_error))]
    IoError { message: String },

    // Lookup errors
    #[error("Invalid file pattern '{pattern}': {reason}")]
    #[diagnostic(code(pherf::lookup::invalid_pattern))]
    InvalidPattern { pattern: String, reason: String },

    #[error("No files matching '{pattern}' in {dir}")]
    #[diagnostic(
        code(pherf::lookup::no_match),
        help("Check that the Phoenix build completed and the installation layout is as expected")
    )]
    NoMatch { pattern: String, dir: String },

    #[error("Expected one file matching '{pattern}' in {dir}, found: {candidates}")]
    #[diagnostic(
        code(pherf::lookup::ambiguous),
        help("Remove the stale files so only one candidate remains")
    )]
    AmbiguousMatch {
        pattern: String,
        dir: String,
        candidates: String,
    },

    // Process errors
    #[error("Failed to run '{command}': {reason}")]
    #[diagnostic(code(pherf::process::spawn_failed))]
    SpawnFailed { command: String, reason: String },

    #[error("'{command}' exited with status {code}")]
    #[diagnostic(code(pherf::process::failed))]
    ProcessFailed { command: String, code: i32 },
}

impl InstallerError {
    /// Exit status the installer should terminate with for this error.
    ///
    /// A failed external process hands its own status through unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            InstallerError::ProcessFailed { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallerError>;
