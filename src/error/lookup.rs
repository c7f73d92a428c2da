//! Glob lookup errors

use super::InstallerError;

pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::InvalidPattern {
        pattern: pattern.into(),
        reason: reason.into(),
    }
}

/// Creates an error for a lookup that needed at least one match
pub fn no_match(pattern: impl Into<String>, dir: impl Into<String>) -> InstallerError {
    InstallerError::NoMatch {
        pattern: pattern.into(),
        dir: dir.into(),
    }
}

/// Creates an error for a lookup that matched more files than allowed
pub fn ambiguous(
    pattern: impl Into<String>,
    dir: impl Into<String>,
    candidates: &[String],
) -> InstallerError {
    InstallerError::AmbiguousMatch {
        pattern: pattern.into(),
        dir: dir.into(),
        candidates: candidates.join(", "),
    }
}
