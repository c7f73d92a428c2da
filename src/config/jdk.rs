//! JDK auto-detection
//!
//! Detection is split in two: [`candidates`] reads the search root, and
//! [`select`] decides among plain paths so the policy can be tested without a
//! filesystem.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::lookup;
use crate::error::{self, Result};

/// Where HDP installs its JDKs.
pub const DEFAULT_SEARCH_DIR: &str = "/usr/jdk64";

const JDK_PATTERN: &str = "jdk*";

/// Entries of `search_dir` named `jdk*`.
pub fn candidates(search_dir: &Path) -> Result<Vec<PathBuf>> {
    lookup::find_matches(search_dir, JDK_PATTERN)
}

/// Pick the lexicographically-first candidate.
///
/// This is a name ordering, not a version comparison: `jdk1.10` sorts before
/// `jdk1.8`. Callers rely on the ordering staying stable.
pub fn select(candidates: &[PathBuf]) -> Option<&PathBuf> {
    candidates.iter().min()
}

/// Locate a JDK under `search_dir`, failing when there is none.
pub fn detect(search_dir: &Path) -> Result<PathBuf> {
    let found = candidates(search_dir)?;
    debug!("JDK candidates under {}: {:?}", search_dir.display(), found);
    select(&found)
        .cloned()
        .ok_or_else(|| error::config::no_jdk(search_dir.display().to_string()))
}
