//! Validated glob lookups over a single directory
//!
//! Patterns are matched against the file names of a directory's immediate
//! entries with wax. Callers state how many matches they can accept instead
//! of silently taking the first one.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{self, Result};

/// All entries of `dir` whose file name matches `pattern`, sorted by path.
///
/// A missing directory yields no matches.
pub fn find_matches(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let glob = Glob::new(pattern).map_err(|e| error::lookup::invalid_pattern(pattern, e.to_string()))?;

    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| error::fs::read_dir_failed(dir, &e))?;
    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| error::fs::read_dir_failed(dir, &e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            debug!("Skipping non UTF-8 name in {}: {:?}", dir.display(), name);
            continue;
        };
        let candidate = CandidatePath::from(name);
        if glob.matched(&candidate).is_some() {
            matches.push(entry.path());
        }
    }
    matches.sort();
    Ok(matches)
}

/// Matches of `pattern` in `dir`, failing when there are none.
pub fn at_least_one(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matches = find_matches(dir, pattern)?;
    if matches.is_empty() {
        return Err(error::lookup::no_match(pattern, dir.display().to_string()));
    }
    Ok(matches)
}

/// The single match of `pattern` in `dir`.
pub fn exactly_one(dir: &Path, pattern: &str) -> Result<PathBuf> {
    at_most_one(dir, pattern)?
        .ok_or_else(|| error::lookup::no_match(pattern, dir.display().to_string()))
}

/// The match of `pattern` in `dir` if there is one, failing on several.
pub fn at_most_one(dir: &Path, pattern: &str) -> Result<Option<PathBuf>> {
    let mut matches = find_matches(dir, pattern)?;
    if matches.len() > 1 {
        let names: Vec<String> = matches.iter().map(|p| p.display().to_string()).collect();
        return Err(error::lookup::ambiguous(
            pattern,
            dir.display().to_string(),
            &names,
        ));
    }
    Ok(matches.pop())
}
