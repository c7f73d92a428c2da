//! Remove dangling symlinks left behind by Ambari (PHOENIX-2563)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{self, Result};

/// Delete every symlink directly inside `dir` whose target does not exist.
///
/// Regular files, directories and working links are left alone. Returns the
/// removed links.
pub fn remove_bad_symlinks(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(error::config::not_a_directory(dir.display().to_string()));
    }

    let entries = fs::read_dir(dir).map_err(|e| error::fs::read_dir_failed(dir, &e))?;
    let mut removed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| error::fs::read_dir_failed(dir, &e))?;
        let path = entry.path();
        if is_broken_symlink(&path) {
            info!("Removing broken symlink: {}", path.display());
            fs::remove_file(&path).map_err(|e| error::fs::remove_failed(&path, &e))?;
            removed.push(path);
        }
    }
    removed.sort();
    Ok(removed)
}

fn is_broken_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink()) && !path.exists()
}
