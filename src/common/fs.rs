//! Copy primitives used by every deployment step
//!
//! - [`copy`]: strict copy, source must exist and destination must not
//! - [`copy_fresh`]: replace whatever is at the destination
//! - [`copy_if_missing`]: copy only when the destination is absent

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{self, Result};

/// Whether anything occupies `path`, including a symlink whose target is gone.
pub fn path_present(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| error::fs::copy_failed(path, parent, &e))?;
    }
    Ok(())
}

/// Copy a source to a destination. The source should exist, the destination should not.
///
/// Directories are copied recursively, following symlinks inside the tree.
/// Permission bits are carried over for files and directories.
pub fn copy(src: &Path, dest: &Path) -> Result<()> {
    if !src.exists() {
        return Err(error::fs::source_missing(src.display().to_string()));
    }
    if path_present(dest) {
        return Err(error::fs::destination_exists(dest.display().to_string()));
    }

    ensure_parent_dir(dest)?;

    if src.is_dir() {
        debug!("Copying directory {} to {}", src.display(), dest.display());
        copy_dir_recursive(src, dest)
    } else {
        debug!("Copying file {} to {}", src.display(), dest.display());
        fs::copy(src, dest)
            .map(|_| ())
            .map_err(|e| error::fs::copy_failed(src, dest, &e))
    }
}

/// Remove `dest` if present, then [`copy`] `src` onto it.
pub fn copy_fresh(src: &Path, dest: &Path) -> Result<()> {
    if path_present(dest) {
        debug!("Removing {}", dest.display());
        remove_path(dest)?;
    }
    copy(src, dest)
}

/// [`copy`] only when nothing exists at `dest`. Returns whether a copy happened.
#[allow(dead_code)]
pub fn copy_if_missing(src: &Path, dest: &Path) -> Result<bool> {
    debug!("Attempting to copy {} to {}", src.display(), dest.display());
    if path_present(dest) {
        debug!("Not copying because {} already exists", dest.display());
        return Ok(false);
    }
    copy(src, dest)?;
    Ok(true)
}

/// Delete a file, symlink or whole directory tree.
///
/// A symlink is removed itself, never the directory it points at.
pub fn remove_path(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| error::fs::remove_failed(path, &e))?;
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| error::fs::remove_failed(path, &e))
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
    // Directory modes are applied last, deepest first, so a read-only
    // directory can still be filled.
    let mut dir_permissions = Vec::new();
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| error::fs::read_dir_failed(src, &e))?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| error::fs::copy_failed(entry.path(), &target, &e))?;
            let permissions = entry
                .metadata()
                .map_err(|e| error::fs::read_dir_failed(entry.path(), &e))?
                .permissions();
            dir_permissions.push((entry.path().to_path_buf(), target, permissions));
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|e| error::fs::copy_failed(entry.path(), &target, &e))?;
        }
    }

    for (from, target, permissions) in dir_permissions.into_iter().rev() {
        fs::set_permissions(&target, permissions)
            .map_err(|e| error::fs::copy_failed(&from, &target, &e))?;
    }
    Ok(())
}
