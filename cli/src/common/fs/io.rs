//! # Eisenhardt Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` that add context to errors and log what
//! they touched:
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, failing if the path is a file.
//! - **`read_file_to_string`**: reads a file with the path in the error.
//! - **`rename_file`**: moves a file, used to give certificate artifacts fixed names.
//! - **`files_with_extension`**: sorted file names in a directory with a given
//!   extension, used to discover contrib compose fragments.
//!
use crate::core::error::{EisenhardtError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// Creates the directory and any missing parents. Returns
/// `EisenhardtError::FileSystem` if the path exists but is not a directory.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(EisenhardtError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Renames `from` to `to`, replacing `to` if it exists.
pub fn rename_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        anyhow::bail!(EisenhardtError::FileSystem(format!(
            "Expected file does not exist: {:?}",
            from
        )));
    }
    fs::rename(from, to).with_context(|| format!("Failed to rename {:?} to {:?}", from, to))?;
    debug!("Renamed {:?} to {:?}", from, to);
    Ok(())
}

/// Lists the names of regular files in `dir` ending in `.{extension}`, sorted.
///
/// A missing directory yields an empty list.
pub fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        debug!("No directory at {:?}, nothing to list", dir);
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read directory {:?}", dir))? {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", dir))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            if let Some(name) = path.file_name() {
                names.push(name.to_string_lossy().into_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}
