//! # Eisenhardt Root Locator
//!
//! File: cli/src/common/fs/finder.rs
//!
//! ## Overview
//!
//! Locates the root of a project (or module) by walking parent directories
//! from a starting point until one of them contains a named marker entry.
//! `find_in_parent` accepts any entry named like the marker (modules are
//! marked by the file `composer.json`). `find_dir_in_parent` only accepts a
//! directory, so a stray `.eisenhardt` file part way up does not hide the
//! project root above it.
//!
//! The starting directory itself is checked first, so running inside the root
//! returns the root. Reaching the filesystem root without a match yields
//! `EisenhardtError::MarkerNotFound`.
//!
use crate::core::error::{EisenhardtError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Returns the nearest ancestor of `start` (inclusive) containing `marker`.
pub fn find_in_parent(marker: &str, start: &Path) -> Result<PathBuf> {
    find_ancestor(marker, start, Path::exists)
}

/// Like `find_in_parent`, but only a directory named `marker` counts.
pub fn find_dir_in_parent(marker: &str, start: &Path) -> Result<PathBuf> {
    find_ancestor(marker, start, Path::is_dir)
}

fn find_ancestor(marker: &str, start: &Path, accept: impl Fn(&Path) -> bool) -> Result<PathBuf> {
    let mut dir = start;
    loop {
        if accept(dir.join(marker).as_path()) {
            debug!("Found '{}' in {}", marker, dir.display());
            return Ok(dir.to_path_buf());
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }
    Err(EisenhardtError::MarkerNotFound {
        marker: marker.to_string(),
        start: start.display().to_string(),
    }
    .into())
}
