//! # Eisenhardt Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Copies directory trees. Used by `init` to lay the project
//! template down as `.eisenhardt/`.
//!
//! The recursive copy relies on the `fs_extra` crate: the target directory is
//! created first and only the *contents* of the source are copied into it,
//! so `copy_directory_recursive("template", ".eisenhardt")` behaves like
//! `cp -r template .eisenhardt` on a fresh target.
//!
use crate::common::fs::io;
use crate::core::error::{EisenhardtError, Result};
use std::path::Path;
use tracing::info;

/// Copies the contents of `source` into `target`, creating `target` if needed.
///
/// # Errors
///
/// Returns an `Err` if `source` is not a directory, if `target` cannot be
/// created, or if any file fails to copy.
pub fn copy_directory_recursive(source: &Path, target: &Path) -> Result<()> {
    if !source.is_dir() {
        anyhow::bail!(EisenhardtError::FileSystem(format!(
            "Source directory does not exist: {:?}",
            source
        )));
    }
    info!("Starting recursive copy from {:?} to {:?}", source, target);

    io::ensure_dir_exists(target)?;

    let mut options = fs_extra::dir::CopyOptions::new();
    options.overwrite = true;
    options.content_only = true;

    fs_extra::dir::copy(source, target, &options).map_err(|e| {
        anyhow::anyhow!(e).context(format!("Failed to copy dir {:?} to {:?}", source, target))
    })?;

    info!("Finished recursive copy from {:?} to {:?}", source, target);
    Ok(())
}
