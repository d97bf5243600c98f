//! # Eisenhardt Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Groups the filesystem helpers used by the commands:
//!
//! - **`copy`**: recursive directory copy (via `fs_extra`), used to install the project template.
//! - **`finder`**: walks parent directories looking for a marker (`.eisenhardt/`, `composer.json`).
//! - **`io`**: directory creation, file reads, renames and directory listings with error context.
//!
//! Import from the specific submodule, e.g. `crate::common::fs::finder::find_in_parent`.
//!

/// Recursive directory copy.
pub mod copy;
/// Project and module root location.
pub mod finder;
/// Basic file I/O with context.
pub mod io;
