//! # Eisenhardt Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by `project` and `commands`. None of these
//! modules know what a project is; they describe and run external commands,
//! read the filesystem and format output.
//!
//! - **`docker`**: argv builders and output parsers for `docker` and the compose tool.
//! - **`fs`**: directory copies, small I/O helpers and the parent-directory root locator.
//! - **`network`**: the host's LAN address, for xdebug.
//! - **`process`**: `ExternalCommand` and the two ways of running one.
//! - **`system`**: file ownership, home directory and engine platform.
//! - **`ui`**: plain-text tables.
//!

pub mod docker;
pub mod fs;
pub mod network;
pub mod process;
pub mod system;
pub mod ui;
