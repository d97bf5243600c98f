//! # Eisenhardt Command Modules (`commands`)
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per top-level `eisenhardt` subcommand. Each defines its
//! arguments as a `clap::Parser` struct and an async `handle_*` function that
//! loads the configuration, locates the project (or module) and delegates to
//! `crate::project`. Handlers print user-facing results to stdout; diagnostics
//! go through `tracing`.
//!
//! | Command           | Handler                                  |
//! |-------------------|------------------------------------------|
//! | `init`            | `init::handle_init`                      |
//! | `start`           | `start::handle_start`                    |
//! | `stop`            | `stop::handle_stop`                      |
//! | `info` / `status` | `info::handle_info`                      |
//! | `run`             | `run::handle_run`                        |
//! | `fix-permissions` | `fix_permissions::handle_fix_permissions`|
//! | `standup`         | `standup::handle_standup`                |
//! | `sync`            | `sync::handle_sync`                      |
//!

pub mod fix_permissions;
pub mod info;
pub mod init;
pub mod run;
pub mod standup;
pub mod start;
pub mod stop;
pub mod sync;

use crate::core::config::{self, Config};
use crate::core::error::Result;
use crate::project::{factory, Project};

/// Configuration and project for the current working directory.
pub(crate) fn current_project(dry_run: bool) -> Result<Project> {
    let config: Config = config::load_config()?;
    Ok(factory::find_from_working_directory(config)?.with_dry_run(dry_run))
}
