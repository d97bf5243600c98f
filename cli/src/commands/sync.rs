//! # Eisenhardt Sync Command
//!
//! File: cli/src/commands/sync.rs
//!
//! `eisenhardt sync` keeps the host checkout and the project's code volume in
//! step by running unison in a container, repeating every five seconds until
//! interrupted. Generated and third-party paths (`vendor`, `generated`,
//! `pub/static`, caches, `node_modules`, ...) are not synchronised.
//!
use crate::commands::current_project;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Synchronise the project directory with the code volume")]
pub struct SyncArgs {
    /// Print the `docker run` command instead of running it.
    #[arg(long)]
    dry_run: bool,
}

pub async fn handle_sync(args: SyncArgs) -> Result<()> {
    info!("Handling sync command (Args: {:?})", args);
    let project = current_project(args.dry_run)?;
    project.sync().await
}
