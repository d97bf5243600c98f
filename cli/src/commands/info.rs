//! # Eisenhardt Info Command
//!
//! File: cli/src/commands/info.rs
//!
//! ## Overview
//!
//! `eisenhardt info` (alias `status`) prints a table of the project's
//! containers: name, whether it is up, and its address on the project network.
//! Only running containers have an address.
//!
//! On Docker for Mac containers run inside a VM, so the listed addresses
//! cannot be reached from the host; a warning says so.
//!
use crate::commands::current_project;
use crate::common::docker::ContainerStatus;
use crate::common::system::{self, Platform};
use crate::common::ui;
use comfy_table::{Cell, Table};
use crate::core::error::Result;
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(about = "Show the state and IP address of the project's containers")]
pub struct InfoArgs {}

fn status_table(statuses: &[ContainerStatus]) -> Table {
    let mut table = ui::table(&["Container", "Status", "IP Address"]);
    for status in statuses {
        table.add_row(vec![
            Cell::new(&status.name),
            ui::state_cell(status.running),
            Cell::new(status.ip_address.as_deref().unwrap_or("")),
        ]);
    }
    table
}

pub async fn handle_info(args: InfoArgs) -> Result<()> {
    info!("Handling info command (Args: {:?})", args);
    let project = current_project(false)?;

    if system::detect_platform(&project.config().docker.binary).await? == Platform::MacOs {
        warn!("Docker for Mac detected: container IP addresses are not reachable from the host.");
    }

    let statuses = project.info().await?;
    if statuses.is_empty() {
        println!(
            "No containers found for project '{}'. Run `eisenhardt start` first.",
            project.project_name()
        );
        return Ok(());
    }
    println!("{}", status_table(&statuses));
    Ok(())
}
