//! # Eisenhardt Stop Command
//!
//! File: cli/src/commands/stop.rs
//!
//! `eisenhardt stop` stops every running container of the project. Containers
//! that are already stopped are skipped. A failure to stop one container does
//! not prevent the others from being stopped; the command fails at the end,
//! listing the containers that could not be stopped.
//!
use crate::commands::current_project;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Stop the project's containers")]
pub struct StopArgs {
    /// Print the `docker stop` commands instead of running them.
    #[arg(long)]
    dry_run: bool,
}

pub async fn handle_stop(args: StopArgs) -> Result<()> {
    info!("Handling stop command (Args: {:?})", args);
    let project = current_project(args.dry_run)?;
    project.stop().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_args_parsing() {
        assert!(StopArgs::try_parse_from(["stop", "--dry-run"]).unwrap().dry_run);
        assert!(!StopArgs::try_parse_from(["stop"]).unwrap().dry_run);
        assert!(StopArgs::try_parse_from(["stop", "web"]).is_err());
    }
}
