//! # Eisenhardt Start Command
//!
//! File: cli/src/commands/start.rs
//!
//! ## Overview
//!
//! `eisenhardt start` brings the project's stack up with `docker-compose`,
//! recreating every container. Compose files are layered in this order:
//!
//! 1. `.eisenhardt/base.yml` and `.eisenhardt/dev.yml`,
//! 2. `.eisenhardt/ports.yml` with `--map-ports`,
//! 3. every `.eisenhardt/contrib/*.yml`, by name, unless `--no-contrib`.
//!
//! ## Usage
//!
//! ```bash
//! eisenhardt start
//! eisenhardt start --map-ports
//! eisenhardt start --dry-run   # print the docker-compose command
//! ```
//!
use crate::commands::current_project;
use crate::core::error::Result;
use crate::project::params::StartParams;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Start the project's containers")]
pub struct StartArgs {
    /// Publish service ports on the host (layers ports.yml).
    #[arg(short = 'p', long)]
    map_ports: bool,

    /// Leave out the compose fragments in .eisenhardt/contrib/.
    #[arg(short = 'c', long)]
    no_contrib: bool,

    /// Print the command instead of running it.
    #[arg(long)]
    dry_run: bool,
}

pub async fn handle_start(args: StartArgs) -> Result<()> {
    info!("Handling start command (Args: {:?})", args);
    let project = current_project(args.dry_run)?;
    let params = StartParams {
        map_ports: args.map_ports,
        include_contrib: !args.no_contrib,
    };
    project.start(&params).await?;
    if !args.dry_run {
        println!("Started project '{}'", project.project_name());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_args_parsing() {
        let args = StartArgs::try_parse_from(["start", "-p", "-c", "--dry-run"]).unwrap();
        assert!(args.map_ports);
        assert!(args.no_contrib);
        assert!(args.dry_run);

        let defaults = StartArgs::try_parse_from(["start"]).unwrap();
        assert!(!defaults.map_ports && !defaults.no_contrib && !defaults.dry_run);
    }
}
