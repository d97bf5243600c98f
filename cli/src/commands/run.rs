//! # Eisenhardt Run Command
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! `eisenhardt run` executes a command (by default an interactive `bash`) in
//! an ephemeral console container attached to the project: it sees the
//! appserver's code volume, reaches the other services by name, and runs as
//! the owner of the project so created files stay editable on the host.
//!
//! The command starts in the directory matching the caller's position in the
//! project, so running `eisenhardt run ls` from `app/code/` lists
//! `/mnt/magento/app/code/` inside the container.
//!
//! ## Usage
//!
//! ```bash
//! eisenhardt run                            # shell
//! eisenhardt run composer install --no-dev  # flags after the command pass through
//! eisenhardt run -x bin/magento setup:upgrade   # with xdebug
//! eisenhardt run --root apk add vim
//! ```
//!
use crate::commands::current_project;
use crate::core::error::Result;
use crate::project::params::RunParams;
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Run a command in an ephemeral container attached to the project")]
pub struct RunArgs {
    /// PHP version of the console image. Defaults to the appserver's version.
    #[arg(short, long)]
    php_version: Option<String>,

    /// Use the xdebug-enabled console image.
    #[arg(short = 'x', long)]
    debug: bool,

    /// Print the `docker run` command instead of running it.
    #[arg(long)]
    dry_run: bool,

    /// Run as root instead of the project owner.
    #[arg(long)]
    root: bool,

    /// Command and arguments. Defaults to `bash`.
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

pub async fn handle_run(args: RunArgs) -> Result<()> {
    info!("Handling run command (Args: {:?})", args);
    let project = current_project(args.dry_run)?;

    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let relative = project.relative_directory(&current_dir)?;
    let defaults = RunParams::default();
    let params = RunParams {
        command: if args.command.is_empty() {
            defaults.command.clone()
        } else {
            args.command
        },
        working_directory: format!(
            "{}/{}",
            project.config().run.mount_path.trim_end_matches('/'),
            relative
        ),
        debug: args.debug,
        php_version: args.php_version,
        as_root: args.root,
        ..defaults
    };
    project.run(&params).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_defaults() {
        let args = RunArgs::try_parse_from(["run"]).unwrap();
        assert!(args.command.is_empty());
        assert!(args.php_version.is_none());
        assert!(!args.debug && !args.root && !args.dry_run);
    }

    #[test]
    fn test_run_args_pass_command_flags_through() {
        let args = RunArgs::try_parse_from([
            "run", "-x", "-p", "7.1", "--root", "composer", "install", "--no-dev", "-v",
        ])
        .unwrap();
        assert!(args.debug);
        assert!(args.root);
        assert_eq!(args.php_version.as_deref(), Some("7.1"));
        assert_eq!(args.command, ["composer", "install", "--no-dev", "-v"]);
    }
}
