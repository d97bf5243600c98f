//! # Eisenhardt Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the `eisenhardt` CLI, a tool for running Magento 2
//! development stacks with Docker. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each subcommand is a variant of `Commands`, holding that command's
//!   `clap` arguments struct from `commands::*`.
//! - Handlers are async and return `core::error::Result`; errors propagate to
//!   `main`, which prints them and exits with status 1.
//! - Logs go to stderr so that stdout carries only command output (tables,
//!   dry-run commands).
//!
//! ## Examples
//!
//! ```bash
//! # Set up and start a project
//! eisenhardt init
//! eisenhardt start --map-ports
//!
//! # Show every external command being run
//! eisenhardt -v start
//!
//! # Full argv and stderr of each command
//! eisenhardt -vv info
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand arguments and handlers
mod common; // Shared utilities (process, docker, fs, ...)
mod core; // Configuration, errors and templating
mod project; // The project and module abstractions

#[derive(Parser, Debug)]
#[command(
    name = "eisenhardt",
    about = "Docker development environments for Magento 2",
    long_about = "Scaffold, start, stop and inspect container-based Magento 2 development stacks,\n\
                  and run one-off commands inside them.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    Init(commands::init::InitArgs),
    Start(commands::start::StartArgs),
    Stop(commands::stop::StopArgs),
    #[command(alias = "status")]
    Info(commands::info::InfoArgs),
    Run(commands::run::RunArgs),
    FixPermissions(commands::fix_permissions::FixPermissionsArgs),
    Standup(commands::standup::StandupArgs),
    Sync(commands::sync::SyncArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Init(args) => commands::init::handle_init(args).await,
        Commands::Start(args) => commands::start::handle_start(args).await,
        Commands::Stop(args) => commands::stop::handle_stop(args).await,
        Commands::Info(args) => commands::info::handle_info(args).await,
        Commands::Run(args) => commands::run::handle_run(args).await,
        Commands::FixPermissions(args) => {
            commands::fix_permissions::handle_fix_permissions(args).await
        }
        Commands::Standup(args) => commands::standup::handle_standup(args).await,
        Commands::Sync(args) => commands::sync::handle_sync(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
