//! # Eisenhardt Init Command
//!
//! File: cli/src/commands/init.rs
//!
//! ## Overview
//!
//! `eisenhardt init` turns the current directory into an Eisenhardt project:
//! the project template is installed as `.eisenhardt/` with the requested PHP
//! version filled in, and a locally trusted TLS certificate is issued for the
//! project's host name with `mkcert`.
//!
//! ## Usage
//!
//! ```bash
//! # Certificate for <project>.loc, PHP 7.2 images
//! eisenhardt init
//!
//! # Custom host name and PHP version
//! eisenhardt init shop.test -p 7.1
//!
//! # No certificate (mkcert not installed)
//! eisenhardt init --no-tls
//! ```
//!
use crate::core::{config, error::Result};
use crate::project::factory::{self, InitOptions};
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    about = "Initialise an eisenhardt project in the current directory",
    long_about = "Installs the project template into .eisenhardt/ and creates a TLS certificate for the project's host name."
)]
pub struct InitArgs {
    /// Host name for the TLS certificate. Defaults to `<project name>.loc`.
    hostname: Option<String>,

    /// PHP version the stack's images are tagged with.
    #[arg(short, long, default_value = "7.2")]
    php_version: String,

    /// Do not create a TLS certificate.
    #[arg(long)]
    no_tls: bool,
}

pub async fn handle_init(args: InitArgs) -> Result<()> {
    info!("Handling init command (Args: {:?})", args);
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = config::load_config_from(&current_dir)?;

    let options = InitOptions {
        php_version: args.php_version,
        hostname: args.hostname,
        tls: !args.no_tls,
    };
    let project = factory::create_in_directory(&current_dir, &options, &config).await?;

    println!(
        "Initialised eisenhardt project '{}' in {}",
        project.project_name(),
        project.installation_directory().display()
    );
    Ok(())
}
