//! # Eisenhardt Project Factory
//!
//! File: cli/src/project/factory.rs
//!
//! ## Overview
//!
//! Two ways to obtain a `Project`:
//!
//! - **Locate** an existing one by walking up from a directory until a parent
//!   contains `.eisenhardt/` (`find_from_working_directory`,
//!   `find_from_directory`).
//! - **Create** one with `create_in_directory`, which installs the project
//!   template as `<dir>/.eisenhardt`, renders `{{version}}` in it, locates the
//!   new project and, unless disabled, issues a TLS certificate for it.
//!
//! ## Certificates
//!
//! `mkcert <host> *.<host>` is run inside `.eisenhardt/tls`. mkcert names its
//! outputs after the first host plus the count of extra names (`<host>+1.pem`
//! and `<host>+1-key.pem`); they are renamed to the fixed `crt.pem` and
//! `key.pem` the webserver configuration mounts.
//!
//! Creation is not transactional. A failure part way through leaves whatever
//! was already written in place.
//!
use super::Project;
use crate::common::fs::{finder, io};
use crate::common::process::{self, ExternalCommand};
use crate::core::config::{Config, MARKER_DIRECTORY};
use crate::core::error::{EisenhardtError, Result};
use crate::core::templating;
use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

const TLS_DIRECTORY: &str = "tls";

/// How `create_in_directory` sets up a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    /// Substituted for `{{version}}` in the template.
    pub php_version: String,
    /// Certificate host; `<project name>.loc` when unset.
    pub hostname: Option<String>,
    pub tls: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            php_version: "7.2".to_string(),
            hostname: None,
            tls: true,
        }
    }
}

/// Locates the project containing the current working directory.
pub fn find_from_working_directory(config: Config) -> Result<Project> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    find_from_directory(&current_dir, config)
}

/// Locates the project containing `dir`.
///
/// # Errors
///
/// `EisenhardtError::NotAProject` when no ancestor of `dir` has `.eisenhardt/`.
pub fn find_from_directory(dir: &Path, config: Config) -> Result<Project> {
    let root = finder::find_dir_in_parent(MARKER_DIRECTORY, dir).map_err(|e| {
        match e.downcast_ref::<EisenhardtError>() {
            Some(EisenhardtError::MarkerNotFound { .. }) => EisenhardtError::NotAProject.into(),
            _ => e,
        }
    })?;
    info!("Found project at {}", root.display());
    Project::new(root, config)
}

/// Initialises a project in `dir` and returns it.
pub async fn create_in_directory(dir: &Path, options: &InitOptions, config: &Config) -> Result<Project> {
    let target = dir.join(MARKER_DIRECTORY);
    if target.exists() {
        return Err(EisenhardtError::AlreadyInitialised {
            path: dir.display().to_string(),
        }
        .into());
    }

    // Fail before writing anything when the directory cannot name a project.
    super::project_name_for(dir)?;

    let vars = HashMap::from([("version".to_string(), options.php_version.clone())]);
    templating::install_template_tree(Path::new(&config.template.directory), &target, &vars)
        .context("Failed to install the project template")?;

    let project = find_from_directory(dir, config.clone())?;

    if options.tls {
        let hostname = options
            .hostname
            .clone()
            .unwrap_or_else(|| format!("{}.loc", project.project_name()));
        create_certificate(&project, &hostname).await?;
    } else {
        info!("Skipping TLS certificate creation");
    }
    Ok(project)
}

pub fn certificate_command(binary: &str, hostname: &str, tls_dir: &Path) -> ExternalCommand {
    ExternalCommand::new(binary)
        .args([hostname.to_string(), format!("*.{}", hostname)])
        .current_dir(tls_dir)
}

/// Gives mkcert's outputs for `hostname` plus one wildcard name their fixed names.
fn rename_issued_files(tls_dir: &Path, hostname: &str) -> Result<()> {
    io::rename_file(
        &tls_dir.join(format!("{}+1.pem", hostname)),
        &tls_dir.join("crt.pem"),
    )?;
    io::rename_file(
        &tls_dir.join(format!("{}+1-key.pem", hostname)),
        &tls_dir.join("key.pem"),
    )
}

async fn create_certificate(project: &Project, hostname: &str) -> Result<()> {
    let tls_dir = project.eisenhardt_directory().join(TLS_DIRECTORY);
    io::ensure_dir_exists(&tls_dir)?;

    let cmd = certificate_command(&project.config().tls.binary, hostname, &tls_dir);
    process::capture(&cmd)
        .await
        .with_context(|| format!("Failed to create a certificate for {}", hostname))?;

    rename_issued_files(&tls_dir, hostname)?;
    println!("Created TLS certificate for {} and *.{}", hostname, hostname);
    Ok(())
}
