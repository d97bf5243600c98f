//! # Eisenhardt Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the settings that tell Eisenhardt
//! which external binaries and images to use. Nothing here is required: every
//! field has a default that matches the stock `maxbucknell/*` images.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.eisenhardt/eisenhardt.toml`, found by walking up from
//!    the working directory to the nearest project root
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/eisenhardt/config.toml`)
//! 3. Default values defined in the code
//!
//! Paths are expanded (`~` to home directory) and the merged result is
//! validated before use.
//!
//! ## Examples
//!
//! ```toml
//! [docker]
//! compose = ["docker", "compose"]
//!
//! [run]
//! image = "registry.example.com/php"
//!
//! [template]
//! directory = "~/eisenhardt/project-template"
//! ```
//!
//! The configuration is loaded once per command execution and handed to the
//! `Project` that the command operates on.
//!
use crate::common::fs::finder;
use crate::core::error::{EisenhardtError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the marker directory that identifies a project root.
pub const MARKER_DIRECTORY: &str = ".eisenhardt";

/// Name of the project configuration file inside the marker directory.
const PROJECT_CONFIG_FILENAME: &str = "eisenhardt.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub tls: TlsConfig,
    #[serde(default)]
    pub template: TemplateConfig,
}

/// The container engine and compose tool to shell out to.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct DockerConfig {
    /// Container engine binary (`docker`).
    pub binary: String,
    /// Compose invocation as argv prefix, e.g. `["docker-compose"]` or
    /// `["docker", "compose"]`.
    pub compose: Vec<String>,
}

/// Settings for ephemeral `eisenhardt run` containers.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RunConfig {
    /// Image repository; the tag is derived from the PHP version.
    pub image: String,
    /// Where the Magento volume is mounted inside the containers.
    pub mount_path: String,
    /// Group shared between host user and the web server in the images.
    pub group_id: u32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct SyncConfig {
    /// Image providing `unison`.
    pub image: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct TlsConfig {
    /// Certificate tool (`mkcert`).
    pub binary: String,
}

/// Location of the static files installed by `init` and `standup`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct TemplateConfig {
    /// Directory copied to `.eisenhardt/` (can use ~).
    pub directory: String,
    /// Compose fragment installed into `contrib/` by `standup` (can use ~).
    pub standup_file: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            binary: default_docker_binary(),
            compose: default_compose_command(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            image: default_run_image(),
            mount_path: default_mount_path(),
            group_id: DEFAULT_GROUP_ID,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            image: default_sync_image(),
        }
    }
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            binary: default_tls_binary(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            directory: default_template_dir(),
            standup_file: default_standup_file(),
        }
    }
}

const DEFAULT_GROUP_ID: u32 = 10118;

fn default_docker_binary() -> String {
    "docker".to_string()
}
fn default_compose_command() -> Vec<String> {
    vec!["docker-compose".to_string()]
}
fn default_run_image() -> String {
    "maxbucknell/php".to_string()
}
fn default_mount_path() -> String {
    "/mnt/magento".to_string()
}
fn default_sync_image() -> String {
    "maxbucknell/sync".to_string()
}
fn default_tls_binary() -> String {
    "mkcert".to_string()
}
fn default_template_dir() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../resources/project-template").to_string()
}
fn default_standup_file() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../resources/standup.yml").to_string()
}

/// Loads the configuration relevant to the current working directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_from(&current_dir)
}

/// Loads the configuration as seen from `start`: user config, overlaid by the
/// config of the project containing `start` (if any).
///
/// Layers are merged as TOML tables before deserialising, so any key a later
/// layer sets wins, even when it sets the default value.
pub fn load_config_from(start: &Path) -> Result<Config> {
    let mut merged = toml::Table::new();
    if let Some(user) = load_user_config()? {
        merge_tables(&mut merged, user);
    }
    if let Some(project) = load_project_config(start)? {
        merge_tables(&mut merged, project);
    }
    let mut merged_config = config_from_table(merged)?;
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<toml::Table>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Eisenhardt", "eisenhardt") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<toml::Table>> {
    let root = match finder::find_dir_in_parent(MARKER_DIRECTORY, start) {
        Ok(root) => root,
        Err(_) => {
            debug!("Not inside an eisenhardt project, skipping project configuration.");
            return Ok(None);
        }
    };
    let project_config_path = root.join(MARKER_DIRECTORY).join(PROJECT_CONFIG_FILENAME);
    if project_config_path.is_file() {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!(
            "No project configuration file at {}",
            project_config_path.display()
        );
        Ok(None)
    }
}

/// Reads one layer. The layer is also checked against `Config` on its own so
/// an unknown key is reported with the file it came from.
fn load_config_from_path(path: &Path) -> Result<toml::Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let table: toml::Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    config_from_table(table.clone())
        .with_context(|| format!("Invalid configuration in file: {}", path.display()))?;
    Ok(table)
}

fn config_from_table(table: toml::Table) -> Result<Config> {
    toml::Value::Table(table)
        .try_into::<Config>()
        .map_err(|e| anyhow!(EisenhardtError::Config(e.to_string())))
}

/// Overlays `overlay` onto `base`. Nested tables merge key by key; any other
/// value replaces what `base` had.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(nested) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, nested);
                } else {
                    base.insert(key, toml::Value::Table(nested));
                }
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    debug!("Expanding paths in configuration...");
    config.template.directory = shellexpand::tilde(&config.template.directory).into_owned();
    config.template.standup_file = shellexpand::tilde(&config.template.standup_file).into_owned();
    debug!(
        "Expanded template paths: {} / {}",
        config.template.directory, config.template.standup_file
    );
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if config.docker.binary.trim().is_empty() {
        return Err(anyhow!(EisenhardtError::Config(
            "docker.binary cannot be empty.".to_string()
        )));
    }
    if config.docker.compose.is_empty() || config.docker.compose[0].trim().is_empty() {
        return Err(anyhow!(EisenhardtError::Config(
            "docker.compose must name at least the compose binary.".to_string()
        )));
    }
    let template_dir = PathBuf::from(&config.template.directory);
    if !template_dir.exists() {
        warn!(
            "Configured template directory '{}' does not exist.",
            template_dir.display()
        );
    } else if !template_dir.is_dir() {
        return Err(anyhow!(EisenhardtError::Config(format!(
            "Configured template path '{}' exists but is not a directory.",
            template_dir.display()
        ))));
    }
    Ok(())
}
