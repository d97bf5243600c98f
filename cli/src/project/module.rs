//! # Eisenhardt Module
//!
//! File: cli/src/project/module.rs
//!
//! ## Overview
//!
//! A *module* is a Magento 2 extension checked out on its own: a directory with
//! a `composer.json` whose `name` is the package name (`acme/module-widget`).
//! `eisenhardt standup` builds a throwaway Magento installation next to the
//! module, inside `<module>/.standup/<standup name>`, and requires the module
//! into it from a path repository.
//!
//! Standup names encode the version and edition so several can live side by
//! side: Magento Open Source 2.3 is `magento23ce`, Commerce 2.2.6 is
//! `magento226ee`.
//!
use super::params::StandupParams;
use crate::common::fs::{finder, io};
use crate::common::process::{self, ExternalCommand};
use crate::core::error::{EisenhardtError, Result};
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// File whose presence marks a module root.
pub const MODULE_MARKER: &str = "composer.json";
pub const STANDUP_DIRECTORY: &str = ".standup";
const MAGENTO_REPOSITORY: &str = "https://repo.magento.com/";

#[derive(Deserialize, Debug)]
struct ComposerManifest {
    name: Option<String>,
}

/// A located Magento module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    root: PathBuf,
    name: String,
}

/// `magento<version digits><ce|ee>`.
pub fn standup_name(params: &StandupParams) -> Result<String> {
    let digits: String = params
        .magento_version
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return Err(EisenhardtError::ArgumentParsing(format!(
            "'{}' is not a Magento version",
            params.magento_version
        ))
        .into());
    }
    Ok(format!(
        "magento{}{}",
        digits,
        params.magento_edition.short_name()
    ))
}

/// `composer create-project` for the requested edition and version, without installing dependencies.
pub fn create_project_command(params: &StandupParams, directory: &Path) -> ExternalCommand {
    ExternalCommand::new("composer")
        .args([
            "create-project".to_string(),
            format!("--repository-url={}", MAGENTO_REPOSITORY),
            format!(
                "magento/project-{}-edition:{}",
                params.magento_edition.package_name(),
                params.magento_version
            ),
            "--no-install".to_string(),
            ".".to_string(),
        ])
        .current_dir(directory)
}

impl Module {
    /// Reads the module rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let manifest_path = root.join(MODULE_MARKER);
        let raw = io::read_file_to_string(&manifest_path)?;
        let manifest: ComposerManifest = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {:?}", manifest_path))?;
        let name = manifest
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(EisenhardtError::NotAModule)
            .with_context(|| format!("{:?} has no package name", manifest_path))?;
        Ok(Self { root, name })
    }

    pub fn find_from_working_directory() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::find_from_directory(&current_dir)
    }

    /// Locates the module containing `dir` by its `composer.json`.
    pub fn find_from_directory(dir: &Path) -> Result<Self> {
        let root = finder::find_in_parent(MODULE_MARKER, dir)
            .map_err(|_| EisenhardtError::NotAModule)?;
        info!("Found module at {}", root.display());
        Self::new(root)
    }

    pub fn module_directory(&self) -> &Path {
        &self.root
    }

    /// Composer package name.
    pub fn module_name(&self) -> &str {
        &self.name
    }

    /// Package name usable as a host name label: `acme/module-widget` becomes
    /// `acme-module-widget`.
    pub fn module_slug(&self) -> String {
        let mut slug = String::with_capacity(self.name.len());
        for c in self.name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        slug.trim_matches('-').to_string()
    }

    pub fn standup_directory(&self) -> PathBuf {
        self.root.join(STANDUP_DIRECTORY)
    }

    /// Creates a Magento code base for `params` under the standup directory
    /// and returns the standup name.
    pub async fn stand_up(&self, params: &StandupParams) -> Result<String> {
        let name = standup_name(params)?;
        let directory = self.standup_directory().join(&name);
        io::ensure_dir_exists(&directory)?;

        info!("Creating Magento {} in {}", params.magento_version, directory.display());
        process::run_interactive(&create_project_command(params, &directory))
            .await
            .context("Failed to create the Magento project")?;
        Ok(name)
    }
}
