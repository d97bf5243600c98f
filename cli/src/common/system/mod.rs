//! # Eisenhardt System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Facts about the host that shape the commands Eisenhardt builds:
//!
//! - **`owner_uid`**: the numeric owner of the project root. Ephemeral
//!   containers run as `<uid>:<group>` so files they create stay editable on
//!   the host, and `fix-permissions` chowns back to the same uid.
//! - **`home_dir`**: the user's home, whose SSH, npm, git and composer state is
//!   mounted into `eisenhardt run` containers.
//! - **`Platform`**: whether the engine is Docker for Mac, where container
//!   IPs are not routable from the host.
//!
use crate::common::docker::state;
use crate::common::process;
use crate::core::error::{EisenhardtError, Result};
use anyhow::Context;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

/// Where the container engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Docker for Mac: containers live inside a VM.
    MacOs,
    /// Containers share the host's network stack.
    Native,
}

impl Platform {
    /// Interprets `docker info --format {{.OperatingSystem}}` output.
    pub fn from_operating_system(os: &str) -> Self {
        if os.trim() == "Docker for Mac" {
            Platform::MacOs
        } else {
            Platform::Native
        }
    }
}

/// Asks the engine which platform it is running on.
pub async fn detect_platform(docker: &str) -> Result<Platform> {
    let output = process::capture(&state::operating_system_command(docker)).await?;
    Ok(Platform::from_operating_system(&output.stdout))
}

/// Numeric uid owning `path`.
pub fn owner_uid(path: &Path) -> Result<u32> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata of {:?}", path))?;
    Ok(metadata.uid())
}

pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        EisenhardtError::Config("Could not determine the home directory.".to_string()).into()
    })
}
