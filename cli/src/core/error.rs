//! # Eisenhardt Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout Eisenhardt. Almost
//! everything the tool does is delegated to an external binary, so most of
//! the taxonomy is about those hand-offs:
//!
//! - the project root (or module root) could not be located,
//! - an external command exited unsuccessfully,
//! - an external command printed something we could not parse.
//!
//! ## Architecture
//!
//! - `EisenhardtError`: a `thiserror` enum with the specific failure kinds.
//! - `Result<T>`: an alias for `anyhow::Result<T>` so handlers can attach
//!   context with `anyhow::Context` while still allowing callers to
//!   `downcast_ref::<EisenhardtError>()` when they care about the kind.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !path.exists() {
//!     return Err(EisenhardtError::FileSystem(format!("Path not found: {}", path.display())))?;
//! }
//!
//! // Check for a specific kind
//! match project::factory::find_from_working_directory(config) {
//!     Err(e) if e.downcast_ref::<EisenhardtError>().is_some_and(|de| matches!(de, EisenhardtError::NotAProject)) => {
//!         println!("Run `eisenhardt init` first.");
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for Eisenhardt.
#[derive(Error, Debug)]
pub enum EisenhardtError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    /// The locator walked up to the filesystem root without finding the marker.
    #[error("'{marker}' not found in '{start}' or any parent directory.")]
    MarkerNotFound { marker: String, start: String },

    #[error("Not an eisenhardt project. Please run `eisenhardt init`.")]
    NotAProject,

    #[error("This does not appear to be a Magento 2 module (no composer.json found).")]
    NotAModule,

    #[error("An eisenhardt project already exists in '{path}'.")]
    AlreadyInitialised { path: String },

    /// The root's basename has no ASCII letters or digits to build a project name from.
    #[error("Cannot derive a project name from '{path}': the directory name needs at least one letter or digit.")]
    InvalidProjectName { path: String },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },

    /// No running container for a compose service the operation depends on.
    #[error("The '{service}' container is not running. Start the project with `eisenhardt start`.")]
    ServiceNotRunning { service: String },

    #[error("Unexpected output from `{cmd}`: {detail}")]
    MalformedOutput { cmd: String, detail: String },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = EisenhardtError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let not_found = EisenhardtError::MarkerNotFound {
            marker: ".eisenhardt".into(),
            start: "/tmp/somewhere".into(),
        };
        assert_eq!(
            not_found.to_string(),
            "'.eisenhardt' not found in '/tmp/somewhere' or any parent directory."
        );

        let failed = EisenhardtError::ExternalCommand {
            cmd: "docker stop web".into(),
            status: "exit status: 1".into(),
            output: "No such container".into(),
        };
        assert!(failed.to_string().starts_with("External command failed: docker stop web"));
        assert!(failed.to_string().ends_with("No such container"));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = EisenhardtError::NotAProject.into();
        let err = err.context("Failed to locate project");
        assert!(err
            .downcast_ref::<EisenhardtError>()
            .is_some_and(|e| matches!(e, EisenhardtError::NotAProject)));
    }
}
