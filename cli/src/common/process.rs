//! # Eisenhardt Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Everything Eisenhardt does ends in an external process: `docker`,
//! `docker-compose`, `mkcert`, `composer`, `hostname`. This module provides the
//! one way those processes are described and run.
//!
//! ## Architecture
//!
//! - **`ExternalCommand`**: an argv (program plus arguments) and an optional
//!   working directory. Built with a small builder API and rendered either on
//!   one line (`Display`, used in errors and dry runs) or spread over several
//!   lines (`pretty`, used in logs) so long `docker run` invocations stay readable.
//! - **`capture`**: runs a command to completion with stdout/stderr captured.
//! - **`run_interactive`**: runs a command attached to the caller's terminal,
//!   so TTY sessions (`docker run -it ...`) and signals reach the child.
//!
//! Both runners await the child before returning; callers never have two
//! children alive at once. A non-zero exit status is always reported as
//! `EisenhardtError::ExternalCommand`.
//!
//! ## Usage
//!
//! ```rust
//! let cmd = ExternalCommand::new("docker")
//!     .args(["ps", "--format={{.Names}}"])
//!     .current_dir(project_root);
//! let output = process::capture(&cmd).await?;
//! for line in output.stdout.lines() { /* ... */ }
//! ```
//!
use crate::core::error::{EisenhardtError, Result};
use anyhow::Context;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tracing::{debug, info};

/// Separator used by `ExternalCommand::pretty` between arguments.
const PRETTY_SEPARATOR: &str = " \\\n    ";

/// An external program invocation: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

/// Captured output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Builds a command from a configured argv prefix such as
    /// `["docker", "compose"]`. The first element is the program.
    pub fn from_argv(argv: &[String]) -> Result<Self> {
        let (program, rest) = argv.split_first().ok_or_else(|| {
            EisenhardtError::Config("Cannot build a command from an empty argv.".to_string())
        })?;
        Ok(Self::new(program.clone()).args(rest.iter().cloned()))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Multi-line rendering with shell line continuations.
    pub fn pretty(&self) -> String {
        self.argv().join(PRETTY_SEPARATOR)
    }

    fn to_tokio(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

fn log_invocation(cmd: &ExternalCommand) {
    info!("Running command:\n{}", cmd.pretty());
    debug!("Actual command: {:?} (cwd: {:?})", cmd.argv(), cmd.current_dir);
}

fn failure(cmd: &ExternalCommand, status: ExitStatus, output: &str) -> anyhow::Error {
    EisenhardtError::ExternalCommand {
        cmd: cmd.to_string(),
        status: status.to_string(),
        output: output.trim().to_string(),
    }
    .into()
}

/// Runs `cmd` to completion, capturing its output.
///
/// # Errors
///
/// Fails if the program cannot be started or exits unsuccessfully; in the
/// latter case the error carries stderr (or stdout when stderr is empty).
pub async fn capture(cmd: &ExternalCommand) -> Result<CommandOutput> {
    log_invocation(cmd);
    let output = cmd
        .to_tokio()
        .output()
        .await
        .with_context(|| format!("Failed to execute `{}`. Is it installed and on PATH?", cmd.program))?;

    let result = CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    info!("Command stdout:\n{}", result.stdout);
    debug!("Command stderr:\n{}", result.stderr);

    if !output.status.success() {
        let detail = if result.stderr.trim().is_empty() {
            &result.stdout
        } else {
            &result.stderr
        };
        return Err(failure(cmd, output.status, detail));
    }
    Ok(result)
}

/// Runs `cmd` with the caller's stdin/stdout/stderr attached.
pub async fn run_interactive(cmd: &ExternalCommand) -> Result<()> {
    log_invocation(cmd);
    let status = cmd
        .to_tokio()
        .status()
        .await
        .with_context(|| format!("Failed to execute `{}`. Is it installed and on PATH?", cmd.program))?;
    debug!("`{}` exited with {}", cmd.program, status);
    if !status.success() {
        return Err(failure(cmd, status, "(output was attached to the terminal)"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_rendering() {
        let cmd = ExternalCommand::new("docker")
            .arg("stop")
            .args(["shop_web_1", "shop_db_1"])
            .current_dir("/srv/shop");

        assert_eq!(cmd.program(), "docker");
        assert_eq!(cmd.get_args(), ["stop", "shop_web_1", "shop_db_1"]);
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/srv/shop")));
        assert_eq!(cmd.to_string(), "docker stop shop_web_1 shop_db_1");
        assert_eq!(
            cmd.pretty(),
            "docker \\\n    stop \\\n    shop_web_1 \\\n    shop_db_1"
        );
    }

    #[test]
    fn test_from_argv() {
        let argv = vec!["docker".to_string(), "compose".to_string()];
        let cmd = ExternalCommand::from_argv(&argv).unwrap().arg("up");
        assert_eq!(cmd.argv(), ["docker", "compose", "up"]);

        assert!(ExternalCommand::from_argv(&[]).is_err());
    }

    #[tokio::test]
    async fn test_capture_success() {
        let cmd = ExternalCommand::new("sh").args(["-c", "echo out; echo err >&2"]);
        let output = capture(&cmd).await.unwrap();
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[tokio::test]
    async fn test_capture_non_zero_exit_is_error() {
        let cmd = ExternalCommand::new("sh").args(["-c", "echo broken >&2; exit 3"]);
        let err = capture(&cmd).await.unwrap_err();
        match err.downcast_ref::<EisenhardtError>() {
            Some(EisenhardtError::ExternalCommand { cmd, output, .. }) => {
                assert!(cmd.starts_with("sh -c"));
                assert_eq!(output, "broken");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_capture_respects_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = ExternalCommand::new("pwd").current_dir(dir.path());
        let output = capture(&cmd).await.unwrap();
        let reported = std::fs::canonicalize(output.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let cmd = ExternalCommand::new("eisenhardt-no-such-binary-xyz");
        let err = capture(&cmd).await.unwrap_err();
        assert!(err.to_string().contains("Is it installed"));
    }
}
