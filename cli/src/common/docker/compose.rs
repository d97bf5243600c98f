//! # Eisenhardt Compose Invocations
//!
//! File: cli/src/common/docker/compose.rs
//!
//! Builds the `docker-compose` command that brings a project's stack up. The
//! stack is described by several compose files layered with repeated `-f`
//! flags: the fixed base configuration first, then the optional port mapping
//! and contrib fragments chosen at start time.
//!
use crate::common::process::ExternalCommand;
use crate::core::error::Result;

/// `<compose> -f<file>... -p <project> up -d --force-recreate`.
///
/// `compose` is the configured argv prefix (`["docker-compose"]` or
/// `["docker", "compose"]`); `files` are paths relative to the directory the
/// command will run in, in layering order.
pub fn up_command(compose: &[String], files: &[String], project_name: &str) -> Result<ExternalCommand> {
    Ok(ExternalCommand::from_argv(compose)?
        .args(files.iter().map(|file| format!("-f{}", file)))
        .args(["-p", project_name, "up", "-d", "--force-recreate"]))
}
