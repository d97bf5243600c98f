//! # Eisenhardt Docker State Querying
//!
//! File: cli/src/common/docker/state.rs
//!
//! ## Overview
//!
//! Read-only questions Eisenhardt asks the container engine, and the parsers
//! for the answers. All queries use Go-template `--format` strings so the
//! output is a small, line-oriented text format instead of the human table.
//!
//! ## Architecture
//!
//! - **`project_containers_command`** lists every container of a compose
//!   project as `name|status` lines. `parse_container_rows` turns those into
//!   `ContainerRow`s; a status starting with `Up` means running.
//! - **`ip_addresses_command`** asks for `name|ip` on the project network for a
//!   batch of containers in one `docker inspect`. `parse_ip_addresses` maps
//!   them by name.
//! - **`merge_statuses`** joins the two: the IP is attached only to running
//!   containers.
//! - **`service_container_id_command`** and **`operating_system_command`**
//!   answer single-value questions; their output is trimmed by the caller.
//!
//! Unexpected lines are reported as `EisenhardtError::MalformedOutput` rather
//! than skipped.
//!
use super::{PROJECT_LABEL, SERVICE_LABEL};
use crate::common::process::ExternalCommand;
use crate::core::error::{EisenhardtError, Result};
use std::collections::HashMap;
use tracing::debug;

/// One line of `docker ps` output for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRow {
    pub name: String,
    pub running: bool,
}

/// A container of the stack, as shown by `eisenhardt info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerStatus {
    pub name: String,
    pub running: bool,
    /// Address on the project network; only ever set for running containers.
    pub ip_address: Option<String>,
}

/// `docker ps --all` restricted to one compose project, one `name|status` per line.
pub fn project_containers_command(docker: &str, project_name: &str) -> ExternalCommand {
    ExternalCommand::new(docker).args([
        "ps".to_string(),
        "--all".to_string(),
        format!("--filter=label={}={}", PROJECT_LABEL, project_name),
        "--format={{.Names}}|{{.Status}}".to_string(),
    ])
}

/// ID of the running container of `service` in the project.
pub fn service_container_id_command(docker: &str, project_name: &str, service: &str) -> ExternalCommand {
    ExternalCommand::new(docker).args([
        "ps".to_string(),
        format!("--filter=label={}={}", PROJECT_LABEL, project_name),
        format!("--filter=label={}={}", SERVICE_LABEL, service),
        "--format={{.ID}}".to_string(),
    ])
}

/// `name|ip` on `network` for each of `names`.
pub fn ip_addresses_command(docker: &str, network: &str, names: &[String]) -> ExternalCommand {
    ExternalCommand::new(docker)
        .arg("inspect")
        .arg(format!(
            "-f{{{{.Name}}}}|{{{{with index .NetworkSettings.Networks \"{}\"}}}}{{{{.IPAddress}}}}{{{{end}}}}",
            network
        ))
        .args(names.iter().cloned())
}

/// The engine's operating system description (`Docker for Mac`, `Ubuntu 22.04`, ...).
pub fn operating_system_command(docker: &str) -> ExternalCommand {
    ExternalCommand::new(docker).args(["info", "--format", "{{.OperatingSystem}}"])
}

fn malformed(cmd: &str, detail: String) -> anyhow::Error {
    EisenhardtError::MalformedOutput {
        cmd: cmd.to_string(),
        detail,
    }
    .into()
}

/// Parses `name|status` lines. Blank output means no containers.
pub fn parse_container_rows(output: &str) -> Result<Vec<ContainerRow>> {
    let mut rows = Vec::new();
    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let (name, status) = line
            .split_once('|')
            .ok_or_else(|| malformed("docker ps", format!("expected 'name|status', got '{}'", line)))?;
        if name.is_empty() {
            return Err(malformed("docker ps", format!("missing container name in '{}'", line)));
        }
        rows.push(ContainerRow {
            name: name.to_string(),
            running: status.trim_start().starts_with("Up"),
        });
    }
    debug!("Parsed {} container rows", rows.len());
    Ok(rows)
}

/// Parses `name|ip` lines into a map. Docker prefixes names with `/`; it is
/// stripped. Containers without an address on the network are left out.
pub fn parse_ip_addresses(output: &str) -> Result<HashMap<String, String>> {
    let mut addresses = HashMap::new();
    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let (name, ip) = line
            .split_once('|')
            .ok_or_else(|| malformed("docker inspect", format!("expected 'name|ip', got '{}'", line)))?;
        let ip = ip.trim();
        if !ip.is_empty() {
            addresses.insert(name.trim_start_matches('/').to_string(), ip.to_string());
        }
    }
    Ok(addresses)
}

/// Attaches addresses to rows; stopped containers never get one.
pub fn merge_statuses(rows: Vec<ContainerRow>, addresses: &HashMap<String, String>) -> Vec<ContainerStatus> {
    rows.into_iter()
        .map(|row| {
            let ip_address = if row.running {
                addresses.get(&row.name).cloned()
            } else {
                None
            };
            ContainerStatus {
                name: row.name,
                running: row.running,
                ip_address,
            }
        })
        .collect()
}
