//! # Eisenhardt Docker Module Interface
//!
//! File: cli/src/common/docker/mod.rs
//!
//! ## Overview
//!
//! Eisenhardt never talks to the Docker daemon directly. It builds argument
//! lists for the `docker` and `docker-compose` binaries and parses the plain
//! text they print. This module collects those argv builders and parsers so
//! the `Project` only has to decide *what* to run.
//!
//! ## Architecture
//!
//! - **`compose`**: `docker-compose ... up` for a project's layered compose files.
//! - **`state`**: read-only queries (`docker ps`, `docker inspect`, `docker info`)
//!   and the parsers that turn their output into `ContainerStatus` rows.
//! - **`interaction`**: commands that act on containers: `docker stop`,
//!   `docker exec`, and the ephemeral `docker run --rm` used by `eisenhardt run`.
//!
//! Every builder returns a `common::process::ExternalCommand`; nothing in here
//! spawns a process, which keeps all of it testable without Docker.
//!

/// `docker-compose` invocations.
pub mod compose;
/// Commands acting on containers (stop, exec, ephemeral run).
pub mod interaction;
/// Read-only queries and output parsers.
pub mod state;

/// Compose label carrying the project name on every container of a stack.
pub const PROJECT_LABEL: &str = "com.docker.compose.project";
/// Compose label carrying the service name.
pub const SERVICE_LABEL: &str = "com.docker.compose.service";

pub use state::ContainerStatus;
