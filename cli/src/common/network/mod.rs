//! # Eisenhardt Network Utilities (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//!
//! ## Overview
//!
//! Host address detection. Xdebug inside an ephemeral container needs to
//! connect back to the IDE on the host, so `eisenhardt run` passes the host's
//! primary LAN address as `remote_host`. It is taken as the first address
//! printed by `hostname -I`.
//!
//! `hostname -I` is Linux-specific. When it is unavailable the address falls
//! back to `host.docker.internal` (resolvable from containers on Docker
//! Desktop) with a warning, so `run` keeps working on macOS.
//!
use crate::common::process::{self, ExternalCommand};
use tracing::{info, warn};

/// Fallback address when the host's LAN address cannot be detected.
pub const FALLBACK_HOST_ADDRESS: &str = "host.docker.internal";

pub fn host_addresses_command() -> ExternalCommand {
    ExternalCommand::new("hostname").arg("-I")
}

/// First whitespace-separated token of `hostname -I` output.
pub fn first_address(output: &str) -> Option<String> {
    output.split_whitespace().next().map(str::to_string)
}

/// The host's primary address as seen from the container network.
pub async fn local_ip_address() -> String {
    match process::capture(&host_addresses_command()).await {
        Ok(output) => match first_address(&output.stdout) {
            Some(address) => {
                info!("Selected IP address: {}", address);
                address
            }
            None => {
                warn!("`hostname -I` reported no addresses; using {}", FALLBACK_HOST_ADDRESS);
                FALLBACK_HOST_ADDRESS.to_string()
            }
        },
        Err(e) => {
            warn!(
                "Could not detect host IP address ({:#}); using {}",
                e, FALLBACK_HOST_ADDRESS
            );
            FALLBACK_HOST_ADDRESS.to_string()
        }
    }
}
