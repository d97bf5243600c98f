//! # Eisenhardt Docker Container Interaction
//!
//! File: cli/src/common/docker/interaction.rs
//!
//! ## Overview
//!
//! Commands that act on containers:
//!
//! - **`stop_command`**: `docker stop <name>`.
//! - **`exec_command`**: `docker exec <container> <cmd...>` in a running container.
//! - **`EphemeralRun`**: a `docker run --rm` container created for a single
//!   command. It borrows the volumes of a running container of the stack
//!   (`--volumes-from`) and joins the stack's network, so the command sees the
//!   same files and services the stack does, and is discarded afterwards.
//!
use crate::common::process::ExternalCommand;

/// `docker stop <name>`.
pub fn stop_command(docker: &str, name: &str) -> ExternalCommand {
    ExternalCommand::new(docker).args(["stop", name])
}

/// `docker exec <container> <command...>`.
pub fn exec_command(docker: &str, container: &str, command: &[&str]) -> ExternalCommand {
    ExternalCommand::new(docker)
        .args(["exec", container])
        .args(command.iter().copied())
}

/// Description of a one-off `docker run --rm` container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EphemeralRun {
    /// Allocate a TTY and keep stdin open (`-it`).
    pub interactive: bool,
    /// Container whose volumes are mounted (`--volumes-from`).
    pub volumes_from: Option<String>,
    /// Network to join (`--net`).
    pub network: Option<String>,
    /// `uid:gid` or `name:group` (`-u`).
    pub user: Option<String>,
    /// `host:container` bind mounts (`-v`).
    pub volumes: Vec<(String, String)>,
    /// Environment variables (`-e`).
    pub env: Vec<(String, String)>,
    /// Working directory inside the container (`-w`).
    pub workdir: Option<String>,
    pub image: String,
    pub command: Vec<String>,
}

impl EphemeralRun {
    /// Renders the `docker run` argv. Flags use the attached short form
    /// (`-u1000:10118`, `-v/a:/b`) so every flag stays a single argument.
    pub fn to_command(&self, docker: &str) -> ExternalCommand {
        let mut cmd = ExternalCommand::new(docker).arg("run");
        if self.interactive {
            cmd = cmd.arg("-it");
        }
        cmd = cmd.arg("--rm");
        if let Some(container) = &self.volumes_from {
            cmd = cmd.arg(format!("--volumes-from={}", container));
        }
        if let Some(network) = &self.network {
            cmd = cmd.arg(format!("--net={}", network));
        }
        if let Some(user) = &self.user {
            cmd = cmd.arg(format!("-u{}", user));
        }
        cmd = cmd
            .args(self.volumes.iter().map(|(host, container)| format!("-v{}:{}", host, container)))
            .args(self.env.iter().map(|(key, value)| format!("-e{}={}", key, value)));
        if let Some(workdir) = &self.workdir {
            cmd = cmd.arg(format!("-w{}", workdir));
        }
        cmd.arg(self.image.clone()).args(self.command.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_and_exec_commands() {
        assert_eq!(stop_command("docker", "shop_web_1").argv(), ["docker", "stop", "shop_web_1"]);
        assert_eq!(
            exec_command("docker", "abc123", &["php", "-r", "echo PHP_VERSION;"]).argv(),
            ["docker", "exec", "abc123", "php", "-r", "echo PHP_VERSION;"]
        );
    }

    #[test]
    fn test_ephemeral_run_full() {
        let run = EphemeralRun {
            interactive: true,
            volumes_from: Some("abc123".into()),
            network: Some("shop_eisenhardt".into()),
            user: Some("1000:10118".into()),
            volumes: vec![("/etc/passwd".into(), "/etc/passwd".into())],
            env: vec![("COMPOSER_HOME".into(), "/home/dev/.composer".into())],
            workdir: Some("/mnt/magento/app/".into()),
            image: "maxbucknell/php:7.2-console".into(),
            command: vec!["composer".into(), "install".into()],
        };
        assert_eq!(
            run.to_command("docker").argv(),
            [
                "docker",
                "run",
                "-it",
                "--rm",
                "--volumes-from=abc123",
                "--net=shop_eisenhardt",
                "-u1000:10118",
                "-v/etc/passwd:/etc/passwd",
                "-eCOMPOSER_HOME=/home/dev/.composer",
                "-w/mnt/magento/app/",
                "maxbucknell/php:7.2-console",
                "composer",
                "install",
            ]
        );
    }

    #[test]
    fn test_ephemeral_run_minimal() {
        let run = EphemeralRun {
            image: "alpine".into(),
            command: vec!["true".into()],
            ..Default::default()
        };
        assert_eq!(run.to_command("docker").argv(), ["docker", "run", "--rm", "alpine", "true"]);
    }
}
