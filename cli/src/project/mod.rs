//! # Eisenhardt Project (`project`)
//!
//! File: cli/src/project/mod.rs
//!
//! ## Overview
//!
//! A *project* is a Magento installation directory that contains the marker
//! directory `.eisenhardt/`. Everything Eisenhardt knows about a project is
//! derived from that root path:
//!
//! - **name**: the basename, lowercased, with every character outside
//!   `[a-z0-9]` removed. It doubles as the compose project name, so the stack
//!   is addressed by the `com.docker.compose.project=<name>` label.
//! - **network**: `<name>_eisenhardt`, the compose network ephemeral containers join.
//! - **volume**: `<name>_magento`, the code volume `sync` mirrors into.
//!
//! ## Architecture
//!
//! `Project` turns those names into argv lists and runs them through
//! `common::process`:
//!
//! - **`start`**: layers compose files (`base.yml`, `dev.yml`, optionally
//!   `ports.yml` and `contrib/*.yml`) into one `docker-compose up`.
//! - **`info`**: lists the project's containers and their addresses.
//! - **`stop`**: `docker stop` for each running container.
//! - **`run`**: a one-off command in an ephemeral console container that shares
//!   the appserver's volumes and the project network, with the user's SSH,
//!   composer, npm and git state mounted in.
//! - **`repair_permissions`**: a fixed series of root `run`s resetting
//!   ownership and modes inside the code volume.
//! - **`sync`**: an interactive unison session between the host checkout and
//!   the code volume.
//!
//! Child processes are awaited one at a time. In dry-run mode the mutating
//! command is printed to stdout instead of being executed; read-only queries
//! (`docker ps`, `docker inspect`, `docker exec ... php`) still run so the
//! printed command is the one that would have been executed.
//!
//! ## Usage
//!
//! ```rust
//! let config = config::load_config()?;
//! let project = factory::find_from_working_directory(config)?;
//! project.start(&StartParams { map_ports: true, include_contrib: true }).await?;
//! for container in project.info().await? { /* ... */ }
//! ```
//!
pub mod factory;
pub mod module;
pub mod params;

use crate::common::docker::{self, compose, interaction::EphemeralRun, state, ContainerStatus};
use crate::common::fs::io;
use crate::common::network;
use crate::common::process::{self, ExternalCommand};
use crate::common::system;
use crate::core::config::{Config, MARKER_DIRECTORY};
use crate::core::error::{EisenhardtError, Result};
use crate::core::templating;
use anyhow::Context;
use params::{RunParams, StartParams};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Compose service whose container provides volumes and PHP version for `run`.
pub const APPSERVER_SERVICE: &str = "appserver";

const CONTRIB_DIRECTORY: &str = "contrib";
const XDEBUG_PORT: u16 = 9000;

/// Paths (relative to the project root) unison leaves alone.
const SYNC_IGNORED_PATHS: [&str; 11] = [
    ".eisenhardt",
    ".git",
    "dev",
    "generated",
    "lib",
    "pub/media",
    "pub/static",
    "setup",
    "var/cache",
    "var/view_preprocessed",
    "vendor",
];

/// A located Eisenhardt project.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    name: String,
    config: Config,
    dry_run: bool,
}

/// Host facts mounted or passed into ephemeral containers.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HostContext {
    uid: u32,
    home: String,
    composer_home: String,
    ssh_socket: Option<String>,
    host_address: String,
}

impl HostContext {
    async fn detect(root: &Path) -> Result<Self> {
        let home = system::home_dir()?.to_string_lossy().into_owned();
        let composer_home = std::env::var("COMPOSER_HOME")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| format!("{}/.config/composer", home));
        let ssh_socket = std::env::var("SSH_AUTH_SOCK").ok().filter(|v| !v.is_empty());
        Ok(Self {
            uid: system::owner_uid(root)?,
            home,
            composer_home,
            ssh_socket,
            host_address: network::local_ip_address().await,
        })
    }
}

/// Lowercase alphanumeric projection of the directory's basename.
///
/// # Errors
///
/// `EisenhardtError::InvalidProjectName` when the projection is empty
/// (`/`, `___`, a basename of only punctuation or non-ASCII letters).
pub fn project_name_for(root: &Path) -> Result<String> {
    let name: String = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if name.is_empty() {
        return Err(EisenhardtError::InvalidProjectName {
            path: root.display().to_string(),
        }
        .into());
    }
    Ok(name)
}

/// `major.minor` of a `PHP_VERSION` string such as `7.2.34-1+ubuntu`.
pub fn parse_php_version(output: &str) -> Result<String> {
    let mut parts = output.trim().split('.');
    match (parts.next(), parts.next()) {
        (Some(major), Some(minor))
            if !major.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().take_while(char::is_ascii_digit).count() > 0 =>
        {
            let minor: String = minor.chars().take_while(char::is_ascii_digit).collect();
            Ok(format!("{}.{}", major, minor))
        }
        _ => Err(EisenhardtError::MalformedOutput {
            cmd: "php -r 'echo PHP_VERSION;'".to_string(),
            detail: format!("cannot read a version from '{}'", output.trim()),
        }
        .into()),
    }
}

/// The `find ... chown/chmod` series that resets the code volume, in order,
/// each with a description for the log.
fn permission_repairs(uid: u32, group_id: u32) -> Vec<(&'static str, Vec<String>)> {
    let prune = ["find", ".", "-type", "d", "-path", "./.eisenhardt", "-prune", "-o"];
    let owner = format!("{}:{}", uid, group_id);
    let with_prune = |rest: &[&str]| -> Vec<String> {
        prune.iter().chain(rest.iter()).map(|s| s.to_string()).collect()
    };
    let recursive_group_write = |dir: &str| -> Vec<String> {
        ["chmod", "-v", "-R", "g+w", dir].iter().map(|s| s.to_string()).collect()
    };

    vec![
        (
            "file ownership",
            with_prune(&["-exec", "chown", "-v", owner.as_str(), "{}", ";"]),
        ),
        (
            "file permissions",
            with_prune(&["-type", "f", "-exec", "chmod", "-v", "744", "{}", ";"]),
        ),
        (
            "directory permissions",
            with_prune(&[
                "-type", "d", "-exec", "chmod", "-v", "755", "{}", ";", "-exec", "chmod", "-v", "g+s",
                "{}", ";",
            ]),
        ),
        ("var permissions", recursive_group_write("var")),
        ("pub permissions", recursive_group_write("pub")),
        ("app/etc permissions", recursive_group_write("app/etc")),
        ("generated permissions", recursive_group_write("generated")),
        (
            "bin/magento permissions",
            ["chmod", "-v", "+x", "bin/magento"].iter().map(|s| s.to_string()).collect(),
        ),
    ]
}

impl Project {
    /// Wraps `root`, which must contain the marker directory and have a
    /// basename a project name can be derived from.
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let root = root.into();
        if !root.join(MARKER_DIRECTORY).is_dir() {
            debug!("No {} directory in {:?}", MARKER_DIRECTORY, root);
            return Err(EisenhardtError::NotAProject.into());
        }
        let name = project_name_for(&root)?;
        Ok(Self {
            root,
            name,
            config,
            dry_run: false,
        })
    }

    /// Print mutating commands instead of running them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn installation_directory(&self) -> &Path {
        &self.root
    }

    pub fn eisenhardt_directory(&self) -> PathBuf {
        self.root.join(MARKER_DIRECTORY)
    }

    pub fn contrib_directory(&self) -> PathBuf {
        self.eisenhardt_directory().join(CONTRIB_DIRECTORY)
    }

    pub fn project_name(&self) -> String {
        self.name.clone()
    }

    pub fn network_name(&self) -> String {
        format!("{}_eisenhardt", self.project_name())
    }

    pub fn volume_name(&self) -> String {
        format!("{}_magento", self.project_name())
    }

    /// `dir` relative to the project root with a trailing `/`; the root itself is `./`.
    ///
    /// # Errors
    ///
    /// Fails when `dir` is not inside the project.
    pub fn relative_directory(&self, dir: &Path) -> Result<String> {
        let relative = pathdiff::diff_paths(dir, &self.root)
            .filter(|p| !p.starts_with(".."))
            .ok_or_else(|| {
                EisenhardtError::FileSystem(format!(
                    "{:?} is not inside the project at {:?}",
                    dir, self.root
                ))
            })?;
        let relative = relative.to_string_lossy();
        let relative = relative.trim_end_matches('/');
        if relative.is_empty() || relative == "." {
            Ok("./".to_string())
        } else {
            Ok(format!("{}/", relative))
        }
    }

    /// Copies `file` into `.eisenhardt/contrib/`, substituting `vars`.
    pub fn install_contrib_file(&self, file: &Path, vars: &HashMap<String, String>) -> Result<()> {
        let file_name = file.file_name().ok_or_else(|| {
            EisenhardtError::FileSystem(format!("Not a file path: {:?}", file))
        })?;
        let contrib = self.contrib_directory();
        io::ensure_dir_exists(&contrib)?;
        templating::render_file(file, &contrib.join(file_name), vars)
            .with_context(|| format!("Failed to install contrib file {:?}", file))?;
        info!("Installed contrib file {:?}", file_name);
        Ok(())
    }

    /// Compose files for `params`, relative to the project root, in layering order.
    fn compose_files(&self, params: &StartParams) -> Result<Vec<String>> {
        let mut files = vec![
            format!("{}/base.yml", MARKER_DIRECTORY),
            format!("{}/dev.yml", MARKER_DIRECTORY),
        ];
        if params.map_ports {
            files.push(format!("{}/ports.yml", MARKER_DIRECTORY));
        }
        if params.include_contrib {
            for name in io::files_with_extension(&self.contrib_directory(), "yml")? {
                files.push(format!("{}/{}/{}", MARKER_DIRECTORY, CONTRIB_DIRECTORY, name));
            }
        }
        Ok(files)
    }

    pub fn start_command(&self, params: &StartParams) -> Result<ExternalCommand> {
        let files = self.compose_files(params)?;
        Ok(
            compose::up_command(&self.config.docker.compose, &files, &self.project_name())?
                .current_dir(&self.root),
        )
    }

    /// Brings the stack up, recreating its containers.
    pub async fn start(&self, params: &StartParams) -> Result<()> {
        let cmd = self.start_command(params)?;
        self.execute(&cmd, false).await
    }

    /// Every container of the project with its state and network address.
    pub async fn info(&self) -> Result<Vec<ContainerStatus>> {
        let docker = &self.config.docker.binary;
        let listing =
            process::capture(&state::project_containers_command(docker, &self.project_name())).await?;
        let rows = state::parse_container_rows(&listing.stdout)?;

        let running: Vec<String> = rows.iter().filter(|r| r.running).map(|r| r.name.clone()).collect();
        let addresses = if running.is_empty() {
            HashMap::new()
        } else {
            let output = process::capture(&state::ip_addresses_command(
                docker,
                &self.network_name(),
                &running,
            ))
            .await?;
            state::parse_ip_addresses(&output.stdout)?
        };
        Ok(state::merge_statuses(rows, &addresses))
    }

    /// Stops every running container of the project.
    ///
    /// All containers are attempted; failures are reported together afterwards.
    pub async fn stop(&self) -> Result<()> {
        let docker = &self.config.docker.binary;
        let mut failures = Vec::new();
        for container in self.info().await? {
            if !container.running {
                info!("{} is not running, skipping", container.name);
                continue;
            }
            match self
                .execute(&docker::interaction::stop_command(docker, &container.name), false)
                .await
            {
                Ok(()) if !self.dry_run => println!("Stopped {}", container.name),
                Ok(()) => {}
                Err(e) => {
                    error!("Failed to stop {}: {:?}", container.name, e);
                    failures.push((container.name, e));
                }
            }
        }

        if failures.is_empty() {
            return Ok(());
        }
        eprintln!("\nErrors occurred while stopping containers:");
        for (name, err) in &failures {
            eprintln!("- {}: {}", name, err);
        }
        let count = failures.len();
        let (_, first) = failures.remove(0);
        Err(first).context(format!("Failed to stop {} container(s)", count))
    }

    /// ID of the running container of `service`.
    pub async fn container_id(&self, service: &str) -> Result<String> {
        let cmd = state::service_container_id_command(
            &self.config.docker.binary,
            &self.project_name(),
            service,
        );
        let output = process::capture(&cmd).await?;
        output
            .stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                EisenhardtError::ServiceNotRunning {
                    service: service.to_string(),
                }
                .into()
            })
    }

    /// `major.minor` PHP version of the running appserver.
    pub async fn php_version(&self) -> Result<String> {
        let appserver = self.container_id(APPSERVER_SERVICE).await?;
        self.php_version_of(&appserver).await
    }

    async fn php_version_of(&self, container: &str) -> Result<String> {
        let cmd = docker::interaction::exec_command(
            &self.config.docker.binary,
            container,
            &["php", "-r", "echo PHP_VERSION;"],
        );
        let output = process::capture(&cmd).await?;
        parse_php_version(&output.stdout)
    }

    /// The ephemeral container `run` starts for `params`.
    fn ephemeral_run(
        &self,
        params: &RunParams,
        host: &HostContext,
        appserver: &str,
        php_version: &str,
    ) -> EphemeralRun {
        let user = if params.as_root {
            "root:root".to_string()
        } else {
            format!("{}:{}", host.uid, self.config.run.group_id)
        };
        let home = &host.home;
        let container_composer_home = format!("{}/.composer", home);

        let mut volumes = vec![
            ("/etc/passwd".to_string(), "/etc/passwd".to_string()),
            (
                format!("{}/.ssh/known_hosts", home),
                format!("{}/.ssh/known_hosts", home),
            ),
            (host.composer_home.clone(), container_composer_home.clone()),
            (format!("{}/.npm", home), format!("{}/.npm", home)),
            (format!("{}/.gitconfig", home), format!("{}/.gitconfig", home)),
        ];
        if let Some(socket) = &host.ssh_socket {
            volumes.push((socket.clone(), socket.clone()));
        }

        let xdebug = format!(
            "remote_host={} remote_connect_back=0 xdebug.remote_mode=req xdebug.remote_port={}",
            host.host_address, XDEBUG_PORT
        );
        let mut env = vec![
            ("COMPOSER_HOME".to_string(), container_composer_home),
            ("PHP_IDE_CONFIG".to_string(), "serverName=eisenhardt".to_string()),
            ("XDEBUG_CONFIG".to_string(), xdebug),
        ];
        if let Some(socket) = &host.ssh_socket {
            env.push(("SSH_AUTH_SOCK".to_string(), socket.clone()));
        }

        let tag = if params.debug {
            format!("{}-console-xdebug", php_version)
        } else {
            format!("{}-console", php_version)
        };

        EphemeralRun {
            interactive: params.interactive,
            volumes_from: Some(appserver.to_string()),
            network: Some(self.network_name()),
            user: Some(user),
            volumes,
            env,
            workdir: Some(params.working_directory.clone()),
            image: format!("{}:{}", self.config.run.image, tag),
            command: params.command.clone(),
        }
    }

    /// Runs `params.command` in an ephemeral console container.
    pub async fn run(&self, params: &RunParams) -> Result<()> {
        let appserver = self.container_id(APPSERVER_SERVICE).await?;
        let php_version = match &params.php_version {
            Some(version) => version.clone(),
            None => self.php_version_of(&appserver).await?,
        };
        let host = HostContext::detect(&self.root).await?;
        let cmd = self
            .ephemeral_run(params, &host, &appserver, &php_version)
            .to_command(&self.config.docker.binary);
        self.execute(&cmd, params.interactive).await
    }

    /// Resets ownership and modes inside the code volume.
    pub async fn repair_permissions(&self) -> Result<()> {
        let uid = system::owner_uid(&self.root)?;
        for (description, command) in permission_repairs(uid, self.config.run.group_id) {
            info!("Fixing {}", description);
            let params = RunParams {
                command,
                working_directory: self.config.run.mount_path.clone(),
                as_root: true,
                interactive: false,
                ..RunParams::default()
            };
            self.run(&params)
                .await
                .with_context(|| format!("Failed to fix {}", description))?;
        }
        Ok(())
    }

    fn sync_run(&self, uid: u32) -> EphemeralRun {
        let mut command: Vec<String> = ["unison", "/mnt/right", "/mnt/left", "-batch", "-repeat", "5"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        for path in SYNC_IGNORED_PATHS {
            command.push("-ignore".to_string());
            command.push(format!("Path {}", path));
        }
        command.push("-ignore".to_string());
        command.push("Name node_modules".to_string());

        EphemeralRun {
            interactive: true,
            user: Some(format!("{}:{}", uid, self.config.run.group_id)),
            env: vec![("HOME".to_string(), "/tmp".to_string())],
            volumes: vec![
                (self.root.to_string_lossy().into_owned(), "/mnt/left".to_string()),
                (self.volume_name(), "/mnt/right".to_string()),
            ],
            image: self.config.sync.image.clone(),
            command,
            ..EphemeralRun::default()
        }
    }

    /// Continuously mirrors the host checkout and the code volume.
    pub async fn sync(&self) -> Result<()> {
        let uid = system::owner_uid(&self.root)?;
        let cmd = self.sync_run(uid).to_command(&self.config.docker.binary);
        self.execute(&cmd, true).await
    }

    async fn execute(&self, cmd: &ExternalCommand, interactive: bool) -> Result<()> {
        if self.dry_run {
            println!("{}", cmd);
            return Ok(());
        }
        if interactive {
            process::run_interactive(cmd).await
        } else {
            process::capture(cmd).await.map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::{tempdir, TempDir};

    fn project_in(name: &str) -> (TempDir, Project) {
        let base = tempdir().unwrap();
        let root = base.path().join(name);
        fs::create_dir_all(root.join(MARKER_DIRECTORY)).unwrap();
        let project = Project::new(root, Config::default()).unwrap();
        (base, project)
    }

    /// `docker ps` and `docker inspect` output for a stack with one stopped container.
    const STACK_SCRIPT: &str = r#"case "$1" in
  ps) printf 'shop_appserver_1|Up 3 hours\nshop_redis_1|Exited (0) 2 minutes ago\nshop_database_1|Up 3 hours (healthy)\n' ;;
  inspect) printf '/shop_appserver_1|172.22.0.3\n/shop_database_1|172.22.0.2\n' ;;
  stop)
    if [ "$2" = shop_appserver_1 ]; then echo "Error response from daemon: cannot stop" >&2; exit 1; fi
    echo "$2" ;;
esac
"#;

    /// A `shop` project whose docker binary is a shell script running `body`.
    /// Each invocation's arguments are appended, one line per call, to the
    /// returned log file.
    fn project_with_fake_docker(body: &str) -> (TempDir, Project, PathBuf) {
        let (base, project) = project_in("shop");
        let log = base.path().join("calls.log");
        let script = base.path().join("docker");
        fs::write(
            &script,
            format!("#!/bin/sh\necho \"$*\" >> '{}'\n{}", log.display(), body),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let mut config = Config::default();
        config.docker.binary = script.display().to_string();
        let project = Project::new(project.installation_directory(), config).unwrap();
        (base, project, log)
    }

    fn calls(log: &Path) -> Vec<String> {
        fs::read_to_string(log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn host() -> HostContext {
        HostContext {
            uid: 1000,
            home: "/home/dev".to_string(),
            composer_home: "/home/dev/.config/composer".to_string(),
            ssh_socket: None,
            host_address: "192.168.1.20".to_string(),
        }
    }

    #[test]
    fn test_derived_names() {
        let (_base, project) = project_in("My-Project_2");
        assert_eq!(project.project_name(), "myproject2");
        assert_eq!(project.network_name(), "myproject2_eisenhardt");
        assert_eq!(project.volume_name(), "myproject2_magento");
        assert!(project.eisenhardt_directory().ends_with(".eisenhardt"));
    }

    #[test]
    fn test_project_name_for_plain_paths() {
        assert_eq!(project_name_for(Path::new("/srv/Shop.Example.COM")).unwrap(), "shopexamplecom");
        for root in ["/", "/srv/___", "/srv/-.-"] {
            let err = project_name_for(Path::new(root)).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<EisenhardtError>(),
                Some(EisenhardtError::InvalidProjectName { .. })
            ));
        }
    }

    #[test]
    fn test_new_rejects_root_without_name_characters() {
        let base = tempdir().unwrap();
        let root = base.path().join("___");
        fs::create_dir_all(root.join(MARKER_DIRECTORY)).unwrap();

        let err = Project::new(&root, Config::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EisenhardtError>(),
            Some(EisenhardtError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn test_new_requires_marker() {
        let dir = tempdir().unwrap();
        let err = Project::new(dir.path(), Config::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EisenhardtError>(),
            Some(EisenhardtError::NotAProject)
        ));
    }

    #[test]
    fn test_relative_directory() {
        let (_base, project) = project_in("shop");
        let root = project.installation_directory().to_path_buf();
        assert_eq!(project.relative_directory(&root).unwrap(), "./");
        assert_eq!(project.relative_directory(&root.join("a/b")).unwrap(), "a/b/");
        assert!(project.relative_directory(root.parent().unwrap()).is_err());
    }

    #[test]
    fn test_start_command_layers_ports_and_contrib() {
        let (_base, project) = project_in("shop");
        let contrib = project.contrib_directory();
        fs::create_dir_all(&contrib).unwrap();
        fs::write(contrib.join("varnish.yml"), "").unwrap();
        fs::write(contrib.join("blackfire.yml"), "").unwrap();
        fs::write(contrib.join("README.md"), "").unwrap();

        let cmd = project
            .start_command(&StartParams {
                map_ports: true,
                include_contrib: true,
            })
            .unwrap();
        assert_eq!(
            cmd.argv(),
            [
                "docker-compose",
                "-f.eisenhardt/base.yml",
                "-f.eisenhardt/dev.yml",
                "-f.eisenhardt/ports.yml",
                "-f.eisenhardt/contrib/blackfire.yml",
                "-f.eisenhardt/contrib/varnish.yml",
                "-p",
                "shop",
                "up",
                "-d",
                "--force-recreate",
            ]
        );
        assert_eq!(cmd.get_current_dir(), Some(project.installation_directory()));

        let plain = project.start_command(&StartParams::default()).unwrap();
        assert_eq!(plain.get_args().len(), 8);
    }

    #[tokio::test]
    async fn test_dry_run_start_does_not_execute() {
        let (_base, project) = project_in("shop");
        let mut config = Config::default();
        config.docker.compose = vec!["eisenhardt-missing-compose-binary".to_string()];
        let project = Project::new(project.installation_directory(), config)
            .unwrap()
            .with_dry_run(true);
        project.start(&StartParams::default()).await.unwrap();
    }

    #[test]
    fn test_ephemeral_run_for_default_params() {
        let (_base, project) = project_in("shop");
        let run = project.ephemeral_run(&RunParams::default(), &host(), "abc123", "7.2");
        let argv = run.to_command("docker").argv();

        assert_eq!(&argv[..6], ["docker", "run", "-it", "--rm", "--volumes-from=abc123", "--net=shop_eisenhardt"]);
        assert!(argv.contains(&"-u1000:10118".to_string()));
        assert!(argv.contains(&"-v/home/dev/.config/composer:/home/dev/.composer".to_string()));
        assert!(argv.contains(&"-eCOMPOSER_HOME=/home/dev/.composer".to_string()));
        assert!(argv.contains(&"-ePHP_IDE_CONFIG=serverName=eisenhardt".to_string()));
        assert!(argv.contains(
            &"-eXDEBUG_CONFIG=remote_host=192.168.1.20 remote_connect_back=0 xdebug.remote_mode=req xdebug.remote_port=9000"
                .to_string()
        ));
        assert!(!argv.iter().any(|a| a.contains("SSH_AUTH_SOCK")));
        assert_eq!(&argv[argv.len() - 3..], ["-w/mnt/magento", "maxbucknell/php:7.2-console", "bash"]);
    }

    #[test]
    fn test_ephemeral_run_as_root_with_debug_and_agent() {
        let (_base, project) = project_in("shop");
        let mut host = host();
        host.ssh_socket = Some("/tmp/ssh-agent.sock".to_string());
        let params = RunParams {
            command: vec!["whoami".to_string()],
            debug: true,
            as_root: true,
            interactive: false,
            ..RunParams::default()
        };
        let argv = project.ephemeral_run(&params, &host, "abc123", "7.1").to_command("docker").argv();

        assert!(!argv.contains(&"-it".to_string()));
        assert!(argv.contains(&"-uroot:root".to_string()));
        assert!(argv.contains(&"-v/tmp/ssh-agent.sock:/tmp/ssh-agent.sock".to_string()));
        assert!(argv.contains(&"maxbucknell/php:7.1-console-xdebug".to_string()));
        assert_eq!(argv.last().map(String::as_str), Some("whoami"));
    }

    #[test]
    fn test_parse_php_version() {
        assert_eq!(parse_php_version("7.2.34").unwrap(), "7.2");
        assert_eq!(parse_php_version("7.1.33-1+ubuntu18.04\n").unwrap(), "7.1");
        assert!(parse_php_version("").is_err());
        assert!(parse_php_version("PHP").is_err());
    }

    #[test]
    fn test_permission_repairs() {
        let repairs = permission_repairs(1000, 10118);
        let descriptions: Vec<_> = repairs.iter().map(|(d, _)| *d).collect();
        assert_eq!(
            descriptions,
            [
                "file ownership",
                "file permissions",
                "directory permissions",
                "var permissions",
                "pub permissions",
                "app/etc permissions",
                "generated permissions",
                "bin/magento permissions",
            ]
        );
        assert_eq!(
            repairs[0].1.join(" "),
            "find . -type d -path ./.eisenhardt -prune -o -exec chown -v 1000:10118 {} ;"
        );
        assert_eq!(
            repairs[2].1.join(" "),
            "find . -type d -path ./.eisenhardt -prune -o -type d -exec chmod -v 755 {} ; -exec chmod -v g+s {} ;"
        );
        assert_eq!(repairs[7].1, ["chmod", "-v", "+x", "bin/magento"]);
    }

    #[test]
    fn test_sync_run() {
        let (_base, project) = project_in("shop");
        let argv = project.sync_run(1000).to_command("docker").argv();
        let root = project.installation_directory().to_string_lossy().into_owned();

        assert_eq!(&argv[..5], ["docker", "run", "-it", "--rm", "-u1000:10118"]);
        assert!(argv.contains(&format!("-v{}:/mnt/left", root)));
        assert!(argv.contains(&"-vshop_magento:/mnt/right".to_string()));
        assert!(argv.contains(&"-eHOME=/tmp".to_string()));
        assert!(argv.contains(&"Path pub/static".to_string()));
        assert_eq!(&argv[argv.len() - 2..], ["-ignore", "Name node_modules"]);
        let ignores = argv.iter().filter(|a| *a == "-ignore").count();
        assert_eq!(ignores, SYNC_IGNORED_PATHS.len() + 1);
    }

    #[test]
    fn test_install_contrib_file_renders_vars() {
        let (base, project) = project_in("shop");
        let source = base.path().join("standup.yml");
        fs::write(&source, "- {{module_directory}}:/mnt/module\n").unwrap();

        let vars = HashMap::from([("module_directory".to_string(), "/src/module".to_string())]);
        project.install_contrib_file(&source, &vars).unwrap();

        let installed = project.contrib_directory().join("standup.yml");
        assert_eq!(fs::read_to_string(installed).unwrap(), "- /src/module:/mnt/module\n");
    }

    #[tokio::test]
    async fn test_info_merges_one_batched_inspect() {
        let (_base, project, log) = project_with_fake_docker(STACK_SCRIPT);

        let statuses = project.info().await.unwrap();
        assert_eq!(
            statuses,
            vec![
                ContainerStatus {
                    name: "shop_appserver_1".into(),
                    running: true,
                    ip_address: Some("172.22.0.3".into()),
                },
                ContainerStatus {
                    name: "shop_redis_1".into(),
                    running: false,
                    ip_address: None,
                },
                ContainerStatus {
                    name: "shop_database_1".into(),
                    running: true,
                    ip_address: Some("172.22.0.2".into()),
                },
            ]
        );

        let calls = calls(&log);
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("ps --all --filter=label=com.docker.compose.project=shop"));
        assert!(calls[1].starts_with("inspect "));
        assert!(calls[1].ends_with(" shop_appserver_1 shop_database_1"));
    }

    #[tokio::test]
    async fn test_info_without_containers_skips_inspect() {
        let (_base, project, log) = project_with_fake_docker("exit 0\n");

        assert!(project.info().await.unwrap().is_empty());
        assert_eq!(calls(&log).len(), 1);
    }

    #[tokio::test]
    async fn test_stop_attempts_every_running_container() {
        let (_base, project, log) = project_with_fake_docker(STACK_SCRIPT);

        let err = project.stop().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EisenhardtError>(),
            Some(EisenhardtError::ExternalCommand { .. })
        ));
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to stop 1 container(s)"));
        assert!(message.contains("cannot stop"));

        // The failing appserver does not prevent the database from being stopped,
        // and the exited redis container is left alone.
        let stops: Vec<String> = calls(&log).into_iter().filter(|c| c.starts_with("stop ")).collect();
        assert_eq!(stops, ["stop shop_appserver_1", "stop shop_database_1"]);
    }

    #[tokio::test]
    async fn test_run_without_appserver_is_service_not_running() {
        let (_base, project, log) = project_with_fake_docker("exit 0\n");

        let err = project.run(&RunParams::default()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EisenhardtError>(),
            Some(EisenhardtError::ServiceNotRunning { service }) if service == APPSERVER_SERVICE
        ));
        let calls = calls(&log);
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("--filter=label=com.docker.compose.service=appserver"));
    }

    #[tokio::test]
    async fn test_dry_run_detects_php_version_but_does_not_run() {
        let script = r#"case "$1" in
  ps) echo abc123 ;;
  exec) printf '7.3.11' ;;
esac
"#;
        let (_base, project, log) = project_with_fake_docker(script);
        let project = project.with_dry_run(true);

        project.run(&RunParams::command(["php", "-v"])).await.unwrap();

        let calls = calls(&log);
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("ps "));
        assert_eq!(calls[1], "exec abc123 php -r echo PHP_VERSION;");
    }
}
