//! Parameter sets for the project operations that take options.
//!
//! Each struct carries the documented defaults in its `Default` impl, so
//! command handlers only set what the user changed.

/// Options for `Project::start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartParams {
    /// Layer `ports.yml` so services are reachable on host ports.
    pub map_ports: bool,
    /// Layer every compose fragment found in `.eisenhardt/contrib/`.
    pub include_contrib: bool,
}

/// Options for `Project::run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParams {
    pub command: Vec<String>,
    /// Directory inside the container the command starts in.
    pub working_directory: String,
    /// Use the xdebug-enabled console image.
    pub debug: bool,
    /// Image PHP version; detected from the running appserver when unset.
    pub php_version: Option<String>,
    pub as_root: bool,
    /// Attach a TTY and the caller's terminal.
    pub interactive: bool,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            command: vec!["bash".to_string()],
            working_directory: "/mnt/magento".to_string(),
            debug: false,
            php_version: None,
            as_root: false,
            interactive: true,
        }
    }
}

impl RunParams {
    /// Default parameters with `command` instead of `bash`.
    pub fn command<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Which Magento distribution a standup installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagentoEdition {
    Community,
    Enterprise,
}

impl MagentoEdition {
    /// Name used in the `magento/project-<edition>-edition` package.
    pub fn package_name(self) -> &'static str {
        match self {
            MagentoEdition::Community => "community",
            MagentoEdition::Enterprise => "enterprise",
        }
    }

    /// Two-letter suffix used in standup names.
    pub fn short_name(self) -> &'static str {
        match self {
            MagentoEdition::Community => "ce",
            MagentoEdition::Enterprise => "ee",
        }
    }
}

/// Options for `Module::stand_up`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandupParams {
    pub install_sample_data: bool,
    pub magento_version: String,
    pub magento_edition: MagentoEdition,
    pub php_version: String,
}

impl Default for StandupParams {
    fn default() -> Self {
        Self {
            install_sample_data: false,
            magento_version: "2.3".to_string(),
            magento_edition: MagentoEdition::Community,
            php_version: "7.2".to_string(),
        }
    }
}
