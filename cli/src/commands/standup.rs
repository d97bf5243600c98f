//! # Eisenhardt Standup Command
//!
//! File: cli/src/commands/standup.rs
//!
//! ## Overview
//!
//! `eisenhardt standup` is run from a Magento module checkout. It builds a
//! complete Magento installation for testing the module in isolation:
//!
//! 1. `composer create-project` for the requested edition and version into
//!    `<module>/.standup/<standup name>`,
//! 2. an Eisenhardt project there (PHP 7.2, host
//!    `<standup name>.<module slug>.loc`),
//! 3. the `standup.yml` contrib fragment, which mounts the module at
//!    `/mnt/module` in the stack's containers,
//! 4. `start` with contrib but without host ports, then `fix-permissions`,
//! 5. inside the stack: `composer install`, a path repository for
//!    `/mnt/module`, `composer require <module>:*`, optional sample data and
//!    an empty database named after the standup.
//!
//! Each step must succeed for the next one to run.
//!
//! ## Usage
//!
//! ```bash
//! cd ~/src/module-widget
//! eisenhardt standup                # Magento Open Source 2.3
//! eisenhardt standup -m 2.2.6 -c    # Magento Commerce 2.2.6
//! eisenhardt standup -s             # with sample data
//! ```
//!
use crate::core::{config, error::Result};
use crate::project::factory::{self, InitOptions};
use crate::project::module::Module;
use crate::project::params::{MagentoEdition, RunParams, StandupParams, StartParams};
use clap::Parser;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    about = "Scaffold an installation of Magento to test a module",
    long_about = "Creates an installation of Magento and installs the module in the current \
                  directory into it, allowing testing of modules in an isolated environment. \
                  Must be run in a Magento module directory."
)]
pub struct StandupArgs {
    /// Install sample data.
    #[arg(short, long)]
    sample_data: bool,

    /// Version of Magento to install.
    #[arg(short, long, default_value = "2.3")]
    magento_version: String,

    /// Install Magento Commerce instead of Magento Open Source.
    #[arg(short, long)]
    commerce: bool,
}

impl StandupArgs {
    fn params(&self) -> StandupParams {
        StandupParams {
            install_sample_data: self.sample_data,
            magento_version: self.magento_version.clone(),
            magento_edition: if self.commerce {
                MagentoEdition::Enterprise
            } else {
                MagentoEdition::Community
            },
            ..StandupParams::default()
        }
    }
}

/// Commands run in the stack once it is up, in order.
fn installation_steps(module_name: &str, standup_name: &str, sample_data: bool) -> Vec<Vec<String>> {
    let to_argv = |args: &[&str]| args.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let mut steps = vec![
        to_argv(&["composer", "install"]),
        to_argv(&["composer", "config", "minimum-stability", "dev"]),
        to_argv(&["composer", "config", "repositories.local", "path", "/mnt/module"]),
        vec![
            "composer".to_string(),
            "require".to_string(),
            format!("{}:*", module_name),
        ],
    ];
    if sample_data {
        steps.push(to_argv(&["bin/magento", "sampledata:deploy"]));
    }
    steps.push(vec![
        "mysql".to_string(),
        "-uroot".to_string(),
        "-proot".to_string(),
        "-hdatabase".to_string(),
        format!("-ecreate database {};", standup_name),
    ]);
    steps
}

/// `installation_steps` as `run` parameters starting in the stack's code mount.
fn installation_runs(
    module_name: &str,
    standup_name: &str,
    sample_data: bool,
    mount_path: &str,
) -> Vec<RunParams> {
    installation_steps(module_name, standup_name, sample_data)
        .into_iter()
        .map(|command| RunParams {
            working_directory: mount_path.to_string(),
            ..RunParams::command(command)
        })
        .collect()
}

pub async fn handle_standup(args: StandupArgs) -> Result<()> {
    info!("Handling standup command (Args: {:?})", args);
    let module = Module::find_from_working_directory()?;
    let config = config::load_config_from(module.module_directory())?;
    let params = args.params();

    let standup_name = module.stand_up(&params).await?;
    let directory = module.standup_directory().join(&standup_name);

    let options = InitOptions {
        php_version: params.php_version.clone(),
        hostname: Some(format!("{}.{}.loc", standup_name, module.module_slug())),
        tls: true,
    };
    let project = factory::create_in_directory(&directory, &options, &config).await?;

    let vars = HashMap::from([(
        "module_directory".to_string(),
        module.module_directory().display().to_string(),
    )]);
    project.install_contrib_file(Path::new(&config.template.standup_file), &vars)?;

    project
        .start(&StartParams {
            map_ports: false,
            include_contrib: true,
        })
        .await?;
    project.repair_permissions().await?;

    let runs = installation_runs(
        module.module_name(),
        &standup_name,
        params.install_sample_data,
        &project.config().run.mount_path,
    );
    for run in runs {
        project.run(&run).await?;
    }

    println!(
        "Magento {} for {} is ready in {}",
        params.magento_version,
        module.module_name(),
        directory.display()
    );
    Ok(())
}
