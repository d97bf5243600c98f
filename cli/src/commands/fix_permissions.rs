//! # Eisenhardt Fix-Permissions Command
//!
//! File: cli/src/commands/fix_permissions.rs
//!
//! `eisenhardt fix-permissions` resets ownership and modes in the code volume
//! so that both the host user and the web server group can work with the
//! files: everything is chowned to `<project owner>:10118`, files become
//! `744` and directories `755` with the setgid bit, and the directories
//! Magento writes to (`var`, `pub`, `app/etc`, `generated`) are made group
//! writable. `.eisenhardt/` is left untouched.
//!
use crate::commands::current_project;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Repair file ownership and permissions in the project")]
pub struct FixPermissionsArgs {
    /// Print the commands instead of running them.
    #[arg(long)]
    dry_run: bool,
}

pub async fn handle_fix_permissions(args: FixPermissionsArgs) -> Result<()> {
    info!("Handling fix-permissions command (Args: {:?})", args);
    let project = current_project(args.dry_run)?;
    project.repair_permissions().await?;
    if !args.dry_run {
        println!("Permissions repaired for project '{}'", project.project_name());
    }
    Ok(())
}
