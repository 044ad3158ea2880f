//! Init command
//!
//! Create the data directory, a default configuration file, and a local
//! identity.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;

use agora_core::config::Config;
use agora_core::types::UserId;

use super::Cli;

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration and identity
    #[arg(long)]
    pub force: bool,
}

/// Execute the init command
pub fn execute(cli: &Cli, args: &InitArgs) -> Result<()> {
    use colored::Colorize;

    let dir = super::data_dir(cli);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

    let config_path = dir.join("config.toml");
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            "!".yellow(),
            config_path.display()
        );
    } else {
        let config = toml::to_string_pretty(&Config::default())?;
        fs::write(&config_path, config)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!("{} Wrote {}", "+".green(), config_path.display());
    }

    let identity_path = dir.join("identity");
    if identity_path.exists() && !args.force {
        println!(
            "{} identity already exists (use --force to regenerate)",
            "!".yellow()
        );
    } else {
        let user = UserId::new();
        fs::write(&identity_path, user.to_string())
            .with_context(|| format!("Failed to write {}", identity_path.display()))?;
        println!("{} Generated identity {}", "+".green(), user.to_string().cyan());
    }

    println!("{} agora initialized in {}", "✓".green(), dir.display());
    Ok(())
}
