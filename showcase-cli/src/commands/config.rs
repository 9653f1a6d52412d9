use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use showcase_core::ShowcaseConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Show the effective config (file + environment), secrets masked
    Show,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
    }
}

fn run_path() -> Result<()> {
    let path = ShowcaseConfig::config_path();
    if path.exists() {
        println!("{}", path.display());
    } else {
        println!("{} (not found, using defaults)", path.display());
    }
    Ok(())
}

fn run_show() -> Result<()> {
    let config = ShowcaseConfig::load().context("Failed to load config")?;
    print!("{}", config.to_redacted_toml()?);

    for warning in config.warnings() {
        eprintln!("warning: {}", warning);
    }
    Ok(())
}
