//! showcase CLI - backend for the showcase marketing site
//!
//! - `serve`: run the HTTP API (PostgreSQL or in-memory)
//! - `seed`: load sample features and submissions into PostgreSQL
//! - `roles`: print the role → permission table
//! - `config`: inspect configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use showcase_core::ShowcaseConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "showcase",
    author,
    version,
    about = "Backend for the showcase site: feature cards, contact form, admin API"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Load sample content into the database
    Seed(commands::seed::SeedArgs),
    /// Show which permissions each role holds
    Roles(commands::roles::RolesArgs),
    /// Inspect configuration (path, show)
    Config(commands::config::ConfigArgs),
}

/// Load `.env` files: `~/.showcase/.env`, then the working directory.
/// Existing variables are never overwritten.
fn load_dotenv() {
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".showcase/.env"));
    }
    let _ = dotenvy::dotenv();
}

fn load_config() -> Result<ShowcaseConfig> {
    ShowcaseConfig::load().with_context(|| {
        format!(
            "Failed to load config from {}",
            ShowcaseConfig::config_path().display()
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, load_config()?).await?,
        Commands::Seed(args) => commands::run_seed(args, load_config()?).await?,
        Commands::Roles(args) => commands::run_roles(args)?,
        Commands::Config(args) => commands::run_config(args)?,
    }

    Ok(())
}
