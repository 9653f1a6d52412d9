//! HTTP server command
//!
//! Runs the API against PostgreSQL, or against an in-memory store with
//! `--memory` (optionally pre-seeded).

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use showcase_core::ShowcaseConfig;
use showcase_server::db::{create_pool_with_options, schema};
use showcase_server::http::{run_server, ServerConfig};
use showcase_server::{seed, AppState, MemoryStore};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Keep everything in memory instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,

    /// Load sample content into the in-memory store
    #[arg(long, requires = "memory")]
    pub seed: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl ServeArgs {
    fn server_config(&self, config: &ShowcaseConfig) -> ServerConfig {
        let mut server = ServerConfig::from(config);
        if let Some(bind) = self.bind {
            server.bind_addr = bind;
        }
        if self.cors_permissive {
            server.cors_permissive = true;
        }
        if let Some(secs) = self.timeout {
            server.request_timeout = Duration::from_secs(secs);
        }
        server
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: ShowcaseConfig) -> Result<()> {
    for warning in config.warnings() {
        tracing::warn!("{}", warning);
    }
    let server_config = args.server_config(&config);

    let state = if args.memory {
        if args.database_url.is_some() {
            tracing::info!("--memory set, ignoring database URL");
        }
        let store = MemoryStore::new();
        if args.seed {
            seed::run(&store, &store)
                .await
                .context("Failed to seed in-memory store")?;
        }
        tracing::info!("using in-memory store; data is lost on exit");
        AppState::in_memory(store, &config).context("Failed to build notifier")?
    } else {
        let database_url = args
            .database_url
            .or_else(|| config.database.url.clone())
            .context(
                "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, \
                 [database] url in the config file, or use --memory",
            )?;

        let pool = create_pool_with_options(&database_url, config.database.max_connections)
            .await
            .context("Failed to create database pool")?;
        schema::ensure(&pool)
            .await
            .context("Failed to prepare database schema")?;

        AppState::postgres(pool, &config).context("Failed to build notifier")?
    };

    tracing::info!(addr = %server_config.bind_addr, "starting showcase server");

    // Blocks until shutdown
    run_server(Arc::new(state), server_config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ServeArgs,
    }

    fn parse(argv: &[&str]) -> Result<ServeArgs, clap::Error> {
        Wrapper::try_parse_from(std::iter::once("serve").chain(argv.iter().copied()))
            .map(|w| w.args)
    }

    #[test]
    fn flags_override_config() {
        let args = parse(&["--bind", "0.0.0.0:8080", "--timeout", "5", "--cors-permissive"]).unwrap();
        let server = args.server_config(&ShowcaseConfig::default());
        assert_eq!(server.bind_addr.port(), 8080);
        assert_eq!(server.request_timeout, Duration::from_secs(5));
        assert!(server.cors_permissive);
    }

    #[test]
    fn config_used_when_flags_absent() {
        let mut config = ShowcaseConfig::default();
        config.server.request_timeout_secs = 12;
        let args = parse(&[]).unwrap();
        let server = args.server_config(&config);
        assert_eq!(server.bind_addr, config.server.bind);
        assert_eq!(server.request_timeout, Duration::from_secs(12));
    }

    #[test]
    fn seed_requires_memory() {
        assert!(parse(&["--seed"]).is_err());
        assert!(parse(&["--memory", "--seed"]).is_ok());
    }
}
