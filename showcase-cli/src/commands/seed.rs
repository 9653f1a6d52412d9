//! Load sample content into PostgreSQL

use anyhow::{Context, Result};
use clap::Parser;

use showcase_core::ShowcaseConfig;
use showcase_server::db::{create_pool, schema, PgFeatureStore, PgSubmissionStore};
use showcase_server::seed;

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_seed(args: SeedArgs, config: ShowcaseConfig) -> Result<()> {
    let database_url = args
        .database_url
        .or(config.database.url)
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or the config file")?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;
    schema::ensure(&pool)
        .await
        .context("Failed to prepare database schema")?;

    let features = PgFeatureStore::new(pool.clone());
    let submissions = PgSubmissionStore::new(pool);
    let report = seed::run(&features, &submissions)
        .await
        .context("Seeding failed")?;

    println!(
        "features: {} added, {} already present",
        report.features_added, report.features_skipped
    );
    println!(
        "submissions: {} removed, {} added",
        report.submissions_removed, report.submissions_added
    );
    Ok(())
}
