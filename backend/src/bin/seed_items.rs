//! Fill the item store with demo listings.
//!
//! # Examples
//! ```sh
//! DATABASE_URL=postgres://localhost/board cargo run --bin seed-items -- --force
//! ```

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use mockable::DefaultClock;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use ubuntucycle::domain::{DemoCatalogueSeeder, DemoSeedOutcome, InventorySummary, ItemStatus};
use ubuntucycle::domain::ports::ItemRepository;
use ubuntucycle::outbound::persistence::{
    DbPool, DieselItemRepository, PoolConfig, run_pending_migrations,
};
use ubuntucycle::settings::FALLBACK_DATABASE_URL_VAR;

/// `seed-items` command arguments.
#[derive(Debug, Parser)]
#[command(name = "seed-items", about = "Insert demo listings into the item board", version)]
struct CliArgs {
    /// Seed even when the store already holds items.
    #[arg(long)]
    force: bool,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url", env = FALLBACK_DATABASE_URL_VAR)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = CliArgs::parse();
    let url = args
        .database_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| eyre!("database URL missing: set --database-url or DATABASE_URL"))?;

    let migration_url = url.clone();
    tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await?
        .wrap_err("apply migrations")?;
    let pool = DbPool::new(PoolConfig::new(url))
        .await
        .wrap_err("create database pool")?;
    let repo = Arc::new(DieselItemRepository::new(pool));

    let seeder = DemoCatalogueSeeder::new(repo.clone(), Arc::new(DefaultClock));
    let mut rng = SmallRng::from_entropy();
    match seeder.seed(&mut rng, args.force).await? {
        DemoSeedOutcome::Skipped { existing } => {
            info!(existing, "store already populated; pass --force to add demo items anyway");
            return Ok(());
        }
        DemoSeedOutcome::Seeded { inserted } => info!(inserted, "demo items added"),
    }

    let summary = InventorySummary::from_items(&repo.list_newest_first().await?);
    info!(
        total = summary.total,
        available = summary.count_for(ItemStatus::Available),
        claimed = summary.count_for(ItemStatus::Claimed),
        gone = summary.count_for(ItemStatus::Gone),
        "inventory after seeding"
    );
    Ok(())
}
