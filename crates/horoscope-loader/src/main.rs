use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use horoscope_cache::{HoroscopeCache, SqliteStore};
use horoscope_loader::config::load_config;
use horoscope_loader::source::HttpFeedSource;
use horoscope_loader::{ensure_fresh, today, RefreshOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "horoscope-loader",
    about = "Refresh the shared horoscope cache from the remote feed (at most once per day unless forced)"
)]
struct Cli {
    /// Path to configuration file (defaults to config/horoscope.toml when present)
    #[arg(short, long)]
    config: Option<String>,

    /// Fetch even if the cache is already stamped with today's date
    #[arg(long)]
    force: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let store = SqliteStore::open(&config.cache.sqlite_path)
        .with_context(|| format!("Failed to open cache DB: {}", config.cache.sqlite_path))?;
    let cache = HoroscopeCache::new(
        store,
        config.cache.memory_max_capacity,
        Duration::from_secs(config.cache.memory_ttl_seconds),
    );
    let source = HttpFeedSource::new(&config.feed.url)?;

    let outcome = ensure_fresh(&cache, &source, today(), cli.force)
        .await
        .map_err(|e| anyhow::anyhow!("Refresh failed: {e}"))?;

    match outcome {
        RefreshOutcome::AlreadyFresh => println!("Horoscope cache is already fresh"),
        RefreshOutcome::Refreshed { records } => {
            println!("Refreshed {records} horoscope records from {}", source.url())
        }
    }

    Ok(())
}
