use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use horoscope::loader::config::load_config;
use horoscope::loader::{today, HttpFeedSource};
use horoscope::{build_cache, CrosstermTerminal, Palette, Session};

#[derive(Parser, Debug)]
#[command(name = "horoscope", about = "Pick your zodiac sign and read today's horoscope")]
struct Cli {
    /// Path to configuration file (defaults to config/horoscope.toml when present)
    #[arg(short, long)]
    config: Option<String>,

    /// User handle the sign is stored under (defaults to $USER)
    #[arg(long)]
    handle: Option<String>,

    /// Show the sign picker even if a sign is already stored
    #[arg(long)]
    pick: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<String>,
}

fn init_tracing(log_file: Option<&str>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {path}"))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = load_config(cli.config.as_deref())?;
    let palette = Palette::from_config(&config.colors).context("Invalid color configuration")?;

    let handle = match cli.handle {
        Some(handle) => handle,
        None => std::env::var("USER").context("No --handle given and $USER is not set")?,
    };

    let cache = build_cache(&config.cache)
        .with_context(|| format!("Failed to open cache DB: {}", config.cache.sqlite_path))?;
    let source = HttpFeedSource::new(&config.feed.url)?;

    let mut term = CrosstermTerminal::enter().context("Failed to set up terminal")?;
    Session::new(
        &mut term,
        &cache,
        &source,
        &config.display,
        &palette,
        handle,
        today(),
    )
        .run(cli.pick)
        .await
        .map_err(|e| anyhow::anyhow!("Session error: {e}"))?;

    Ok(())
}
