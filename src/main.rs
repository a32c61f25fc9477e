/*
pressbox - single-binary main.rs
Starts the Rocket HTTP server, or runs one fetch-extract cycle and prints
the results when invoked with --once.
*/

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use pressbox::config::Config;
use pressbox::ingestion;
use pressbox::pipeline;
use pressbox::server::launch_rocket;

#[derive(Parser, Debug)]
#[command(name = "pressbox", about = "Football-news quote extraction server")]
struct Args {
    /// Path to config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run one fetch-extract cycle, print results to stdout, and exit
    #[arg(long)]
    once: bool,

    /// Override log level (info, debug, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    // Resolve config paths
    let default_path = PathBuf::from("config.default.toml");

    let override_path = if let Some(p) = args.config {
        if !p.exists() {
            error!(path = ?p, "specified config file not found");
            return Err(anyhow::anyhow!("Config file not found: {}", p.display()));
        }
        Some(p)
    } else {
        let p = PathBuf::from("config.toml");
        if p.exists() {
            Some(p)
        } else {
            None
        }
    };

    // Load configuration with defaults
    let config = match Config::load_with_defaults(
        if default_path.exists() {
            Some(&default_path)
        } else {
            None
        },
        override_path.as_deref(),
    )
    .await
    {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(%e, "failed to load configuration");
            return Err(e);
        }
    };
    info!(defaults = ?default_path, overrides = ?override_path, "configuration loaded");

    if args.once {
        return run_once(&config).await;
    }

    launch_rocket(Arc::new(config)).await
}

/// One-shot mode: fetch the feed, extract, print each result as JSON.
async fn run_once(config: &Config) -> Result<()> {
    let client =
        ingestion::build_client(config.feed.user_agent(), config.fetch.timeout_seconds())?;

    let feed = match ingestion::fetch_feed(&client, &config.feed.url).await {
        Ok(feed) => feed,
        Err(e) => {
            error!("failed to fetch feed {}: {:#}", config.feed.url, e);
            return Ok(());
        }
    };
    info!("fetched feed '{}': {} items", config.feed.url, feed.entries.len());

    let inputs = ingestion::collect_articles(&client, &feed, config.feed.max_articles()).await;
    let results = pipeline::process_articles(&inputs, &config.extraction);

    for result in &results {
        println!("{}", serde_json::to_string_pretty(result)?);
    }
    info!("processed {} articles", results.len());
    Ok(())
}
