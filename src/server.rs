use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rocket::serde::json::Json;
use rocket::{get, routes, Build, Rocket, State};
use serde::Serialize;
use tracing::{error, info};

use crate::config::Config;
use crate::ingestion;
use crate::pipeline::{self, ArticleResult};

/// Application state stored inside Rocket managed state.
pub struct AppState {
    pub started_at: DateTime<Utc>,
    pub config: Arc<Config>,
    pub client: reqwest::Client,
}

/// Response structure for `/api/v1/status`.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    uptime_seconds: i64,
    feed_url: String,
    max_articles: usize,
}

#[get("/health")]
async fn health() -> &'static str {
    "OK"
}

/// Status endpoint returning simple JSON with uptime and basic config info.
#[get("/api/v1/status")]
async fn status(state: &State<AppState>) -> Json<StatusResponse> {
    let now = Utc::now();
    let uptime = (now - state.started_at).num_seconds();

    Json(StatusResponse {
        status: "ok",
        uptime_seconds: uptime,
        feed_url: state.config.feed.url.clone(),
        max_articles: state.config.feed.max_articles(),
    })
}

/// Fetches the configured feed, runs the extraction pipeline over up to
/// `max_articles` entries, and returns the results as a JSON array.
///
/// Always 200: an empty batch (or a feed-level fetch failure) yields `[]`,
/// and per-article failures surface as placeholder entries, never a 5xx.
#[get("/api/articles")]
async fn articles(state: &State<AppState>) -> Json<Vec<ArticleResult>> {
    let cfg = &state.config;

    let feed = match ingestion::fetch_feed(&state.client, &cfg.feed.url).await {
        Ok(feed) => feed,
        Err(e) => {
            error!("failed to fetch feed {}: {:#}", cfg.feed.url, e);
            return Json(Vec::new());
        }
    };
    info!("fetched feed '{}': {} items", cfg.feed.url, feed.entries.len());

    let inputs = ingestion::collect_articles(&state.client, &feed, cfg.feed.max_articles()).await;
    let results = pipeline::process_articles(&inputs, &cfg.extraction);
    Json(results)
}

/// Build the Rocket instance with managed state and mounted routes,
/// applying [server] bind and port from the config.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    let mut fig = rocket::Config::figment();
    if let Some(bind) = &state.config.server.bind {
        fig = fig.merge(("address", bind.clone()));
    }
    if let Some(port) = state.config.server.port {
        fig = fig.merge(("port", port));
    }

    rocket::custom(fig)
        .manage(state)
        .mount("/", routes![health, status, articles])
}

/// Launch the Rocket server; blocks until it shuts down.
pub async fn launch_rocket(config: Arc<Config>) -> Result<()> {
    let client = ingestion::build_client(
        config.feed.user_agent(),
        config.fetch.timeout_seconds(),
    )
    .context("failed to build HTTP client")?;

    let state = AppState {
        started_at: Utc::now(),
        config,
        client,
    };

    info!("Starting Rocket HTTP server");
    build_rocket(state)
        .launch()
        .await
        .map_err(|e| anyhow!("Rocket failed: {}", e))?;

    info!("Rocket HTTP server has shut down");
    Ok(())
}
