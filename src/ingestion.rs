use anyhow::{Context, Result};
use feed_rs::model::{Entry, Feed};
use feed_rs::parser;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::pipeline::ArticleInput;
use crate::scraping;

/// Feed content shorter than this is assumed to be a teaser; the article
/// page is fetched for the full body.
const SHORT_CONTENT_THRESHOLD: usize = 500;

/// Builds the shared HTTP client used for feed and article requests.
pub fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .build()
        .context("failed to build reqwest client")
}

/// Fetches a feed from the given URL and parses it. A single best-effort
/// attempt; on failure the whole fetch cycle yields an empty result.
pub async fn fetch_feed(client: &Client, url: &str) -> Result<Feed> {
    let response = client.get(url).send().await.context("network error during feed fetch")?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("feed fetch failed with status: {}", status);
    }

    let bytes = response.bytes().await.context("failed to read feed body")?;
    let feed = parser::parse(bytes.as_ref()).context("failed to parse feed")?;
    Ok(feed)
}

/// Maps the first `cap` feed entries to pipeline inputs, in feed order.
///
/// The richest available content wins: the content:encoded body first, then
/// the summary/description. When neither carries a full article the page is
/// fetched; a failed page fetch keeps whatever the feed provided so the
/// article is never silently dropped.
pub async fn collect_articles(client: &Client, feed: &Feed, cap: usize) -> Vec<ArticleInput> {
    let mut articles = Vec::new();

    for entry in feed.entries.iter().take(cap) {
        let title = entry
            .title
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_default();
        let url = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();

        if url.is_empty() {
            debug!("skipping entry without URL: {:?}", title);
            continue;
        }

        let mut raw_html = entry_content(entry);

        if raw_html.len() < SHORT_CONTENT_THRESHOLD {
            info!(
                "feed content short ({} chars), fetching article page: {}",
                raw_html.len(),
                url
            );
            match scraping::fetch_article_html(client, &url).await {
                Ok(html) if html.len() > raw_html.len() => raw_html = html,
                Ok(_) => info!("article page no richer than feed content, keeping feed content"),
                Err(e) => warn!("failed to fetch article page {}: {}", url, e),
            }
        }

        articles.push(ArticleInput {
            title,
            url,
            raw_html,
        });
    }

    articles
}

/// Content field priority: full body, then summary. Never guaranteed
/// non-empty.
fn entry_content(entry: &Entry) -> String {
    entry
        .content
        .as_ref()
        .and_then(|c| c.body.clone())
        .filter(|b| !b.trim().is_empty())
        .or_else(|| entry.summary.as_ref().map(|s| s.content.clone()))
        .unwrap_or_default()
}
