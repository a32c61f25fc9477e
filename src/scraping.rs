use reqwest::Client;
use tracing::info;
use url::Url;

use crate::error::{PressboxError, Result};

/// Fetches an article page and returns its raw HTML.
///
/// A single best-effort attempt: no retries, the caller decides whether a
/// failed article is skipped or emitted with a placeholder. The timeout is
/// carried by the shared client.
pub async fn fetch_article_html(client: &Client, url: &str) -> Result<String> {
    // Reject junk links from malformed feed entries before going out.
    Url::parse(url).map_err(|e| PressboxError::Parse(format!("invalid article URL {url}: {e}")))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| PressboxError::Fetch(format!("failed to fetch article page: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PressboxError::Fetch(format!(
            "article fetch failed with status: {status}"
        )));
    }

    let html = response
        .text()
        .await
        .map_err(|e| PressboxError::Fetch(format!("failed to read article body: {e}")))?;

    info!("scraping: fetched {} bytes from {}", html.len(), url);
    Ok(html)
}
