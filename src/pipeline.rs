use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attribution;
use crate::config::ExtractionConfig;
use crate::normalize;
use crate::quotes;
use crate::summarize;

/// One article as supplied by the feed/scraping side: whichever content
/// field was available, never guaranteed non-empty.
#[derive(Debug, Clone)]
pub struct ArticleInput {
    pub title: String,
    pub url: String,
    pub raw_html: String,
}

/// The unit returned to the API layer. Exactly one of `quotes` or
/// `summary` is populated, depending on the configured output mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleResult {
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub url: String,
}

/// What the result record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Raw quote list; an article with no quotes keeps an empty list
    /// rather than being dropped.
    Quotes,
    /// Bounded summary with attributed quotes appended when present.
    Summary,
}

/// Runs normalizer, detector and (optionally) attributor over one
/// article's content and assembles the output record. Pure function of the
/// article content; an empty or unparseable body yields an empty quote
/// list or a placeholder summary, never an error.
pub fn process_article(input: &ArticleInput, cfg: &ExtractionConfig) -> ArticleResult {
    let paragraphs = normalize::paragraphs(&input.raw_html);

    match cfg.output() {
        OutputMode::Quotes => {
            let quotes = if cfg.attribute_speakers() {
                attribution::attribute(&speech_paragraphs(&paragraphs, cfg))
                    .into_iter()
                    .map(|sq| format!("{}: {}", sq.speaker, sq.quote))
                    .collect()
            } else {
                quotes::detect(&paragraphs, cfg.mode(), cfg.min_paragraph_len())
            };
            ArticleResult {
                headline: input.title.clone(),
                quotes: Some(quotes),
                summary: None,
                url: input.url.clone(),
            }
        }
        OutputMode::Summary => {
            let full_text = paragraphs.join(" ");
            let mut summary = summarize::summarize(&full_text, cfg.summary_limit());

            let attributed = attribution::attribute(&speech_paragraphs(&paragraphs, cfg));
            if !attributed.is_empty() {
                let joined = attributed
                    .iter()
                    .map(|sq| format!("{} ({})", sq.quote, sq.speaker))
                    .collect::<Vec<_>>()
                    .join("; ");
                summary.push_str(&format!(" Quotes: {joined}"));
            }

            ArticleResult {
                headline: input.title.clone(),
                quotes: None,
                summary: Some(summary),
                url: input.url.clone(),
            }
        }
    }
}

/// The attributor sees the same paragraphs the detector would: noise and
/// promotional/embed fragments are excluded before attribution.
fn speech_paragraphs(paragraphs: &[String], cfg: &ExtractionConfig) -> Vec<String> {
    paragraphs
        .iter()
        .filter(|p| !quotes::is_noise(p, cfg.min_paragraph_len()))
        .cloned()
        .collect()
}

/// Processes a batch sequentially in feed order. One bad article never
/// aborts the rest: `process_article` is total, and content-level problems
/// surface as placeholders.
pub fn process_articles(inputs: &[ArticleInput], cfg: &ExtractionConfig) -> Vec<ArticleResult> {
    inputs
        .iter()
        .map(|article| {
            let result = process_article(article, cfg);
            debug!(
                url = %article.url,
                quotes = result.quotes.as_ref().map(|q| q.len()).unwrap_or(0),
                "processed article"
            );
            result
        })
        .collect()
}
