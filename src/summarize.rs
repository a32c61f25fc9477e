use tracing::warn;

use crate::error::{PressboxError, Result};

/// Returned to callers when there is nothing to summarize.
pub const PLACEHOLDER: &str = "Summary not available.";

/// Default character budget for article summaries.
pub const DEFAULT_LIMIT: usize = 300;

/// Below this, the greedy sentence accumulation is considered too thin
/// (a single sentence alone exceeded the budget) and we hard-truncate.
const GREEDY_FLOOR: usize = 100;

/// Reduces article text to a bounded-length summary. Never fails: empty
/// input logs and yields a fixed placeholder string.
pub fn summarize(text: &str, limit: usize) -> String {
    match try_summarize(text, limit) {
        Ok(summary) => summary,
        Err(e) => {
            warn!("summarize: {}", e);
            PLACEHOLDER.to_string()
        }
    }
}

/// Greedily accumulates whole sentences under the character budget.
/// Text already within the budget is returned unchanged.
pub fn try_summarize(text: &str, limit: usize) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PressboxError::Summarization("empty input".into()));
    }
    if text.chars().count() <= limit {
        return Ok(text.to_string());
    }

    let mut summary = String::new();
    let mut used = 0;
    for sentence in text.split_inclusive(". ") {
        let len = sentence.chars().count();
        if used + len > limit {
            break;
        }
        summary.push_str(sentence);
        used += len;
    }
    let summary = summary.trim_end().to_string();

    if summary.chars().count() >= GREEDY_FLOOR {
        Ok(summary)
    } else {
        // One sentence alone blew the budget; truncate mid-sentence.
        Ok(format!("{}...", truncate_chars(text, limit)))
    }
}

fn truncate_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
