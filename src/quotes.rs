use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Paragraphs shorter than this are treated as noise.
pub const DEFAULT_MIN_PARAGRAPH_LEN: usize = 10;

/// One recognized quote-mark convention. Opening and closing marks must
/// belong to the same style for a span to be recognized, which keeps a
/// curly-open from pairing with a straight-close on messy pages.
#[derive(Debug, Clone, Copy)]
pub struct QuoteStyle {
    pub open: char,
    pub close: char,
    /// Double-quote styles are the primary signal. Curly singles are a
    /// fallback only: apostrophes in contractions ("it's", "O'Neil")
    /// otherwise produce a high false-positive rate.
    pub primary: bool,
}

/// Recognized quote conventions, checked in order.
pub const QUOTE_STYLES: [QuoteStyle; 3] = [
    QuoteStyle { open: '\u{201C}', close: '\u{201D}', primary: true },
    QuoteStyle { open: '"', close: '"', primary: true },
    QuoteStyle { open: '\u{2018}', close: '\u{2019}', primary: false },
];

/// Promotional and embed fragments (tweet links, @-mentions) carry quote
/// marks but are not quoted speech.
static EMBED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"pic\.twitter\.com/\S+|(?:^|\s)@\w+").unwrap());

/// Extraction granularity, selectable by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Keep whole paragraphs that contain at least one complete quotation.
    Paragraph,
    /// Extract only the inner text between matching quote-mark pairs.
    Span,
}

/// True for paragraphs the extractor must ignore entirely: too short to be
/// real speech, or promotional/embed fragments. Applied before both quote
/// detection and speaker attribution, so an embed paragraph is excluded
/// even when it carries quote marks.
pub fn is_noise(text: &str, min_len: usize) -> bool {
    text.chars().count() < min_len || EMBED.is_match(text)
}

/// Scans normalized paragraphs for quoted speech. Deterministic: the same
/// input always yields the same output, in document order.
pub fn detect(paragraphs: &[String], mode: ExtractionMode, min_len: usize) -> Vec<String> {
    let candidates = paragraphs.iter().filter(|p| !is_noise(p, min_len));

    match mode {
        ExtractionMode::Paragraph => candidates
            .filter(|p| has_complete_quote(p))
            .cloned()
            .collect(),
        ExtractionMode::Span => candidates.flat_map(|p| spans(p)).collect(),
    }
}

/// True when the text contains at least one complete same-style pair.
/// Text carrying only unbalanced double-quote marks is rejected outright
/// rather than falling back to the single-quote style.
pub fn has_complete_quote(text: &str) -> bool {
    let (doubles, singles) = QUOTE_STYLES.split_at(2);
    if doubles.iter().any(|s| contains_mark(text, s)) {
        return doubles.iter().any(|s| complete_pair(text, s));
    }
    singles
        .iter()
        .any(|s| contains_mark(text, s) && complete_pair(text, s))
}

/// Extracts inner quoted substrings from one paragraph, document order.
/// Nested quotes are not de-nested; each top-level pair yields one span.
pub fn spans(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = QUOTE_STYLES
        .iter()
        .filter(|s| s.primary)
        .flat_map(|s| style_spans(text, s))
        .collect();

    if found.is_empty() {
        found = QUOTE_STYLES
            .iter()
            .filter(|s| !s.primary)
            .flat_map(|s| style_spans(text, s))
            .collect();
    }

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, span)| span).collect()
}

fn contains_mark(text: &str, style: &QuoteStyle) -> bool {
    text.contains(style.open) || text.contains(style.close)
}

fn complete_pair(text: &str, style: &QuoteStyle) -> bool {
    if style.open == style.close {
        text.chars().filter(|&c| c == style.open).count() >= 2
    } else {
        match text.find(style.open) {
            Some(i) => text[i + style.open.len_utf8()..].contains(style.close),
            None => false,
        }
    }
}

/// Matched spans for one style, as (byte offset of opening mark, inner text).
fn style_spans(text: &str, style: &QuoteStyle) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut open_at: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if style.open == style.close {
            if c != style.open {
                continue;
            }
            match open_at.take() {
                Some(start) => out.push((start, text[start + c.len_utf8()..i].to_string())),
                None => open_at = Some(i),
            }
        } else if c == style.open {
            if open_at.is_none() {
                open_at = Some(i);
            }
        } else if c == style.close {
            if let Some(start) = open_at.take() {
                out.push((start, text[start + style.open.len_utf8()..i].to_string()));
            }
        }
    }
    out
}
