use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::quotes;

/// Speaker used until a reporting pattern has been seen.
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// A quote paired with its best-effort speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerQuote {
    pub speaker: String,
    pub quote: String,
}

/// A capitalized one-or-two-word name immediately followed by a reporting
/// verb. The verb match is case-insensitive, the name is not.
static REPORTING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b([A-Z][A-Za-z'\u{2019}]*(?: [A-Z][A-Za-z'\u{2019}]*)?) (?i:said|stated|confirmed|added|remarked|noted|mentioned|explained|claimed|told)\b",
    )
    .unwrap()
});

/// Walks paragraphs in document order, maintaining a current-speaker cursor.
/// A reporting pattern updates the cursor before quotes in the same sentence
/// are attributed, so a name attaches to the quote it introduces and to every
/// following quote until another name takes over.
///
/// This is a nearest-preceding-named-speaker heuristic, not a guarantee;
/// misattribution on multi-clause prose is expected.
pub fn attribute(paragraphs: &[String]) -> Vec<SpeakerQuote> {
    let mut speaker = UNKNOWN_SPEAKER.to_string();
    let mut out = Vec::new();

    for paragraph in paragraphs {
        for sentence in split_sentences(paragraph) {
            if let Some(caps) = REPORTING.captures(&sentence) {
                speaker = caps[1].to_string();
            }
            for quote in quotes::spans(&sentence) {
                out.push(SpeakerQuote {
                    speaker: speaker.clone(),
                    quote,
                });
            }
        }
    }
    out
}

/// Splits on terminator-plus-space boundaries, allowing one closing quote
/// mark between the terminator and the space so `tough." She` breaks after
/// the quote mark rather than inside the quotation.
///
/// Boundaries inside an open double-quote pair are suppressed, so
/// `"We played. We won."` stays one sentence and its quotation survives
/// span detection intact. Curly singles are not tracked: apostrophes would
/// leave the state permanently open.
fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();

    // Double-quote state after consuming each char.
    let mut open_after = Vec::with_capacity(chars.len());
    let mut curly = false;
    let mut straight = false;
    for &(_, c) in &chars {
        match c {
            '\u{201C}' => curly = true,
            '\u{201D}' => curly = false,
            '"' => straight = !straight,
            _ => {}
        }
        open_after.push(curly || straight);
    }

    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if matches!(chars[i].1, '.' | '!' | '?') {
            let mut j = i + 1;
            if j < chars.len() && matches!(chars[j].1, '"' | '\u{201D}' | '\u{2019}') {
                j += 1;
            }
            let inside_quote = open_after[j - 1];
            if !inside_quote && (j >= chars.len() || chars[j].1.is_whitespace()) {
                let end = chars.get(j).map_or(text.len(), |(off, _)| *off);
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    out.push(sentence.to_string());
                }
                start = end;
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail.to_string());
    }
    out
}
