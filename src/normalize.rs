use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Extracts the text of each `<p>` element from an HTML fragment and
/// normalizes it. Falls back to the whole fragment's text when the markup
/// carries no paragraph elements (plain-text descriptions in some feeds).
///
/// html5ever decodes named and numeric entities during parsing, so
/// `&#8220;` and `&quot;` arrive here as real quote characters.
pub fn paragraphs(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let mut out: Vec<String> = fragment
        .select(&PARAGRAPH)
        .map(|el| normalize(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|t| !t.is_empty())
        .collect();

    if out.is_empty() {
        let text = normalize(&fragment.root_element().text().collect::<Vec<_>>().join(" "));
        if !text.is_empty() {
            out.push(text);
        }
    }
    out
}

/// Collapses whitespace runs to single spaces, trims, and drops
/// pictographic glyphs. Punctuation and accented letters pass through.
pub fn normalize(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !is_pictographic(*c)).collect();
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Emoji and decorative symbol ranges stripped from article text.
/// Smart quotes (U+2018..U+201D) are well below these ranges and survive.
fn is_pictographic(c: char) -> bool {
    matches!(
        u32::from(c),
        0x2600..=0x26FF      // miscellaneous symbols
        | 0x2700..=0x27BF    // dingbats
        | 0xFE0F             // variation selector-16
        | 0x1F1E6..=0x1F1FF  // regional indicators (flags)
        | 0x1F300..=0x1F5FF  // symbols & pictographs
        | 0x1F600..=0x1F64F  // emoticons
        | 0x1F680..=0x1F6FF  // transport & map symbols
        | 0x1F900..=0x1F9FF  // supplemental symbols
        | 0x1FA70..=0x1FAFF  // symbols extended-A
    )
}
