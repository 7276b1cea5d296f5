//! Inline span rewriting.
//!
//! Spans are rewritten by five passes in a fixed order: bold, italic, link,
//! image, inline code. Each pass sees the output of the previous one and never
//! re-scans the markup it inserted itself. There is no escaping, so
//! overlapping spans resolve however the pass order leaves them.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+[^*]*[^*]|[^*])\*\*").unwrap());
static ITALIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_]+[^_]*[^_]|[^_])_").unwrap());
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());
static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());
static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+[^`]*[^`]|[^`])`").unwrap());

/// Rewrite the inline markup of one line into HTML.
pub fn transform_inline(text: &str) -> String {
    let text = BOLD_PATTERN.replace_all(text, "<b>${1}</b>");
    let text = ITALIC_PATTERN.replace_all(&text, "<i>${1}</i>");
    let text = replace_links(&text);
    let text = IMAGE_PATTERN.replace_all(&text, r#"<img src="${2}" alt="${1}" />"#);
    CODE_PATTERN
        .replace_all(&text, "<code>${1}</code>")
        .into_owned()
}

/// Rewrite `[label](url)` spans that are not part of an image.
///
/// A candidate preceded by `!` is skipped and the search resumes one byte
/// past its opening bracket, so a later bracket inside it can still match.
fn replace_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut search_from = 0;

    while let Some(caps) = LINK_PATTERN.captures_at(text, search_from) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        if text[..whole.start()].ends_with('!') {
            search_from = whole.start() + 1;
            continue;
        }
        let (_, [label, url]) = caps.extract();
        out.push_str(&text[last..whole.start()]);
        out.push_str(&format!(r#"<a href="{url}">{label}</a>"#));
        last = whole.end();
        search_from = last;
    }

    out.push_str(&text[last..]);
    out
}
