//! Line classification.
//!
//! Every source line is matched against an ordered list of block-level
//! patterns. The first match wins and `Paragraph` is the fallback, so
//! classification is total.

use std::sync::LazyLock;

use regex::Regex;

static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6}) (.+)$").unwrap());
static UNORDERED_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- (.*)$").unwrap());
static ORDERED_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\. (.*)$").unwrap());
static QUOTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^> ?(.*)$").unwrap());
static FENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```").unwrap());

/// Classification tag of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Empty,
    Heading,
    UnorderedItem,
    OrderedItem,
    Quote,
    Code,
    Paragraph,
}

/// A classified line together with the text its pattern captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Empty,
    Heading { level: u8, title: &'a str },
    UnorderedItem(&'a str),
    OrderedItem(&'a str),
    /// Quoted text, possibly empty (`>` on its own).
    Quote(&'a str),
    /// A line opening with three backticks. Whatever follows them, such as a
    /// language tag or further backticks, is not retained.
    Fence,
    Paragraph(&'a str),
}

impl<'a> Line<'a> {
    /// Classify a line whose trailing newline has already been stripped.
    pub fn parse(line: &'a str) -> Self {
        if line.is_empty() {
            return Line::Empty;
        }
        if let Some(caps) = HEADING_PATTERN.captures(line) {
            let (_, [markers, title]) = caps.extract();
            return Line::Heading {
                level: markers.len() as u8,
                title,
            };
        }
        if let Some(caps) = UNORDERED_ITEM_PATTERN.captures(line) {
            let (_, [text]) = caps.extract();
            return Line::UnorderedItem(text);
        }
        if let Some(caps) = ORDERED_ITEM_PATTERN.captures(line) {
            let (_, [text]) = caps.extract();
            return Line::OrderedItem(text);
        }
        if let Some(caps) = QUOTE_PATTERN.captures(line) {
            let (_, [text]) = caps.extract();
            return Line::Quote(text);
        }
        if FENCE_PATTERN.is_match(line) {
            return Line::Fence;
        }
        Line::Paragraph(line)
    }

    pub fn pattern(&self) -> Pattern {
        match self {
            Line::Empty => Pattern::Empty,
            Line::Heading { .. } => Pattern::Heading,
            Line::UnorderedItem(_) => Pattern::UnorderedItem,
            Line::OrderedItem(_) => Pattern::OrderedItem,
            Line::Quote(_) => Pattern::Quote,
            Line::Fence => Pattern::Code,
            Line::Paragraph(_) => Pattern::Paragraph,
        }
    }
}

/// Classify a line, discarding its captures.
pub fn classify(line: &str) -> Pattern {
    Line::parse(line).pattern()
}
