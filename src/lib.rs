mod block;
mod config;
mod html;
mod inline;
mod line;
mod parser;
mod site;

pub use block::{Block, BlockKind};
pub use config::{Config, ConfigError, SiteConfig, TemplateConfig};
pub use inline::transform_inline;
pub use line::{Line, Pattern, classify};
pub use parser::{Transition, step};
pub use site::{BuildError, BuildReport, SiteBuilder, fill_template};

/// A converted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Trimmed text of the first level-1 heading, if any.
    pub title: Option<String>,
    /// Rendered blocks, newline-separated.
    pub html: String,
}

/// Segment lines into blocks.
pub fn parse<I, S>(lines: I) -> Vec<Block>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parser::parse(lines)
}

/// Convert the lines of one document to HTML.
pub fn process<I, S>(lines: I) -> Page
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let blocks = parse(lines);
    Page {
        title: html::document_title(&blocks),
        html: html::blocks_to_html(&blocks),
    }
}

/// Convert markdown text to HTML.
pub fn markdown_to_html(markdown: &str) -> Page {
    process(markdown.lines())
}
