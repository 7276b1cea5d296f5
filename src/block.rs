use crate::inline::transform_inline;
use crate::line::{Line, Pattern};

/// Kind of a block, decided by the line that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    UnorderedList,
    OrderedList,
    Quote,
    Code,
    Paragraph,
}

impl BlockKind {
    /// Block kind a line of the given pattern opens. Blank lines open nothing.
    pub fn for_pattern(pattern: Pattern) -> Option<Self> {
        match pattern {
            Pattern::Empty => None,
            Pattern::Heading => Some(BlockKind::Heading),
            Pattern::UnorderedItem => Some(BlockKind::UnorderedList),
            Pattern::OrderedItem => Some(BlockKind::OrderedList),
            Pattern::Quote => Some(BlockKind::Quote),
            Pattern::Code => Some(BlockKind::Code),
            Pattern::Paragraph => Some(BlockKind::Paragraph),
        }
    }
}

/// A contiguous run of source lines rendering to one HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Heading level 1-6; `None` for every other kind.
    pub level: Option<u8>,
    /// One entry per ingested line. List, quote and paragraph entries are
    /// already inline-transformed; heading and code entries are raw.
    pub content: Vec<String>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            level: None,
            content: Vec::new(),
        }
    }

    /// Ingest one line.
    ///
    /// `raw` is the full source line, kept verbatim inside code blocks. Only
    /// the parser feeds blocks, and it routes a line to a block only when
    /// `BlockKind::for_pattern` maps the line's pattern to the block's kind.
    pub(crate) fn consume_line(&mut self, raw: &str, line: Line<'_>) {
        match (self.kind, line) {
            (BlockKind::Code, Line::Fence) => {}
            (BlockKind::Code, _) => self.content.push(raw.to_owned()),
            (BlockKind::Heading, Line::Heading { level, title }) => {
                self.level = Some(level);
                self.content.push(title.to_owned());
            }
            (BlockKind::UnorderedList, Line::UnorderedItem(text))
            | (BlockKind::OrderedList, Line::OrderedItem(text))
            | (BlockKind::Quote, Line::Quote(text))
            | (BlockKind::Paragraph, Line::Paragraph(text)) => {
                self.content.push(transform_inline(text));
            }
            _ => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
