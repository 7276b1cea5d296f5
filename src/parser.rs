use crate::block::{Block, BlockKind};
use crate::line::{Line, Pattern};

/// What happens to the block in progress when a line of some pattern arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The line belongs to the current block.
    Extend,
    /// Finalize the current block (if any) and open a new one with this line.
    Start(BlockKind),
    /// Finalize the current block. The line itself is not consumed.
    Close,
    /// Nothing is open and the line opens nothing.
    Swallow,
}

/// Decide the disposition of a line from the current block kind and its pattern.
pub fn step(current: Option<BlockKind>, pattern: Pattern) -> Transition {
    let next = BlockKind::for_pattern(pattern);
    let Some(current) = current else {
        return match next {
            Some(kind) => Transition::Start(kind),
            None => Transition::Swallow,
        };
    };

    match (current, next) {
        // Only a fence ends a code block; blank lines are part of it.
        (BlockKind::Code, Some(BlockKind::Code)) => Transition::Close,
        (BlockKind::Code, _) => Transition::Extend,
        (_, None) => Transition::Close,
        // Headings never span more than one line.
        (BlockKind::Heading, Some(kind)) => Transition::Start(kind),
        (current, Some(kind)) if current == kind => Transition::Extend,
        (_, Some(kind)) => Transition::Start(kind),
    }
}

/// Segment lines into blocks.
///
/// Lines may still carry a trailing `\n` or `\r\n`; it is stripped before
/// classification.
pub fn parse<I, S>(lines: I) -> Vec<Block>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = ParseState::default();

    for line in lines {
        state.process_line(line.as_ref());
    }

    state.finish()
}

#[derive(Default)]
struct ParseState {
    // Block being filled, `None` between blocks
    current: Option<Block>,
    blocks: Vec<Block>,
}

impl ParseState {
    fn process_line(&mut self, raw: &str) {
        let raw = raw.strip_suffix('\n').unwrap_or(raw);
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let line = Line::parse(raw);

        match step(self.current_kind(), line.pattern()) {
            Transition::Swallow => {}
            Transition::Close => self.close_block(),
            Transition::Extend => {
                if let Some(block) = self.current.as_mut() {
                    block.consume_line(raw, line);
                }
            }
            Transition::Start(kind) => {
                self.close_block();
                let mut block = Block::new(kind);
                block.consume_line(raw, line);
                self.current = Some(block);
            }
        }
    }

    fn current_kind(&self) -> Option<BlockKind> {
        self.current.as_ref().map(|block| block.kind)
    }

    fn close_block(&mut self) {
        if let Some(block) = self.current.take() {
            if !block.is_empty() {
                self.blocks.push(block);
            }
        }
    }

    /// Close whatever is still open, including an unterminated code block.
    fn finish(mut self) -> Vec<Block> {
        self.close_block();
        self.blocks
    }
}
