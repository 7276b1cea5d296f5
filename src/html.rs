use crate::block::{Block, BlockKind};

/// Convert blocks to an HTML fragment, newline-separated in document order.
pub fn blocks_to_html(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Raw text of the first level-1 heading, trimmed.
pub fn document_title(blocks: &[Block]) -> Option<String> {
    blocks
        .iter()
        .find(|block| block.kind == BlockKind::Heading && block.level == Some(1))
        .and_then(|block| block.content.first())
        .map(|title| title.trim().to_owned())
}

impl Block {
    /// Render to HTML. A block with no content renders to nothing.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.is_empty() {
            emit_block(self, &mut out);
        }
        out
    }
}

fn emit_block(block: &Block, out: &mut String) {
    match block.kind {
        BlockKind::Heading => {
            let level = block.level.unwrap_or(1);
            out.push_str(&format!("<h{level}>"));
            out.push_str(&block.content.join(" "));
            out.push_str(&format!("</h{level}>"));
        }
        BlockKind::UnorderedList => emit_list("ul", &block.content, out),
        BlockKind::OrderedList => emit_list("ol", &block.content, out),
        BlockKind::Quote => emit_lines("quote", &block.content, out),
        BlockKind::Code => emit_lines("code", &block.content, out),
        BlockKind::Paragraph => {
            out.push_str("<p>\n");
            out.push_str(&block.content.join(" "));
            out.push_str("\n</p>");
        }
    }
}

fn emit_list(tag: &str, items: &[String], out: &mut String) {
    out.push_str(&format!("<{tag}>\n"));
    let items: Vec<String> = items
        .iter()
        .map(|item| format!("\t<li>{item}</li>"))
        .collect();
    out.push_str(&items.join("\n"));
    out.push_str(&format!("\n</{tag}>"));
}

fn emit_lines(tag: &str, lines: &[String], out: &mut String) {
    out.push_str(&format!("<{tag}>\n"));
    out.push_str(&lines.join("<br>\n"));
    out.push_str(&format!("\n</{tag}>"));
}

#[cfg(test)]
mod tests {
    use crate::markdown_to_html;
    use pretty_assertions::assert_eq;

    fn html(markdown: &str) -> String {
        markdown_to_html(markdown).html
    }

    #[test]
    fn heading() {
        assert_eq!(html("# Hello"), "<h1>Hello</h1>");
        assert_eq!(html("#### Four"), "<h4>Four</h4>");
    }

    #[test]
    fn heading_is_not_inline_transformed() {
        assert_eq!(html("## **raw**"), "<h2>**raw**</h2>");
    }

    #[test]
    fn paragraph_lines_join_with_space() {
        assert_eq!(
            html("first line\nsecond **line**"),
            "<p>\nfirst line second <b>line</b>\n</p>"
        );
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            html("- one\n- two"),
            "<ul>\n\t<li>one</li>\n\t<li>two</li>\n</ul>"
        );
    }

    #[test]
    fn ordered_list() {
        assert_eq!(
            html("1. one\n5. two\n3. three"),
            "<ol>\n\t<li>one</li>\n\t<li>two</li>\n\t<li>three</li>\n</ol>"
        );
    }

    #[test]
    fn quote() {
        assert_eq!(
            html("> first\n> `second`"),
            "<quote>\nfirst<br>\n<code>second</code>\n</quote>"
        );
    }

    #[test]
    fn code_block() {
        assert_eq!(
            html("```\nline one\n\nline two\n```\n"),
            "<code>\nline one<br>\n<br>\nline two\n</code>"
        );
    }

    #[test]
    fn code_block_keeps_markup_literal() {
        assert_eq!(
            html("```rust\nlet s = \"**not bold**\";\n```"),
            "<code>\nlet s = \"**not bold**\";\n</code>"
        );
    }

    #[test]
    fn four_backtick_fence() {
        assert_eq!(
            html("````\nlet **x** = 1;\n````"),
            "<code>\nlet **x** = 1;\n</code>"
        );
    }

    #[test]
    fn blocks_join_with_newline() {
        assert_eq!(
            html("# Hi\n\nSome **bold** and _italic_ text.\n"),
            "<h1>Hi</h1>\n<p>\nSome <b>bold</b> and <i>italic</i> text.\n</p>"
        );
    }

    #[test]
    fn link_and_image_paragraphs() {
        assert_eq!(
            html("[text](http://x)\n\n![alt](http://y)\n"),
            "<p>\n<a href=\"http://x\">text</a>\n</p>\n<p>\n<img src=\"http://y\" alt=\"alt\" />\n</p>"
        );
    }

    #[test]
    fn empty_block_renders_nothing() {
        let block = crate::Block::new(crate::BlockKind::Paragraph);
        assert_eq!(block.render(), "");
    }

    #[test]
    fn title_is_first_level_one_heading() {
        let page = markdown_to_html("## Sub\n\n#  Main  \n\n# Second\n");
        assert_eq!(page.title.as_deref(), Some("Main"));
    }

    #[test]
    fn no_title_without_level_one_heading() {
        assert_eq!(markdown_to_html("## Sub\n\ntext").title, None);
    }
}
