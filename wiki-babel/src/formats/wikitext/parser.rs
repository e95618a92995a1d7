//! WikiText parsing (WikiText → Document)
//!
//! Pipeline: WikiText string → block extraction (code, tables) → line state machine → Document
//!
//! The line state machine keeps an open list run and an open blockquote. A list opened while
//! a blockquote is open belongs to the blockquote. Rules are tried top to bottom for each line:
//!
//! 1. blank line: close the list and the blockquote
//! 2. placeholder line: close both, then emit the lifted block
//! 3. `== t ==` … `====== t ======`: heading 1 to 5
//! 4. `----` (four or more dashes): horizontal rule
//! 5. `> text`: close the list, add a paragraph to the open (or a new) blockquote
//! 6. `*`/`#` marker run + whitespace: list item, depth = run length
//! 7. anything else: paragraph
//!
//! End of input closes whatever is still open.

use super::inline::parse_inline;
use super::table::parse_table;
use crate::ast::nodes::{
    Block, Blockquote, CodeBlock, Document, Heading, List, ListItem, ListKind, Paragraph,
};
use crate::common::placeholders::{lift, PlaceholderKind, Placeholders};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:([\w+.#-]+)?[ \t]*\n)?(.*?)```").expect("valid code fence regex")
});
static TABLE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^[ \t]*\{\|(.*?)^[ \t]*\|\}").expect("valid table block regex")
});
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(={2,6})\s*(.+?)\s*(={2,6})$").expect("valid heading regex"));
static RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{4,}$").expect("valid rule regex"));
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([*#]+)\s(.*)$").expect("valid list item regex"));

/// Knobs for WikiText parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Apply the table row-header heuristic.
    pub promote_row_headers: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            promote_row_headers: true,
        }
    }
}

/// Parse a WikiText string into a Document.
pub fn parse_wikitext(source: &str, options: &ParseOptions) -> Document {
    if source.trim().is_empty() {
        return Document::default();
    }

    let source = source.replace("\r\n", "\n");
    let (text, placeholders) = extract_blocks(&source, options);
    if !placeholders.is_empty() {
        debug!(lifted = placeholders.len(), "lifted tables and code blocks");
    }

    let mut builder = BlockBuilder::default();
    for line in text.lines() {
        builder.line(line, &placeholders);
    }
    builder.finish()
}

/// Lift fenced code first, then tables, so table syntax inside code stays opaque.
fn extract_blocks(source: &str, options: &ParseOptions) -> (String, Placeholders) {
    let mut placeholders = Placeholders::new();

    let text = lift(
        source,
        &CODE_FENCE,
        PlaceholderKind::CodeBlock,
        &mut placeholders,
        |caps| {
            let language = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .filter(|lang| !lang.is_empty());
            let raw = caps.get(2).map_or("", |m| m.as_str());
            Block::CodeBlock(CodeBlock {
                language,
                raw: raw.strip_suffix('\n').unwrap_or(raw).to_string(),
            })
        },
    );

    let promote = options.promote_row_headers;
    let text = lift(
        &text,
        &TABLE_BLOCK,
        PlaceholderKind::Table,
        &mut placeholders,
        |caps| Block::Table(parse_table(&caps[1], promote)),
    );

    (text, placeholders)
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    list: Option<List>,
    quote: Option<Blockquote>,
}

impl BlockBuilder {
    fn line(&mut self, line: &str, placeholders: &Placeholders) {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            self.close();
            return;
        }

        if let Some(block) = placeholders.resolve(trimmed) {
            self.push(block.clone());
            return;
        }

        if let Some(heading) = parse_heading(trimmed) {
            self.push(Block::Heading(heading));
            return;
        }

        if RULE.is_match(trimmed) {
            self.push(Block::HorizontalRule);
            return;
        }

        if let Some(rest) = line.trim_start().strip_prefix("> ") {
            self.close_list();
            let paragraph = Block::Paragraph(Paragraph {
                content: parse_inline(rest.trim()),
            });
            self.quote
                .get_or_insert_with(|| Blockquote {
                    children: Vec::new(),
                })
                .children
                .push(paragraph);
            return;
        }

        if let Some(caps) = LIST_ITEM.captures(trimmed) {
            let markers = caps[1].chars().filter_map(ListKind::from_marker).collect();
            let item = ListItem {
                markers,
                content: parse_inline(caps[2].trim()),
            };
            self.list
                .get_or_insert_with(|| List { items: Vec::new() })
                .items
                .push(item);
            return;
        }

        if trimmed.starts_with("{|") {
            debug!("table start without terminator, treating lines as text");
        }

        self.push(Block::Paragraph(Paragraph {
            content: parse_inline(trimmed),
        }));
    }

    /// Close the open container, then append `block`.
    fn push(&mut self, block: Block) {
        self.close();
        self.blocks.push(block);
    }

    fn close(&mut self) {
        self.close_list();
        self.close_quote();
    }

    fn close_list(&mut self) {
        if let Some(list) = self.list.take() {
            match self.quote.as_mut() {
                Some(quote) => quote.children.push(Block::List(list)),
                None => self.blocks.push(Block::List(list)),
            }
        }
    }

    fn close_quote(&mut self) {
        if let Some(quote) = self.quote.take() {
            self.blocks.push(Block::Blockquote(quote));
        }
    }

    fn finish(mut self) -> Document {
        self.close();
        Document::new(self.blocks)
    }
}

/// `== t ==` is level 1, `====== t ======` level 5. Delimiter runs must match exactly, so a
/// longer run such as `=======` is not a heading.
fn parse_heading(line: &str) -> Option<Heading> {
    let caps = HEADING.captures(line)?;
    let (open, close) = (caps.get(1)?, caps.get(3)?);
    if open.len() != close.len()
        || line[open.end()..].starts_with('=')
        || line[..close.start()].ends_with('=')
    {
        return None;
    }
    Some(Heading {
        level: open.len() - 1,
        content: parse_inline(&caps[2]),
    })
}
