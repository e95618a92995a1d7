//! WikiText serialization (Document → WikiText)
//!
//! Blocks are separated by a blank line and the result is trimmed. Inside paragraphs, runs of
//! line breaks collapse to a single blank line; fenced code bodies are written untouched.

use super::inline::{serialize_inline, serialize_inline_flat};
use super::table::serialize_table;
use crate::ast::nodes::{Block, CodeBlock, Document, List};
use crate::common::list_stack::marker_run;
use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid blank line regex"));

/// Serialize a Document to WikiText.
pub fn serialize_wikitext(doc: &Document) -> String {
    serialize_blocks(&doc.blocks, "\n\n").trim().to_string()
}

fn serialize_blocks(blocks: &[Block], separator: &str) -> String {
    blocks
        .iter()
        .map(serialize_block)
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn serialize_block(block: &Block) -> String {
    match block {
        Block::Heading(heading) => {
            let eq = "=".repeat(heading.level.clamp(1, 5) + 1);
            format!("{eq} {} {eq}", serialize_inline_flat(&heading.content).trim())
        }
        Block::HorizontalRule => "----".to_string(),
        Block::Paragraph(paragraph) => BLANK_RUNS
            .replace_all(serialize_inline(&paragraph.content).trim(), "\n\n")
            .into_owned(),
        Block::Blockquote(quote) => serialize_quote(&quote.children),
        Block::List(list) => serialize_list(list),
        Block::CodeBlock(code) => serialize_code(code),
        Block::Table(table) => serialize_table(table),
    }
}

/// Quoted lines get a `"> "` prefix. A list that follows other quoted content is written bare:
/// list lines directly after a quote line stay inside the quote when parsed back.
fn serialize_quote(children: &[Block]) -> String {
    let mut lines = Vec::new();
    for child in children {
        let bare = !lines.is_empty() && matches!(child, Block::List(_));
        let text = serialize_block(child);
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if bare {
                lines.push(line.to_string());
            } else {
                lines.push(format!("> {line}"));
            }
        }
    }
    lines.join("\n")
}

fn serialize_list(list: &List) -> String {
    list.items
        .iter()
        .map(|item| {
            format!(
                "{} {}",
                marker_run(&item.markers),
                serialize_inline(&item.content).trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn serialize_code(code: &CodeBlock) -> String {
    format!(
        "```{}\n{}\n```",
        code.language.as_deref().unwrap_or_default(),
        code.raw.trim_end_matches('\n')
    )
}
