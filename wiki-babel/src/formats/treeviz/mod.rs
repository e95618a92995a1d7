//! Treeviz formatter for Document trees
//!
//! A visual, line-based rendering of the tree, meant for debugging conversions. One node per
//! line:
//!
//! <prefix><connector> <icon> <label> (label truncated to 30 characters)
//!
//! Example:
//!
//! ```text
//! ⧉ Document (3 blocks)
//! ├─ § h1 Weapons
//! ├─ ☰ 2 items
//! │ ├─ • * Sword
//! │ └─ • *# Long sword
//! └─ ▦ wikitable (2 rows)
//!   ├─ ≡ row 1
//!   │ └─ ▣ ! Name
//!   └─ ≡ row 2
//!     └─ □ | Sword
//! ```
//!
//! Icons
//!     Document: ⧉
//!     Heading: §
//!     Paragraph: ¶
//!     HorizontalRule: ―
//!     Blockquote: ❝
//!     List: ☰
//!     ListItem: •
//!     CodeBlock: 𝒱
//!     Table: ▦
//!     TableRow: ≡
//!     HeaderCell: ▣
//!     DataCell: □
//!   Inlines (shown with `ast-full=true`)
//!     Text: ◦
//!     Bold: 𝐁
//!     Italic: 𝐼
//!     Underline: _
//!     Strike: ~
//!     Code: ƒ
//!     Link: ⊕
//!     Image: ▨
//!     Video: ▶
//!     LineBreak: ↵

use crate::ast::nodes::{plain_text, Block, Document, Inline, TableCell};
use crate::error::FormatError;
use crate::format::Format;
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

struct VizNode {
    icon: &'static str,
    label: String,
    children: Vec<VizNode>,
}

impl VizNode {
    fn leaf(icon: &'static str, label: impl Into<String>) -> Self {
        Self {
            icon,
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn with_children(mut self, children: Vec<VizNode>) -> Self {
        self.children = children;
        self
    }
}

fn block_node(block: &Block, include_inlines: bool) -> VizNode {
    let inlines = |content: &[Inline]| -> Vec<VizNode> {
        if include_inlines {
            content.iter().map(inline_node).collect()
        } else {
            Vec::new()
        }
    };

    match block {
        Block::Heading(heading) => VizNode::leaf(
            "§",
            format!("h{} {}", heading.level, plain_text(&heading.content)),
        )
        .with_children(inlines(&heading.content)),
        Block::Paragraph(paragraph) => {
            VizNode::leaf("¶", plain_text(&paragraph.content))
                .with_children(inlines(&paragraph.content))
        }
        Block::HorizontalRule => VizNode::leaf("―", "rule"),
        Block::Blockquote(quote) => VizNode::leaf("❝", "quote").with_children(
            quote
                .children
                .iter()
                .map(|child| block_node(child, include_inlines))
                .collect(),
        ),
        Block::List(list) => VizNode::leaf("☰", format!("{} items", list.items.len()))
            .with_children(
                list.items
                    .iter()
                    .map(|item| {
                        let markers: String = item.markers.iter().map(|kind| kind.marker()).collect();
                        VizNode::leaf("•", format!("{markers} {}", plain_text(&item.content)))
                        .with_children(inlines(&item.content))
                    })
                    .collect(),
            ),
        Block::CodeBlock(code) => VizNode::leaf(
            "𝒱",
            format!(
                "{} ({} lines)",
                code.language.as_deref().unwrap_or("code"),
                code.raw.lines().count()
            ),
        ),
        Block::Table(table) => VizNode::leaf(
            "▦",
            format!(
                "{} ({} rows)",
                table.class.as_deref().unwrap_or("table"),
                table.rows.len()
            ),
        )
        .with_children(
            table
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| {
                    VizNode::leaf("≡", format!("row {}", index + 1)).with_children(
                        row.cells
                            .iter()
                            .map(|cell| cell_node(cell, include_inlines))
                            .collect(),
                    )
                })
                .collect(),
        ),
    }
}

fn cell_node(cell: &TableCell, include_inlines: bool) -> VizNode {
    let (icon, marker) = if cell.header { ("▣", "!") } else { ("□", "|") };
    let node = VizNode::leaf(icon, format!("{marker} {}", plain_text(&cell.content)));
    if include_inlines {
        node.with_children(cell.content.iter().map(inline_node).collect())
    } else {
        node
    }
}

fn inline_node(inline: &Inline) -> VizNode {
    let nested = |icon: &'static str, children: &[Inline]| {
        VizNode::leaf(icon, plain_text(children))
            .with_children(children.iter().map(inline_node).collect())
    };
    match inline {
        Inline::Text(text) => VizNode::leaf("◦", text.as_str()),
        Inline::Bold(children) => nested("𝐁", children),
        Inline::Italic(children) => nested("𝐼", children),
        Inline::Underline(children) => nested("_", children),
        Inline::Strike(children) => nested("~", children),
        Inline::Code(code) => VizNode::leaf("ƒ", code.as_str()),
        Inline::Link { href, text } => VizNode::leaf("⊕", format!("{text} → {href}")),
        Inline::Image { src, .. } => VizNode::leaf("▨", src.as_str()),
        Inline::Video { src } => VizNode::leaf("▶", src.as_str()),
        Inline::LineBreak => VizNode::leaf("↵", ""),
    }
}

fn truncate(label: &str) -> String {
    let single_line = label.replace('\n', " ");
    if single_line.chars().count() > LABEL_WIDTH {
        let cut: String = single_line.chars().take(LABEL_WIDTH - 1).collect();
        format!("{cut}…")
    } else {
        single_line
    }
}

fn format_nodes(nodes: &[VizNode], prefix: &str, output: &mut String) {
    for (index, node) in nodes.iter().enumerate() {
        let is_last = index == nodes.len() - 1;
        let connector = if is_last { "└─" } else { "├─" };
        let line = format!("{prefix}{connector} {} {}", node.icon, truncate(&node.label));
        output.push_str(line.trim_end());
        output.push('\n');

        let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
        format_nodes(&node.children, &child_prefix, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Convert a document to a treeviz string.
///
/// # Parameters
///
/// - `"ast-full"`: when `"true"`, inline nodes are listed under their block.
pub fn to_treeviz_str_with_params(doc: &Document, params: &HashMap<String, String>) -> String {
    let include_inlines = params
        .get("ast-full")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    let nodes: Vec<VizNode> = doc
        .blocks
        .iter()
        .map(|block| block_node(block, include_inlines))
        .collect();

    let mut output = format!("⧉ Document ({} blocks)\n", doc.blocks.len());
    format_nodes(&nodes, "", &mut output);
    output
}

/// Format implementation for treeviz (serialize only)
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_params(doc, options))
    }
}
