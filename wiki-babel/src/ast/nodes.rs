//! Core data structures for the document tree.

use serde::Serialize;

/// The root of a document: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// A top-level structural unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading(Heading),
    HorizontalRule,
    Blockquote(Blockquote),
    List(List),
    CodeBlock(CodeBlock),
    Table(Table),
    Paragraph(Paragraph),
}

/// A heading, level 1 to 5.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: usize,
    pub content: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Blockquote {
    pub children: Vec<Block>,
}

/// A contiguous run of list items.
///
/// Items are kept flat. Nesting is carried by each item's marker path, which the
/// [`ListStack`](crate::common::list_stack::ListStack) turns back into open/close events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub items: Vec<ListItem>,
}

impl List {
    /// Whether the outermost level of the list is ordered.
    pub fn ordered(&self) -> bool {
        self.items
            .first()
            .and_then(|item| item.markers.first())
            .is_some_and(|kind| *kind == ListKind::Ordered)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    /// Kind of every enclosing level, outermost first.
    pub markers: Vec<ListKind>,
    pub content: Vec<Inline>,
}

impl ListItem {
    /// 1-based nesting depth.
    pub fn depth(&self) -> usize {
        self.markers.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '*' => Some(ListKind::Unordered),
            '#' => Some(ListKind::Ordered),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            ListKind::Unordered => '*',
            ListKind::Ordered => '#',
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// Fenced code. The content is opaque and never inline-formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub class: Option<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub header: bool,
    /// Written in the explicit `| | content` form, exempt from row-header promotion.
    pub explicit: bool,
    pub content: Vec<Inline>,
}

impl TableCell {
    pub fn header(content: Vec<Inline>) -> Self {
        Self {
            header: true,
            explicit: false,
            content,
        }
    }

    pub fn data(content: Vec<Inline>) -> Self {
        Self {
            header: false,
            explicit: false,
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub content: Vec<Inline>,
}

/// Span-level content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Underline(Vec<Inline>),
    Strike(Vec<Inline>),
    Code(String),
    Link { href: String, text: String },
    Image { src: String, alt: String },
    Video { src: String },
    LineBreak,
}

impl Inline {
    pub fn text(value: impl Into<String>) -> Self {
        Inline::Text(value.into())
    }
}

/// Concatenated plain text of a run of inlines, markup dropped.
pub fn plain_text(content: &[Inline]) -> String {
    let mut out = String::new();
    for inline in content {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Bold(children)
            | Inline::Italic(children)
            | Inline::Underline(children)
            | Inline::Strike(children) => out.push_str(&plain_text(children)),
            Inline::Link { text, .. } => out.push_str(text),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::Video { src } => out.push_str(src),
            Inline::LineBreak => out.push(' '),
        }
    }
    out
}
