//! HTML parsing (HTML → Document)
//!
//! Pipeline: HTML string → html5ever RcDom → recursive walk of `<body>` → Document
//!
//! The walk has two modes. In block mode each element maps to a block; inline content found
//! directly in a container (bare text, `<strong>` outside any `<p>`) is gathered into an
//! implicit paragraph. In inline mode elements map to [`Inline`] nodes and unknown tags are
//! stripped, keeping their text.
//!
//! Lists keep a [`ListStack`] of the enclosing `ul`/`ol` kinds; every `li` records the
//! stack as its marker path, so nested and mixed lists flatten into a single [`List`].
//!
//! The walk carries its element depth. Below [`MAX_DEPTH`] a subtree is flattened to its
//! text, which is gathered with an explicit stack, so hostile nesting cannot overflow.

use crate::ast::nodes::{
    plain_text, Block, Blockquote, CodeBlock, Document, Heading, Inline, List, ListItem,
    ListKind, Paragraph, Table, TableCell, TableRow,
};
use crate::common::list_stack::ListStack;
use crate::error::FormatError;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::{debug, trace};

/// Nesting below this depth is flattened to plain text.
pub const MAX_DEPTH: usize = 200;

/// Parse an HTML document or fragment into a Document.
pub fn parse_from_html(source: &str) -> Result<Document, FormatError> {
    let dom = parse_document(RcDom::default(), Default::default()).one(source);
    let root = find_element(&dom.document, "body").unwrap_or_else(|| dom.document.clone());
    Ok(Document::new(walk_blocks(&root, 0)))
}

/// Block-level output plus the inline run that will become an implicit paragraph.
#[derive(Default)]
struct Blocks {
    out: Vec<Block>,
    pending: Vec<Inline>,
}

impl Blocks {
    fn push(&mut self, block: Block) {
        self.flush();
        self.out.push(block);
    }

    fn flush(&mut self) {
        let content = trim_inlines(std::mem::take(&mut self.pending));
        if !content.is_empty() {
            self.out.push(Block::Paragraph(Paragraph { content }));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.out
    }
}

fn walk_blocks(parent: &Handle, depth: usize) -> Vec<Block> {
    let mut blocks = Blocks::default();
    for child in parent.children.borrow().iter() {
        walk_block(child, &mut blocks, depth + 1);
    }
    blocks.finish()
}

fn walk_block(node: &Handle, blocks: &mut Blocks, depth: usize) {
    let tag = match &node.data {
        NodeData::Text { contents } => {
            blocks.pending.push(Inline::Text(normalize_text(&contents.borrow())));
            return;
        }
        NodeData::Element { name, .. } => name.local.as_ref().to_ascii_lowercase(),
        _ => return,
    };

    if depth >= MAX_DEPTH {
        debug!(tag = %tag, depth, "flattening deeply nested block");
        blocks.pending.push(Inline::Text(text_content(node)));
        return;
    }

    match tag.as_str() {
        "p" => {
            let content = trim_inlines(collect_inlines(node, depth));
            if content.is_empty() {
                blocks.flush();
            } else {
                blocks.push(Block::Paragraph(Paragraph { content }));
            }
        }
        "h1" | "h2" | "h3" | "h4" | "h5" => {
            let level = usize::from(tag.as_bytes()[1] - b'0');
            blocks.push(Block::Heading(Heading {
                level,
                content: trim_inlines(collect_inlines(node, depth)),
            }));
        }
        "h6" => {
            let content = trim_inlines(collect_inlines(node, depth));
            if !content.is_empty() {
                blocks.push(Block::Paragraph(Paragraph { content }));
            }
        }
        "hr" => blocks.push(Block::HorizontalRule),
        "blockquote" => blocks.push(Block::Blockquote(Blockquote {
            children: walk_blocks(node, depth),
        })),
        "ul" | "ol" => {
            let mut items = Vec::new();
            collect_list(node, &mut ListStack::new(), &mut items, depth);
            if items.is_empty() {
                blocks.flush();
            } else {
                blocks.push(Block::List(List { items }));
            }
        }
        "li" => {
            // Stray item outside any list.
            let mut items = Vec::new();
            collect_list_item(node, &mut ListStack::new(), &mut items, depth);
            blocks.push(Block::List(List { items }));
        }
        "pre" => blocks.push(Block::CodeBlock(collect_code(node))),
        "table" => blocks.push(Block::Table(collect_table(node, depth))),
        "head" | "script" | "style" | "template" | "noscript" => {}
        "html" | "body" | "div" | "section" | "article" | "main" | "header" | "footer"
        | "nav" | "aside" | "figure" | "form" => {
            blocks.flush();
            for child in node.children.borrow().iter() {
                walk_block(child, blocks, depth + 1);
            }
            blocks.flush();
        }
        _ => blocks.pending.extend(inline_from_node(node, depth)),
    }
}

/// Walk a `ul`/`ol` and every list nested inside it.
fn collect_list(node: &Handle, stack: &mut ListStack, items: &mut Vec<ListItem>, depth: usize) {
    let kind = match element_name(node).as_deref() {
        Some("ol") => ListKind::Ordered,
        _ => ListKind::Unordered,
    };
    stack.push(kind);

    for child in node.children.borrow().iter() {
        match element_name(child).as_deref() {
            Some("li") => collect_list_item(child, stack, items, depth + 1),
            Some("ul") | Some("ol") if depth + 1 < MAX_DEPTH => {
                collect_list(child, stack, items, depth + 1)
            }
            Some("ul") | Some("ol") => {
                let text = text_content(child);
                if !text.trim().is_empty() {
                    items.push(ListItem {
                        markers: stack.item_path(),
                        content: vec![Inline::Text(text.trim().to_string())],
                    });
                }
            }
            _ => {}
        }
    }

    stack.pop();
}

/// One `li`. Lists nested inside it follow the item itself.
fn collect_list_item(
    node: &Handle,
    stack: &mut ListStack,
    items: &mut Vec<ListItem>,
    depth: usize,
) {
    let mut content = Vec::new();
    let mut nested = Vec::new();

    for child in node.children.borrow().iter() {
        match element_name(child).as_deref() {
            Some("ul") | Some("ol") if depth + 1 < MAX_DEPTH => nested.push(child.clone()),
            Some("p") | Some("div") => {
                let paragraph = trim_inlines(collect_inlines(child, depth + 1));
                if paragraph.is_empty() {
                    continue;
                }
                if !content.is_empty() {
                    content.push(Inline::LineBreak);
                }
                content.extend(paragraph);
            }
            _ => content.extend(inline_from_node(child, depth + 1)),
        }
    }

    items.push(ListItem {
        markers: stack.item_path(),
        content: trim_inlines(content),
    });

    for list in nested {
        collect_list(&list, stack, items, depth + 1);
    }
}

fn collect_code(pre: &Handle) -> CodeBlock {
    let language = pre
        .children
        .borrow()
        .iter()
        .find(|child| element_name(child).as_deref() == Some("code"))
        .and_then(|code| attr(code, "class"))
        .and_then(|class| {
            class
                .split_whitespace()
                .find_map(|name| name.strip_prefix("language-"))
                .map(str::to_string)
        });

    let raw = text_content(pre);
    CodeBlock {
        language,
        raw: raw.trim_end_matches('\n').to_string(),
    }
}

fn collect_table(node: &Handle, depth: usize) -> Table {
    let mut table = Table {
        class: attr(node, "class").filter(|class| !class.trim().is_empty()),
        rows: Vec::new(),
    };
    collect_rows(node, &mut table.rows, depth + 1);
    table
}

/// Rows may sit directly in `table` or inside `thead`/`tbody`/`tfoot`.
fn collect_rows(node: &Handle, rows: &mut Vec<TableRow>, depth: usize) {
    for child in node.children.borrow().iter() {
        match element_name(child).as_deref() {
            Some("tr") => {
                let cells: Vec<TableCell> = child
                    .children
                    .borrow()
                    .iter()
                    .filter_map(|cell| match element_name(cell).as_deref() {
                        Some("th") => Some(TableCell::header(cell_content(cell, depth + 2))),
                        Some("td") => Some(TableCell::data(cell_content(cell, depth + 2))),
                        _ => None,
                    })
                    .collect();
                if !cells.is_empty() {
                    rows.push(TableRow { cells });
                }
            }
            Some("thead") | Some("tbody") | Some("tfoot") if depth + 1 < MAX_DEPTH => {
                collect_rows(child, rows, depth + 1)
            }
            _ => {}
        }
    }
}

/// Cell content; block children are joined with line breaks.
fn cell_content(cell: &Handle, depth: usize) -> Vec<Inline> {
    let mut content = Vec::new();
    for child in cell.children.borrow().iter() {
        match element_name(child).as_deref() {
            Some("p") | Some("div") => {
                let paragraph = trim_inlines(collect_inlines(child, depth + 1));
                if paragraph.is_empty() {
                    continue;
                }
                if !content.is_empty() {
                    content.push(Inline::LineBreak);
                }
                content.extend(paragraph);
            }
            _ => content.extend(inline_from_node(child, depth + 1)),
        }
    }
    trim_inlines(content)
}

fn collect_inlines(node: &Handle, depth: usize) -> Vec<Inline> {
    node.children
        .borrow()
        .iter()
        .flat_map(|child| inline_from_node(child, depth + 1))
        .collect()
}

fn inline_from_node(node: &Handle, depth: usize) -> Vec<Inline> {
    let tag = match &node.data {
        NodeData::Text { contents } => {
            return vec![Inline::Text(normalize_text(&contents.borrow()))];
        }
        NodeData::Element { name, .. } => name.local.as_ref().to_ascii_lowercase(),
        _ => return Vec::new(),
    };

    if depth >= MAX_DEPTH {
        let text = text_content(node);
        return if text.is_empty() {
            Vec::new()
        } else {
            vec![Inline::Text(text)]
        };
    }

    match tag.as_str() {
        "strong" | "b" => emphasis(node, Inline::Bold, depth),
        "em" | "i" => emphasis(node, Inline::Italic, depth),
        "u" | "ins" => emphasis(node, Inline::Underline, depth),
        "s" | "strike" | "del" => emphasis(node, Inline::Strike, depth),
        "code" => {
            let code = text_content(node);
            if code.is_empty() {
                Vec::new()
            } else {
                vec![Inline::Code(code)]
            }
        }
        "a" => match attr(node, "href") {
            Some(href) => vec![Inline::Link {
                href,
                text: text_content(node).trim().to_string(),
            }],
            None => collect_inlines(node, depth),
        },
        "img" => attr(node, "src")
            .map(|src| Inline::Image {
                src,
                alt: attr(node, "alt").unwrap_or_default(),
            })
            .into_iter()
            .collect(),
        "iframe" | "video" => attr(node, "src")
            .map(|src| Inline::Video { src })
            .into_iter()
            .collect(),
        "br" => vec![Inline::LineBreak],
        "script" | "style" | "template" => Vec::new(),
        _ => {
            trace!(tag = %tag, "stripping unsupported tag");
            collect_inlines(node, depth)
        }
    }
}

/// Wrap the children, dropping the wrapper when it has no visible text.
fn emphasis(node: &Handle, wrap: fn(Vec<Inline>) -> Inline, depth: usize) -> Vec<Inline> {
    let children = collect_inlines(node, depth);
    if plain_text(&children).trim().is_empty() {
        children
    } else {
        vec![wrap(children)]
    }
}

/// Drop leading and trailing whitespace and line breaks from a run of inlines.
fn trim_inlines(mut content: Vec<Inline>) -> Vec<Inline> {
    while let Some(first) = content.first_mut() {
        match first {
            Inline::LineBreak => {
                content.remove(0);
            }
            Inline::Text(text) => {
                let trimmed = text.trim_start();
                if trimmed.is_empty() {
                    content.remove(0);
                } else {
                    *text = trimmed.to_string();
                    break;
                }
            }
            _ => break,
        }
    }
    while let Some(last) = content.last_mut() {
        match last {
            Inline::LineBreak => {
                content.pop();
            }
            Inline::Text(text) => {
                let trimmed = text.trim_end();
                if trimmed.is_empty() {
                    content.pop();
                } else {
                    *text = trimmed.to_string();
                    break;
                }
            }
            _ => break,
        }
    }
    content
}

fn normalize_text(text: &str) -> String {
    text.replace('\u{a0}', " ")
}

/// Concatenated text below `node`; `<br>` becomes a newline.
fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    let mut stack = vec![node.clone()];
    while let Some(current) = stack.pop() {
        match &current.data {
            NodeData::Text { contents } => out.push_str(&normalize_text(&contents.borrow())),
            NodeData::Element { name, .. } if name.local.as_ref() == "br" => out.push('\n'),
            _ => stack.extend(current.children.borrow().iter().rev().cloned()),
        }
    }
    out
}

fn element_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref().to_ascii_lowercase()),
        _ => None,
    }
}

fn attr(node: &Handle, key: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == key)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// First element named `tag` in document order.
fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    let mut stack = vec![node.clone()];
    while let Some(current) = stack.pop() {
        if element_name(&current).as_deref() == Some(tag) {
            return Some(current);
        }
        stack.extend(current.children.borrow().iter().rev().cloned());
    }
    None
}
