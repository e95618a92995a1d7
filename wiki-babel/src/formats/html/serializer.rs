//! HTML serialization (Document → HTML)
//!
//! Pipeline: Document → RcDom nodes → HTML fragment
//!
//! Each top-level block becomes one or more DOM subtrees which html5ever serializes
//! (escaping text and attribute values). Subtrees are joined with a newline.

use crate::ast::nodes::{Block, Document, Inline, List, ListKind, Table};
use crate::common::list_stack::{ListStack, ListTransition};
use crate::error::FormatError;
use html5ever::{
    namespace_url, ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Serialize a Document to an HTML fragment.
pub fn serialize_to_html(doc: &Document) -> Result<String, FormatError> {
    let mut parts = Vec::new();
    for block in &doc.blocks {
        for node in build_block(block) {
            parts.push(serialize_node(&node)?);
        }
    }
    Ok(parts.join("\n"))
}

fn build_block(block: &Block) -> Vec<Handle> {
    match block {
        Block::Heading(heading) => {
            let tag = format!("h{}", heading.level.clamp(1, 5));
            let element = create_element(&tag, vec![]);
            append_inlines(&element, &heading.content);
            vec![element]
        }
        Block::HorizontalRule => vec![create_element("hr", vec![])],
        Block::Paragraph(paragraph) => {
            let element = create_element("p", vec![]);
            append_inlines(&element, &paragraph.content);
            vec![element]
        }
        Block::Blockquote(quote) => {
            let element = create_element("blockquote", vec![]);
            for child in &quote.children {
                for node in build_block(child) {
                    append(&element, node);
                }
            }
            vec![element]
        }
        Block::List(list) => build_list(list),
        Block::CodeBlock(code) => {
            let class = code.language.as_ref().map(|lang| format!("language-{lang}"));
            let attrs = class
                .as_deref()
                .map(|class| vec![("class", class)])
                .unwrap_or_default();
            let pre = create_element("pre", vec![]);
            let inner = create_element("code", attrs);
            append(&inner, create_text(&code.raw));
            append(&pre, inner);
            vec![pre]
        }
        Block::Table(table) => vec![build_table(table)],
    }
}

/// Nested lists are emitted as direct children of the parent list, next to the `li` elements.
fn build_list(list: &List) -> Vec<Handle> {
    let mut roots = Vec::new();
    let mut open: Vec<Handle> = Vec::new();
    let mut stack = ListStack::new();

    for item in &list.items {
        let path = if item.markers.is_empty() {
            vec![ListKind::Unordered]
        } else {
            item.markers.clone()
        };

        for transition in stack.sync(&path) {
            match transition {
                ListTransition::Close(_) => {
                    open.pop();
                }
                ListTransition::Open(kind) => {
                    let element = create_element(kind.tag(), vec![]);
                    match open.last() {
                        Some(parent) => append(parent, element.clone()),
                        None => roots.push(element.clone()),
                    }
                    open.push(element);
                }
            }
        }

        let li = create_element("li", vec![]);
        append_inlines(&li, &item.content);
        if let Some(parent) = open.last() {
            append(parent, li);
        }
    }

    roots
}

fn build_table(table: &Table) -> Handle {
    let attrs = table
        .class
        .as_deref()
        .map(|class| vec![("class", class)])
        .unwrap_or_default();
    let element = create_element("table", attrs);

    for row in &table.rows {
        let tr = create_element("tr", vec![]);
        for cell in &row.cells {
            let td = create_element(if cell.header { "th" } else { "td" }, vec![]);
            append_inlines(&td, &cell.content);
            append(&tr, td);
        }
        append(&element, tr);
    }

    element
}

fn append_inlines(parent: &Handle, content: &[Inline]) {
    for inline in content {
        append(parent, build_inline(inline));
    }
}

fn build_inline(inline: &Inline) -> Handle {
    match inline {
        Inline::Text(text) => create_text(text),
        Inline::Bold(children) => wrap_inlines("strong", children),
        Inline::Italic(children) => wrap_inlines("em", children),
        Inline::Underline(children) => wrap_inlines("u", children),
        Inline::Strike(children) => wrap_inlines("s", children),
        Inline::Code(code) => {
            let element = create_element("code", vec![]);
            append(&element, create_text(code));
            element
        }
        Inline::Link { href, text } => {
            let element = create_element("a", vec![("href", href.as_str())]);
            append(&element, create_text(text));
            element
        }
        Inline::Image { src, alt } => {
            create_element("img", vec![("src", src.as_str()), ("alt", alt.as_str())])
        }
        Inline::Video { src } => {
            create_element("iframe", vec![("src", src.as_str()), ("allowfullscreen", "")])
        }
        Inline::LineBreak => create_element("br", vec![]),
    }
}

fn wrap_inlines(tag: &str, children: &[Inline]) -> Handle {
    let element = create_element(tag, vec![]);
    append_inlines(&element, children);
    element
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize one subtree, the node itself included.
fn serialize_node(node: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| FormatError::SerializationError(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}
