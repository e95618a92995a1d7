//! HTML format implementation
//!
//! Bidirectional conversion between the Document tree and the HTML fragments produced and
//! consumed by the wiki's rich-text editor.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` pair for both directions:
//! - `html5ever`: browser-grade HTML5 parser and serializer from the Servo project
//! - `markup5ever_rcdom`: reference-counted DOM tree
//!
//! Parsing through a real tree builder means malformed editor output (unclosed `<p>`,
//! stray `<li>`, `<b>` instead of `<strong>`) is normalized the same way a browser would.
//!
//! # Element Mapping Table
//!
//! | Document node   | HTML export                               | Import also accepts                |
//! |-----------------|-------------------------------------------|------------------------------------|
//! | Heading 1-5     | `<h1>` … `<h5>`                           | `<h6>` becomes a paragraph         |
//! | Paragraph       | `<p>`                                     | bare text and inline runs          |
//! | HorizontalRule  | `<hr>`                                    |                                    |
//! | Blockquote      | `<blockquote>`                            |                                    |
//! | List            | `<ul>`/`<ol>`, nested lists beside `<li>` | nested lists inside `<li>`         |
//! | CodeBlock       | `<pre><code class="language-x">`          |                                    |
//! | Table           | `<table class>` > `<tr>` > `<th>`/`<td>`  | `<thead>`/`<tbody>`/`<tfoot>`      |
//! | Bold            | `<strong>`                                | `<b>`                              |
//! | Italic          | `<em>`                                    | `<i>`                              |
//! | Underline       | `<u>`                                     | `<ins>`                            |
//! | Strike          | `<s>`                                     | `<strike>`, `<del>`                |
//! | Code            | `<code>`                                  |                                    |
//! | Link            | `<a href>`                                |                                    |
//! | Image           | `<img src alt>`                           |                                    |
//! | Video           | `<iframe src allowfullscreen>`            | `<video src>`                      |
//! | LineBreak       | `<br>`                                    |                                    |
//!
//! Any other tag is stripped and its text kept.
//!
//! # Output Format
//!
//! Export produces a fragment, not a full document: one line per top-level element, no
//! `<html>`/`<body>` wrapper, no `<tbody>`.

pub mod parser;
pub mod serializer;

use crate::ast::nodes::Document;
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for HTML fragments
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment as produced by the rich-text editor"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_html(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_html(doc)
    }
}
