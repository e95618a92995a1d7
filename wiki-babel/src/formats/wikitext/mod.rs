//! WikiText format implementation
//!
//! The game wiki's markup dialect. It is a MediaWiki subset with a few local extensions
//! (fenced code, `[[Video:…]]`, `__underline__`, `~~strike~~`).
//!
//! # Element Mapping Table
//!
//! | WikiText                          | Document node             | Notes                                  |
//! |-----------------------------------|---------------------------|----------------------------------------|
//! | `== t ==` … `====== t ======`     | `Heading` level 1 to 5    | Delimiter runs must match              |
//! | `----`                            | `HorizontalRule`          | Four or more dashes                    |
//! | `> text`                          | `Blockquote` > `Paragraph`| Consecutive lines share one quote      |
//! | list lines right after `> text`   | `Blockquote` > `List`     | The list stays inside the quote        |
//! | `*`, `##`, `*#` …                 | `List` > `ListItem`       | Depth = run length; new levels take    |
//! |                                   |                           | the kind of their marker               |
//! | ```` ```lang … ``` ````           | `CodeBlock`               | Body is opaque                         |
//! | `{\| … \|}`                       | `Table`                   | See [`table`] for the row heuristic    |
//! | anything else                     | `Paragraph`               | One paragraph per line                 |
//!
//! Inline markup is documented in [`inline`].
//!
//! # Parsing Strategy
//!
//! Tables and code blocks are their own little languages and contain lines that would
//! otherwise match block rules. They are parsed first and replaced by placeholder lines
//! (see [`crate::common::placeholders`]); then a line state machine builds the remaining
//! blocks. See [`parser`].
//!
//! # Lossy Conversions
//!
//! - Blockquotes hold paragraphs and lists; any other block inside a quote is flattened
//! - A list item is written as its innermost kind's marker repeated once per level, so `*#`
//!   comes back as `##`. A marker whose level is already open does not change that level's kind
//! - Line breaks inside list items and table cells cannot be written and become spaces
//!   or separate lines
//! - Table attributes other than `class` are dropped

pub mod inline;
pub mod parser;
pub mod serializer;
pub mod table;

use crate::ast::nodes::Document;
use crate::error::FormatError;
use crate::format::Format;
use std::collections::HashMap;

pub use parser::ParseOptions;

/// Format implementation for WikiText
#[derive(Debug, Default, Clone)]
pub struct WikiTextFormat {
    options: ParseOptions,
}

impl WikiTextFormat {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl Format for WikiTextFormat {
    fn name(&self) -> &str {
        "wikitext"
    }

    fn description(&self) -> &str {
        "Game wiki markup (MediaWiki subset)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["wiki", "wikitext"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_wikitext(source, &self.options))
    }

    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<Document, FormatError> {
        let mut parse_options = self.options;
        for (key, value) in options {
            match key.as_str() {
                "promote-row-headers" => {
                    parse_options.promote_row_headers = parse_flag(key, value)?;
                }
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'wikitext' does not support parameter '{other}'"
                    )))
                }
            }
        }
        Ok(parser::parse_wikitext(source, &parse_options))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_wikitext(doc))
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, FormatError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(FormatError::ParseError(format!(
            "Invalid boolean '{value}' for parameter '{key}'"
        ))),
    }
}
