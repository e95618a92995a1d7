//! Bidirectional WikiText ⇄ HTML conversion for the game wiki
//!
//!     Pages are stored as WikiText and edited in a rich-text editor that speaks HTML. This crate
//!     converts between the two so a page survives the trip editor → storage → editor with its
//!     structure intact.
//!
//! Architecture
//!
//!     Both directions go through a small document tree (./ast/nodes.rs). Each format only has to
//!     map its own syntax to and from that tree; no format ever rewrites another format's text.
//!
//!     This is a pure lib, it powers the wiki-cli but is shell agnostic: no code here prints,
//!     reads env vars or touches the filesystem.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── ast                     # Document tree
//!     ├── common                  # List stack and placeholder arena, shared by formats
//!     ├── formats
//!     │   ├── wikitext            # parser, serializer, inline and table sublanguages
//!     │   ├── html                # html5ever based parser and serializer
//!     │   └── treeviz             # debugging view, serialize only
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # aggregates the per-format dirs
//!     ├── wikitext/
//!     ├── html/
//!     └── roundtrip.rs            # cross-format properties
//!
//! Core Algorithms
//!
//!     Two pieces carry most of the weight:
//!
//!     - The list stack (./common/list_stack.rs). WikiText lists are flat runs of `*`/`#` marker
//!       paths; HTML lists are nested `ul`/`ol` trees. The stack diffs consecutive marker paths into
//!       open/close events by depth on export, and records the enclosing kinds as a path on import.
//!     - Placeholder lifting (./common/placeholders.rs). Tables and fenced code are parsed on their
//!       own and swapped for a token line before the line-oriented block parser runs.
//!
//! Lossy Conversions
//!
//!     WikiText cannot express everything HTML can, so HTML → WikiText → HTML is stable for
//!     editor output but not for arbitrary HTML: unknown tags are stripped, `<h6>` becomes a
//!     paragraph, blockquotes only keep paragraphs and lists.
//!
pub mod ast;
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use ast::nodes::Document;
pub use error::FormatError;
pub use format::Format;
pub use formats::ParseOptions;
pub use registry::FormatRegistry;

use tracing::warn;

/// Convert WikiText to an HTML fragment with the default parse options.
///
/// Empty or whitespace-only input yields an empty string.
pub fn wikitext_to_html(wikitext: &str) -> String {
    wikitext_to_html_with_options(wikitext, &ParseOptions::default())
}

/// Convert WikiText to an HTML fragment.
pub fn wikitext_to_html_with_options(wikitext: &str, options: &ParseOptions) -> String {
    if wikitext.trim().is_empty() {
        return String::new();
    }
    let doc = formats::wikitext::parser::parse_wikitext(wikitext, options);
    match formats::html::serializer::serialize_to_html(&doc) {
        Ok(html) => html,
        Err(err) => {
            warn!(error = %err, "HTML serialization failed");
            String::new()
        }
    }
}

/// Convert an HTML fragment (or document) to WikiText.
///
/// Empty or whitespace-only input yields an empty string.
pub fn html_to_wikitext(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    match formats::html::parser::parse_from_html(html) {
        Ok(doc) => formats::wikitext::serializer::serialize_wikitext(&doc),
        Err(err) => {
            warn!(error = %err, "HTML parsing failed");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_converts_to_empty_output() {
        assert_eq!(wikitext_to_html(""), "");
        assert_eq!(wikitext_to_html("   \n"), "");
        assert_eq!(html_to_wikitext(""), "");
        assert_eq!(html_to_wikitext("\n\t"), "");
    }

    #[test]
    fn options_reach_the_table_parser() {
        let source = "{|\n| Sword\n| 10\n| 3\n|}";
        let options = ParseOptions {
            promote_row_headers: false,
        };
        assert_eq!(
            wikitext_to_html_with_options(source, &options),
            "<table><tr><td>Sword</td><td>10</td><td>3</td></tr></table>"
        );
        assert_eq!(
            wikitext_to_html(source),
            "<table><tr><th>Sword</th><td>10</td><td>3</td></tr></table>"
        );
    }
}
