//! WikiText tables: `{| … |}` body ⇄ [`Table`].
//!
//! ```text
//! {| class="wikitable"
//! ! Header 1
//! ! Header 2
//! |-
//! | Cell 1
//! | Cell 2
//! |}
//! ```
//!
//! Row-header heuristic: in a row of three or more cells, a leading data cell whose trimmed
//! content is longer than one character renders as a header. A data cell written as
//! `| | content` (MediaWiki's empty attribute segment) is explicitly typed and never promoted.
//! The serializer uses that form whenever the heuristic would otherwise turn a data cell into
//! a header, so HTML → WikiText → HTML keeps every cell's type.

use super::inline::{parse_inline, serialize_inline_flat};
use crate::ast::nodes::{Inline, Table, TableCell, TableRow};
use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"class\s*=\s*"([^"]*)""#).expect("valid class regex"));

/// Minimum cells in a row before its first cell can be promoted.
const ROW_HEADER_MIN_CELLS: usize = 3;

#[derive(Default)]
struct RowBuilder {
    cells: Vec<TableCell>,
    first_len: usize,
}

impl RowBuilder {
    fn push(&mut self, cell: TableCell, raw: &str) {
        if self.cells.is_empty() {
            self.first_len = raw.chars().count();
        }
        self.cells.push(cell);
    }

    fn finish(self, promote_row_headers: bool) -> Option<TableRow> {
        if self.cells.is_empty() {
            return None;
        }
        let mut cells = self.cells;
        if promote_row_headers && promotes(cells.len(), self.first_len) {
            let first = &mut cells[0];
            if !first.header && !first.explicit {
                first.header = true;
            }
        }
        Some(TableRow { cells })
    }
}

fn promotes(cell_count: usize, first_len: usize) -> bool {
    cell_count >= ROW_HEADER_MIN_CELLS && first_len > 1
}

/// Parse the text between `{|` and `|}`.
///
/// The first line is whatever followed `{|` on its line and may carry the `class` attribute.
pub fn parse_table(body: &str, promote_row_headers: bool) -> Table {
    let mut table = Table::default();
    let mut lines = body.lines();

    if let Some(attrs) = lines.next() {
        if let Some(caps) = CLASS_ATTR.captures(attrs) {
            table.class = Some(caps[1].to_string());
        }
    }

    let mut row = RowBuilder::default();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("|-") {
            if let Some(done) = std::mem::take(&mut row).finish(promote_row_headers) {
                table.rows.push(done);
            }
        } else if let Some(rest) = line.strip_prefix('!') {
            let raw = rest.trim();
            row.push(TableCell::header(parse_inline(raw)), raw);
        } else if let Some(rest) = line.strip_prefix('|') {
            match explicit_data(rest) {
                Some(raw) => {
                    let mut cell = TableCell::data(parse_inline(raw));
                    cell.explicit = true;
                    row.push(cell, raw);
                }
                None => {
                    let raw = rest.trim();
                    row.push(TableCell::data(parse_inline(raw)), raw);
                }
            }
        } else if let Some(last) = row.cells.last_mut() {
            // Continuation of the previous cell.
            last.content.push(Inline::LineBreak);
            last.content.extend(parse_inline(line));
        } else {
            row.push(TableCell::data(parse_inline(line)), line);
        }
    }

    if let Some(done) = row.finish(promote_row_headers) {
        table.rows.push(done);
    }
    table
}

/// `| | content` → `content`.
fn explicit_data(rest: &str) -> Option<&str> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    rest.trim_start().strip_prefix('|').map(str::trim)
}

/// Serialize a table to WikiText, `{|` through `|}`.
pub fn serialize_table(table: &Table) -> String {
    let mut lines = Vec::new();
    match &table.class {
        Some(class) => lines.push(format!("{{| class=\"{class}\"")),
        None => lines.push("{|".to_string()),
    }

    for (index, row) in table.rows.iter().enumerate() {
        if index > 0 {
            lines.push("|-".to_string());
        }
        for (position, cell) in row.cells.iter().enumerate() {
            let content = serialize_inline_flat(&cell.content);
            let content = content.trim();
            let line = if cell.header {
                prefixed("!", content)
            } else if position == 0 && promotes(row.cells.len(), content.chars().count()) {
                prefixed("| |", content)
            } else {
                prefixed("|", content)
            };
            lines.push(line);
        }
    }

    lines.push("|}".to_string());
    lines.join("\n")
}

fn prefixed(marker: &str, content: &str) -> String {
    if content.is_empty() {
        marker.to_string()
    } else {
        format!("{marker} {content}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_text(cell: &TableCell) -> String {
        crate::ast::nodes::plain_text(&cell.content)
    }

    #[test]
    fn parses_class_headers_and_rows() {
        let table = parse_table(
            " class=\"wikitable\"\n! Header 1\n! Header 2\n|-\n| Cell 1\n| Cell 2\n",
            true,
        );
        assert_eq!(table.class.as_deref(), Some("wikitable"));
        assert_eq!(table.rows.len(), 2);
        assert!(table.rows[0].cells.iter().all(|c| c.header));
        assert!(table.rows[1].cells.iter().all(|c| !c.header));
        assert_eq!(cell_text(&table.rows[1].cells[1]), "Cell 2");
    }

    #[test]
    fn bare_bang_is_empty_header() {
        let table = parse_table("\n!\n! Name\n", true);
        let row = &table.rows[0];
        assert!(row.cells[0].header);
        assert!(row.cells[0].content.is_empty());
    }

    #[test]
    fn promotes_first_cell_of_wide_rows() {
        let table = parse_table("\n| Sword\n| 10\n| 3\n|-\n| A\n| 1\n| 2\n", true);
        assert!(table.rows[0].cells[0].header);
        assert!(!table.rows[0].cells[1].header);
        // Single character labels stay data cells.
        assert!(!table.rows[1].cells[0].header);
    }

    #[test]
    fn narrow_rows_are_not_promoted() {
        let table = parse_table("\n| Sword\n| 10\n", true);
        assert!(!table.rows[0].cells[0].header);
    }

    #[test]
    fn promotion_can_be_disabled() {
        let table = parse_table("\n| Sword\n| 10\n| 3\n", false);
        assert!(!table.rows[0].cells[0].header);
    }

    #[test]
    fn explicit_data_cells_are_never_promoted() {
        let table = parse_table("\n| | Sword\n| 10\n| 3\n", true);
        let first = &table.rows[0].cells[0];
        assert!(!first.header);
        assert!(first.explicit);
        assert_eq!(cell_text(first), "Sword");
    }

    #[test]
    fn cell_content_is_inline_formatted() {
        let table = parse_table("\n| '''Rare''' drop\n", true);
        assert_eq!(
            table.rows[0].cells[0].content,
            vec![
                Inline::Bold(vec![Inline::text("Rare")]),
                Inline::text(" drop")
            ]
        );
    }

    #[test]
    fn serializes_in_wikitext_layout() {
        let table = parse_table(
            " class=\"wikitable\"\n! Header 1\n! Header 2\n|-\n| Cell 1\n| Cell 2\n",
            true,
        );
        assert_eq!(
            serialize_table(&table),
            "{| class=\"wikitable\"\n! Header 1\n! Header 2\n|-\n| Cell 1\n| Cell 2\n|}"
        );
    }

    #[test]
    fn serializer_protects_wide_data_rows() {
        let table = Table {
            class: None,
            rows: vec![TableRow {
                cells: vec![
                    TableCell::data(vec![Inline::text("Sword")]),
                    TableCell::data(vec![Inline::text("10")]),
                    TableCell::data(vec![Inline::text("3")]),
                ],
            }],
        };
        let wikitext = serialize_table(&table);
        assert_eq!(wikitext, "{|\n| | Sword\n| 10\n| 3\n|}");

        let body = wikitext
            .strip_prefix("{|")
            .and_then(|s| s.strip_suffix("|}"))
            .unwrap();
        let reparsed = parse_table(body, true);
        assert!(reparsed.rows[0].cells.iter().all(|c| !c.header));
    }
}
