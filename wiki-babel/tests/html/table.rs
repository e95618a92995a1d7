//! Table conversion tests
//!
//! The cell type an HTML table starts with must survive HTML → WikiText → HTML, even where
//! the WikiText row-header heuristic would otherwise promote a cell.

use wiki_babel::{html_to_wikitext, wikitext_to_html};

fn html_round_trip(html: &str) -> String {
    wikitext_to_html(&html_to_wikitext(html))
}

#[test]
fn test_wikitable_to_wikitext() {
    let html = "<table class=\"wikitable\"><tr><th>Header 1</th><th>Header 2</th></tr>\
                <tr><td>Cell 1</td><td>Cell 2</td></tr></table>";
    assert_eq!(
        html_to_wikitext(html),
        "{| class=\"wikitable\"\n! Header 1\n! Header 2\n|-\n| Cell 1\n| Cell 2\n|}"
    );
}

#[test]
fn test_table_without_class() {
    assert_eq!(
        html_to_wikitext("<table><tr><td>x</td></tr></table>"),
        "{|\n| x\n|}"
    );
}

#[test]
fn test_wide_data_row_is_written_explicitly() {
    let html = "<table><tr><td>Sword</td><td>10</td><td>3</td></tr></table>";
    assert_eq!(html_to_wikitext(html), "{|\n| | Sword\n| 10\n| 3\n|}");
    assert_eq!(html_round_trip(html), html);
}

#[test]
fn test_row_header_survives_round_trip() {
    let html = "<table><tr><th>Sword</th><td>10</td><td>3</td></tr></table>";
    assert_eq!(html_to_wikitext(html), "{|\n! Sword\n| 10\n| 3\n|}");
    assert_eq!(html_round_trip(html), html);
}

#[test]
fn test_cell_markup_and_empty_cells() {
    let html = "<table><tr><th></th><th><strong>Bold</strong></th></tr>\
                <tr><td><a href=\"https://a.example\">link</a></td><td></td></tr></table>";
    assert_eq!(
        html_to_wikitext(html),
        "{|\n!\n! '''Bold'''\n|-\n| [https://a.example link]\n|\n|}"
    );
    assert_eq!(html_round_trip(html), html);
}

#[test]
fn test_cell_paragraphs_flatten_to_one_line() {
    let html = "<table><tr><td><p>one</p><p>two</p></td></tr></table>";
    assert_eq!(html_to_wikitext(html), "{|\n| one two\n|}");
}

#[test]
fn test_table_between_paragraphs_round_trip() {
    let source = "Before\n\n{| class=\"wikitable\"\n! H\n|-\n| C\n|}\n\nAfter";
    assert_eq!(html_to_wikitext(&wikitext_to_html(source)), source);
}
