//! List nesting tests (WikiText marker runs ⇄ nested `ul`/`ol`)

use wiki_babel::{html_to_wikitext, wikitext_to_html};

#[test]
fn test_nested_unordered() {
    assert_eq!(
        wikitext_to_html("* a\n** b\n* c"),
        "<ul><li>a</li><ul><li>b</li></ul><li>c</li></ul>"
    );
}

#[test]
fn test_ordered() {
    assert_eq!(
        wikitext_to_html("# one\n# two"),
        "<ol><li>one</li><li>two</li></ol>"
    );
}

#[test]
fn test_mixed_kinds_per_level() {
    assert_eq!(
        wikitext_to_html("* a\n*# b\n*# c\n* d"),
        "<ul><li>a</li><ol><li>b</li><li>c</li></ol><li>d</li></ul>"
    );
}

#[test]
fn test_depth_jump_opens_every_level() {
    assert_eq!(
        wikitext_to_html("*** deep"),
        "<ul><ul><ul><li>deep</li></ul></ul></ul>"
    );
}

#[test]
fn test_kind_switch_at_same_depth_stays_in_list() {
    assert_eq!(
        wikitext_to_html("* a\n# b"),
        "<ul><li>a</li><li>b</li></ul>"
    );
    assert_eq!(
        wikitext_to_html("# a\n## b\n#* c"),
        "<ol><li>a</li><ol><li>b</li><li>c</li></ol></ol>"
    );
}

#[test]
fn test_paragraph_closes_list() {
    assert_eq!(
        wikitext_to_html("* a\ntext\n* b"),
        "<ul><li>a</li></ul>\n<p>text</p>\n<ul><li>b</li></ul>"
    );
}

#[test]
fn test_list_item_inline_markup() {
    assert_eq!(
        wikitext_to_html("* '''Iron''' ore"),
        "<ul><li><strong>Iron</strong> ore</li></ul>"
    );
}

#[test]
fn test_nested_list_round_trip() {
    let source = "# Gather\n## Sort\n## Refine\n# Build";
    assert_eq!(html_to_wikitext(&wikitext_to_html(source)), source);
}

#[test]
fn test_nested_ordered_list_uses_innermost_marker() {
    assert_eq!(
        html_to_wikitext("<ul><li>a</li><ol><li>b</li></ol></ul>"),
        "* a\n## b"
    );
    assert_eq!(
        html_to_wikitext("<ol><li>a</li><ul><li>b</li><ol><li>c</li></ol></ul></ol>"),
        "# a\n** b\n### c"
    );
}

#[test]
fn test_list_after_quote_stays_in_blockquote() {
    let source = "> q\n* a";
    let html = wikitext_to_html(source);
    assert_eq!(html, "<blockquote><p>q</p><ul><li>a</li></ul></blockquote>");
    assert_eq!(html_to_wikitext(&html), source);
}

#[test]
fn test_editor_nested_list_inside_item() {
    let html = "<ul><li><p>One</p></li><li><p>Two</p><ul><li><p>Nested</p></li></ul></li></ul>";
    assert_eq!(html_to_wikitext(html), "* One\n* Two\n** Nested");
}
