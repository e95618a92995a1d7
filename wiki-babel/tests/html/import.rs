//! Import tests for HTML (HTML → WikiText)
//!
//! Input mimics what the rich-text editor emits, plus the loose HTML people paste into it.

use wiki_babel::format::Format;
use wiki_babel::formats::html::HtmlFormat;
use wiki_babel::html_to_wikitext;

const KITCHEN_SINK: &str = include_str!("fixtures/kitchensink.html");

#[test]
fn test_headings() {
    for level in 1..=5 {
        let eq = "=".repeat(level + 1);
        let html = format!("<h{level}>T</h{level}>");
        assert_eq!(html_to_wikitext(&html), format!("{eq} T {eq}"));
    }
}

#[test]
fn test_h6_is_plain_text() {
    assert_eq!(html_to_wikitext("<h6>Tiny</h6>"), "Tiny");
}

#[test]
fn test_inline_markers() {
    assert_eq!(html_to_wikitext("<p><strong>x</strong></p>"), "'''x'''");
    assert_eq!(html_to_wikitext("<p><b>x</b></p>"), "'''x'''");
    assert_eq!(html_to_wikitext("<p><em>x</em></p>"), "''x''");
    assert_eq!(html_to_wikitext("<p><i>x</i></p>"), "''x''");
    assert_eq!(html_to_wikitext("<p><u>x</u></p>"), "__x__");
    assert_eq!(html_to_wikitext("<p><s>x</s></p>"), "~~x~~");
    assert_eq!(html_to_wikitext("<p><del>x</del></p>"), "~~x~~");
    assert_eq!(html_to_wikitext("<p><code>x</code></p>"), "`x`");
}

#[test]
fn test_links_and_media() {
    assert_eq!(
        html_to_wikitext("<p><a href=\"https://a.example\">home</a></p>"),
        "[https://a.example home]"
    );
    assert_eq!(
        html_to_wikitext("<p><img src=\"a.png\" alt=\"Cap\"></p>"),
        "[[File:a.png Cap]]"
    );
    assert_eq!(
        html_to_wikitext("<iframe src=\"https://video.example/1\" allowfullscreen></iframe>"),
        "[[Video:https://video.example/1]]"
    );
}

#[test]
fn test_line_breaks_and_nbsp() {
    assert_eq!(html_to_wikitext("<p>Hello<br>World</p>"), "Hello\nWorld");
    assert_eq!(html_to_wikitext("<p>a&nbsp;b</p>"), "a b");
}

#[test]
fn test_entities_are_decoded() {
    assert_eq!(html_to_wikitext("<p>Tom &amp; Jerry</p>"), "Tom & Jerry");
}

#[test]
fn test_unknown_tags_are_stripped() {
    assert_eq!(
        html_to_wikitext("<p>Some <span style=\"color:red\">red</span> text</p>"),
        "Some red text"
    );
}

#[test]
fn test_full_document_uses_body_only() {
    let html = "<html><head><title>Ignored</title></head><body><p>Kept</p></body></html>";
    assert_eq!(html_to_wikitext(html), "Kept");
}

#[test]
fn test_blockquote_prefixes_each_line() {
    assert_eq!(
        html_to_wikitext("<blockquote><p>Line one</p><p>Line <strong>two</strong></p></blockquote>"),
        "> Line one\n> Line '''two'''"
    );
}

#[test]
fn test_code_block() {
    assert_eq!(
        html_to_wikitext("<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"),
        "```rust\nfn main() {}\n```"
    );
    assert_eq!(
        html_to_wikitext("<pre><code>plain</code></pre>"),
        "```\nplain\n```"
    );
}

#[test]
fn test_adjacent_lists_of_different_kinds() {
    assert_eq!(
        html_to_wikitext("<ol><li>a</li></ol><ul><li>b</li></ul>"),
        "# a\n\n* b"
    );
}

#[test]
fn test_stray_list_item() {
    assert_eq!(html_to_wikitext("<li>alone</li>"), "* alone");
}

#[test]
fn test_empty_editor_paragraphs_vanish() {
    assert_eq!(html_to_wikitext("<p>a</p><p></p><p><br></p><p>b</p>"), "a\n\nb");
}

#[test]
fn test_deeply_nested_markup_flattens() {
    let html = format!("{}deep", "<span>".repeat(100_000));
    assert_eq!(html_to_wikitext(&html), "deep");

    let quotes = format!("{}deep", "<blockquote>".repeat(5_000));
    let wiki = html_to_wikitext(&quotes);
    assert!(wiki.starts_with("> "), "{wiki}");
    assert!(wiki.ends_with("deep"), "{wiki}");
}

#[test]
fn test_kitchensink() {
    let expected = include_str!("../wikitext/fixtures/kitchensink.wiki");
    assert_eq!(html_to_wikitext(KITCHEN_SINK), expected.trim_end());
}

#[test]
fn test_format_parse() {
    let doc = HtmlFormat.parse(KITCHEN_SINK).unwrap();
    assert_eq!(doc.blocks.len(), 9);
}
