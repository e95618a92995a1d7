//! Import tests for WikiText (WikiText → HTML)
//!
//! These tests parse WikiText and check the HTML fragment produced from the tree.

use insta::assert_snapshot;
use wiki_babel::format::Format;
use wiki_babel::formats::wikitext::WikiTextFormat;
use wiki_babel::wikitext_to_html;

const KITCHEN_SINK: &str = include_str!("fixtures/kitchensink.wiki");

// ============================================================================
// BLOCKS
// ============================================================================

#[test]
fn test_heading_levels() {
    assert_eq!(wikitext_to_html("== T =="), "<h1>T</h1>");
    assert_eq!(wikitext_to_html("=== T ==="), "<h2>T</h2>");
    assert_eq!(wikitext_to_html("==== T ===="), "<h3>T</h3>");
    assert_eq!(wikitext_to_html("===== T ====="), "<h4>T</h4>");
    assert_eq!(wikitext_to_html("====== T ======"), "<h5>T</h5>");
}

#[test]
fn test_heading_with_inline_markup() {
    assert_eq!(
        wikitext_to_html("== '''Bold''' title =="),
        "<h1><strong>Bold</strong> title</h1>"
    );
}

#[test]
fn test_mismatched_heading_is_paragraph() {
    assert_eq!(wikitext_to_html("== T ==="), "<p>== T ===</p>");
}

#[test]
fn test_overlong_heading_run_is_paragraph() {
    assert_eq!(
        wikitext_to_html("======= x ======="),
        "<p>======= x =======</p>"
    );
    assert_eq!(wikitext_to_html("====== x ======"), "<h5>x</h5>");
}

#[test]
fn test_rule_and_paragraphs() {
    assert_eq!(
        wikitext_to_html("above\n----\nbelow"),
        "<p>above</p>\n<hr>\n<p>below</p>"
    );
}

#[test]
fn test_each_line_is_a_paragraph() {
    assert_eq!(wikitext_to_html("one\ntwo"), "<p>one</p>\n<p>two</p>");
}

#[test]
fn test_blockquote_spans_consecutive_lines() {
    assert_eq!(
        wikitext_to_html("> first\n> second\n\n> third"),
        "<blockquote><p>first</p><p>second</p></blockquote>\n<blockquote><p>third</p></blockquote>"
    );
}

#[test]
fn test_text_is_escaped() {
    assert_eq!(
        wikitext_to_html("a < b & <b>c</b>"),
        "<p>a &lt; b &amp; &lt;b&gt;c&lt;/b&gt;</p>"
    );
}

// ============================================================================
// INLINES
// ============================================================================

#[test]
fn test_inline_markers() {
    assert_eq!(wikitext_to_html("'''x'''"), "<p><strong>x</strong></p>");
    assert_eq!(wikitext_to_html("''x''"), "<p><em>x</em></p>");
    assert_eq!(wikitext_to_html("__x__"), "<p><u>x</u></p>");
    assert_eq!(wikitext_to_html("~~x~~"), "<p><s>x</s></p>");
    assert_eq!(wikitext_to_html("`x`"), "<p><code>x</code></p>");
}

#[test]
fn test_media() {
    assert_eq!(
        wikitext_to_html("[[File:a.png]]"),
        "<p><img src=\"a.png\" alt=\"\"></p>"
    );
    assert_eq!(
        wikitext_to_html("[[Video:https://video.example/1]]"),
        "<p><iframe src=\"https://video.example/1\" allowfullscreen=\"\"></iframe></p>"
    );
}

#[test]
fn test_link_needs_leading_whitespace() {
    assert_eq!(
        wikitext_to_html("go [https://a.example home]"),
        "<p>go <a href=\"https://a.example\">home</a></p>"
    );
    assert_eq!(
        wikitext_to_html("go[https://a.example home]"),
        "<p>go[https://a.example home]</p>"
    );
}

// ============================================================================
// PROTECTED REGIONS
// ============================================================================

#[test]
fn test_wikitable() {
    let source = "{| class=\"wikitable\"\n! Header 1\n! Header 2\n|-\n| Cell 1\n| Cell 2\n|}";
    assert_eq!(
        wikitext_to_html(source),
        "<table class=\"wikitable\"><tr><th>Header 1</th><th>Header 2</th></tr>\
         <tr><td>Cell 1</td><td>Cell 2</td></tr></table>"
    );
}

#[test]
fn test_table_between_paragraphs() {
    let source = "Intro\n{| class=\"wikitable\"\n! H\n|-\n| C\n|}\nOutro";
    assert_eq!(
        wikitext_to_html(source),
        "<p>Intro</p>\n\
         <table class=\"wikitable\"><tr><th>H</th></tr><tr><td>C</td></tr></table>\n\
         <p>Outro</p>"
    );
}

#[test]
fn test_row_header_heuristic() {
    let source = "{|\n! Item\n! Damage\n! Weight\n|-\n| Sword\n| 10\n| 3\n|-\n| A\n| 1\n| 2\n|}";
    assert_eq!(
        wikitext_to_html(source),
        "<table><tr><th>Item</th><th>Damage</th><th>Weight</th></tr>\
         <tr><th>Sword</th><td>10</td><td>3</td></tr>\
         <tr><td>A</td><td>1</td><td>2</td></tr></table>"
    );
}

#[test]
fn test_unterminated_table_keeps_its_lines() {
    let html = wikitext_to_html("{|\n! Header\n| Cell");
    assert_eq!(html, "<p>{|</p>\n<p>! Header</p>\n<p>| Cell</p>");
}

#[test]
fn test_code_fence_is_not_parsed() {
    assert_eq!(
        wikitext_to_html("```\n== not a heading ==\n* not a list\n```"),
        "<pre><code>== not a heading ==\n* not a list</code></pre>"
    );
}

#[test]
fn test_code_fence_language() {
    assert_eq!(
        wikitext_to_html("```lua\nreturn 1\n```"),
        "<pre><code class=\"language-lua\">return 1</code></pre>"
    );
}

#[test]
fn test_table_inside_code_stays_code() {
    let html = wikitext_to_html("```\n{|\n| x\n|}\n```");
    assert_eq!(html, "<pre><code>{|\n| x\n|}</code></pre>");
}

// ============================================================================
// KITCHEN SINK
// ============================================================================

#[test]
fn test_kitchensink() {
    assert_snapshot!(wikitext_to_html(KITCHEN_SINK), @r#"
<h1>Sword</h1>
<p>The <strong>Sword</strong> is a <em>basic</em> weapon. See <a href="https://wiki.example/Weapons">weapons list</a>.</p>
<p><img src="sword.png" alt="A sword"></p>
<h2>Stats</h2>
<table class="wikitable"><tr><th>Stat</th><th>Value</th></tr><tr><td>Damage</td><td>10</td></tr></table>
<ol><li>Craft the hilt</li><li>Forge the blade</li><ol><li>Use <u>iron</u></li></ol></ol>
<blockquote><p>Sharp on both <s>sides</s> edges.</p></blockquote>
<hr>
<pre><code class="language-lua">local damage = 10</code></pre>
"#);
}

#[test]
fn test_format_parse_matches_function() {
    let doc = WikiTextFormat::default().parse(KITCHEN_SINK).unwrap();
    assert_eq!(doc.blocks.len(), 9);
}
