//! Inline markup: WikiText spans ⇄ [`Inline`] nodes.
//!
//! Markers, in precedence order:
//!
//! | Rule      | WikiText                  | Node                 |
//! |-----------|---------------------------|----------------------|
//! | bold      | `'''x'''`                 | `Bold`               |
//! | italic    | `''x''`                   | `Italic`             |
//! | image     | `[[File:url caption]]`    | `Image`              |
//! | video     | `[[Video:url]]`           | `Video`              |
//! | link      | `[url text]`              | `Link`               |
//! | underline | `__x__`                   | `Underline`          |
//! | strike    | `~~x~~`                   | `Strike`             |
//! | code      | `` `x` ``                 | `Code`               |
//!
//! The tokenizer always takes the leftmost match; when two rules match at the same offset the
//! earlier rule wins. That is what makes bold win over italic on `'''`, since both are runs
//! of apostrophes. Links only match after whitespace or at the start of the text, so the
//! bracketed `[[File:…]]` and `[[Video:…]]` forms never produce a link.
//!
//! Emphasis bodies are tokenized again; code, link text, captions and video urls are opaque.

use crate::ast::nodes::Inline;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"'''(.+?)'''").expect("valid bold regex"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"''(.+?)''").expect("valid italic regex"));
static IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[File:([^\s\]]+)(?:\s+([^\]]*))?\]\]").expect("valid image regex")
});
static VIDEO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[Video:([^\s\]]+)\]\]").expect("valid video regex"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\s\[\]]+)\s+([^\]]+)\]").expect("valid link regex"));
static UNDERLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__(.+?)__").expect("valid underline regex"));
static STRIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.+?)~~").expect("valid strike regex"));
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid code regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Bold,
    Italic,
    Image,
    Video,
    Link,
    Underline,
    Strike,
    Code,
}

const RULES: [Rule; 8] = [
    Rule::Bold,
    Rule::Italic,
    Rule::Image,
    Rule::Video,
    Rule::Link,
    Rule::Underline,
    Rule::Strike,
    Rule::Code,
];

impl Rule {
    fn pattern(self) -> &'static Regex {
        match self {
            Rule::Bold => &BOLD,
            Rule::Italic => &ITALIC,
            Rule::Image => &IMAGE,
            Rule::Video => &VIDEO,
            Rule::Link => &LINK,
            Rule::Underline => &UNDERLINE,
            Rule::Strike => &STRIKE,
            Rule::Code => &CODE,
        }
    }

    fn build(self, caps: &Captures) -> Inline {
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        match self {
            Rule::Bold => Inline::Bold(parse_inline(group(1))),
            Rule::Italic => Inline::Italic(parse_inline(group(1))),
            Rule::Underline => Inline::Underline(parse_inline(group(1))),
            Rule::Strike => Inline::Strike(parse_inline(group(1))),
            Rule::Code => Inline::Code(group(1).to_string()),
            Rule::Image => Inline::Image {
                src: group(1).to_string(),
                alt: group(2).trim().to_string(),
            },
            Rule::Video => Inline::Video {
                src: group(1).to_string(),
            },
            Rule::Link => Inline::Link {
                href: group(1).to_string(),
                text: group(2).trim().to_string(),
            },
        }
    }

    /// First acceptable match at or after `from`.
    fn find(self, text: &str, from: usize) -> Option<Found> {
        let mut at = from;
        while let Some(caps) = self.pattern().captures_at(text, at) {
            let whole = caps.get(0)?;
            if self == Rule::Link && !follows_boundary(text, whole.start()) {
                // '[' is ASCII, so the next byte is a char boundary.
                at = whole.start() + 1;
                continue;
            }
            return Some(Found {
                start: whole.start(),
                end: whole.end(),
                node: self.build(&caps),
            });
        }
        None
    }
}

struct Found {
    start: usize,
    end: usize,
    node: Inline,
}

fn follows_boundary(text: &str, offset: usize) -> bool {
    text[..offset]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace)
}

/// Tokenize one line of WikiText into inline nodes.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut nodes = Vec::new();
    // Next match per rule, recomputed only once the cursor has moved past it.
    let mut pending: Vec<Option<Found>> = RULES.iter().map(|rule| rule.find(text, 0)).collect();
    let mut cursor = 0;

    loop {
        for (slot, rule) in pending.iter_mut().zip(RULES) {
            if slot.as_ref().is_some_and(|found| found.start < cursor) {
                *slot = rule.find(text, cursor);
            }
        }

        let mut best: Option<usize> = None;
        for (index, slot) in pending.iter().enumerate() {
            if let Some(found) = slot {
                let better = match best {
                    Some(current) => pending[current]
                        .as_ref()
                        .is_some_and(|winner| found.start < winner.start),
                    None => true,
                };
                if better {
                    best = Some(index);
                }
            }
        }

        let Some(index) = best else { break };
        let Some(found) = pending[index].take() else {
            break;
        };
        if found.start > cursor {
            nodes.push(Inline::text(&text[cursor..found.start]));
        }
        nodes.push(found.node);
        cursor = found.end;
        pending[index] = RULES[index].find(text, cursor);
    }

    if cursor < text.len() {
        nodes.push(Inline::text(&text[cursor..]));
    }
    nodes
}

/// Serialize inline nodes back to WikiText; line breaks become newlines.
pub fn serialize_inline(content: &[Inline]) -> String {
    let mut out = String::new();
    write_inline(content, "\n", &mut out);
    out
}

/// Serialize inline nodes for contexts that must stay on one line (headings, table cells).
pub fn serialize_inline_flat(content: &[Inline]) -> String {
    let mut out = String::new();
    write_inline(content, " ", &mut out);
    out
}

fn write_inline(content: &[Inline], line_break: &str, out: &mut String) {
    for inline in content {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Bold(children) => wrap(children, "'''", line_break, out),
            Inline::Italic(children) => wrap(children, "''", line_break, out),
            Inline::Underline(children) => wrap(children, "__", line_break, out),
            Inline::Strike(children) => wrap(children, "~~", line_break, out),
            Inline::Code(code) => {
                out.push('`');
                out.push_str(code);
                out.push('`');
            }
            Inline::Link { href, text } => {
                let text = if text.trim().is_empty() { href } else { text };
                out.push_str(&format!("[{href} {text}]"));
            }
            Inline::Image { src, alt } => {
                if alt.is_empty() {
                    out.push_str(&format!("[[File:{src}]]"));
                } else {
                    out.push_str(&format!("[[File:{src} {alt}]]"));
                }
            }
            Inline::Video { src } => out.push_str(&format!("[[Video:{src}]]")),
            Inline::LineBreak => out.push_str(line_break),
        }
    }
}

fn wrap(children: &[Inline], marker: &str, line_break: &str, out: &mut String) {
    out.push_str(marker);
    write_inline(children, line_break, out);
    out.push_str(marker);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::text(s)
    }

    #[test]
    fn plain_text_is_a_single_node() {
        assert_eq!(parse_inline("just words"), vec![text("just words")]);
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn bold_wins_over_italic() {
        assert_eq!(
            parse_inline("'''x'''"),
            vec![Inline::Bold(vec![text("x")])]
        );
        assert_eq!(
            parse_inline("''x''"),
            vec![Inline::Italic(vec![text("x")])]
        );
    }

    #[test]
    fn emphasis_bodies_are_tokenized_again() {
        assert_eq!(
            parse_inline("'''a ''b'' c'''"),
            vec![Inline::Bold(vec![
                text("a "),
                Inline::Italic(vec![text("b")]),
                text(" c"),
            ])]
        );
    }

    #[test]
    fn image_with_and_without_caption() {
        assert_eq!(
            parse_inline("[[File:hero.png The hero]]"),
            vec![Inline::Image {
                src: "hero.png".to_string(),
                alt: "The hero".to_string(),
            }]
        );
        assert_eq!(
            parse_inline("[[File:hero.png]]"),
            vec![Inline::Image {
                src: "hero.png".to_string(),
                alt: String::new(),
            }]
        );
    }

    #[test]
    fn video_embed() {
        assert_eq!(
            parse_inline("watch [[Video:https://v.example/1]]"),
            vec![
                text("watch "),
                Inline::Video {
                    src: "https://v.example/1".to_string()
                }
            ]
        );
    }

    #[test]
    fn link_requires_leading_boundary() {
        assert_eq!(
            parse_inline("see [https://example.com the site] now"),
            vec![
                text("see "),
                Inline::Link {
                    href: "https://example.com".to_string(),
                    text: "the site".to_string(),
                },
                text(" now"),
            ]
        );
        assert_eq!(
            parse_inline("x[https://example.com site]"),
            vec![text("x[https://example.com site]")]
        );
    }

    #[test]
    fn underline_strike_and_code() {
        assert_eq!(
            parse_inline("__u__ ~~s~~ `c`"),
            vec![
                Inline::Underline(vec![text("u")]),
                text(" "),
                Inline::Strike(vec![text("s")]),
                text(" "),
                Inline::Code("c".to_string()),
            ]
        );
    }

    #[test]
    fn code_is_opaque() {
        assert_eq!(
            parse_inline("`'''not bold'''`"),
            vec![Inline::Code("'''not bold'''".to_string())]
        );
    }

    #[test]
    fn unmatched_markers_stay_text() {
        assert_eq!(parse_inline("'''open"), vec![text("'''open")]);
        assert_eq!(parse_inline("a ~~ b"), vec![text("a ~~ b")]);
    }

    #[test]
    fn serializes_every_marker() {
        let content = vec![
            Inline::Bold(vec![text("b")]),
            text(" "),
            Inline::Italic(vec![text("i")]),
            text(" "),
            Inline::Underline(vec![text("u")]),
            text(" "),
            Inline::Strike(vec![text("s")]),
            text(" "),
            Inline::Code("c".to_string()),
        ];
        assert_eq!(serialize_inline(&content), "'''b''' ''i'' __u__ ~~s~~ `c`");
    }

    #[test]
    fn serializes_links_and_media() {
        let content = vec![
            Inline::Link {
                href: "https://a.example".to_string(),
                text: "A".to_string(),
            },
            text(" "),
            Inline::Image {
                src: "x.png".to_string(),
                alt: "X".to_string(),
            },
            text(" "),
            Inline::Video {
                src: "https://v.example".to_string(),
            },
        ];
        assert_eq!(
            serialize_inline(&content),
            "[https://a.example A] [[File:x.png X]] [[Video:https://v.example]]"
        );
    }

    #[test]
    fn line_breaks_depend_on_context() {
        let content = vec![text("a"), Inline::LineBreak, text("b")];
        assert_eq!(serialize_inline(&content), "a\nb");
        assert_eq!(serialize_inline_flat(&content), "a b");
    }
}
