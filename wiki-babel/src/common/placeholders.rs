//! Placeholder protection for sublanguage regions.
//!
//! Tables and fenced code blocks contain lines that look like list items, rows of pipes or
//! headings. Before the line-oriented parser runs, each region is parsed on its own, stored
//! in an arena by index, and replaced by a token such as `__TABLE_0__` on a line of its own.
//! The block parser only needs to recognise the token line and pull the finished block back
//! out of the arena.

use crate::ast::nodes::Block;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^__(TABLE|CODE_BLOCK)_(\d+)__$").expect("valid placeholder regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Table,
    CodeBlock,
}

impl PlaceholderKind {
    fn label(self) -> &'static str {
        match self {
            PlaceholderKind::Table => "TABLE",
            PlaceholderKind::CodeBlock => "CODE_BLOCK",
        }
    }
}

/// Side arenas holding the lifted blocks, one per kind.
#[derive(Debug, Default)]
pub struct Placeholders {
    tables: Vec<Block>,
    code_blocks: Vec<Block>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `block` and return the token that stands in for it.
    pub fn insert(&mut self, kind: PlaceholderKind, block: Block) -> String {
        let arena = self.arena_mut(kind);
        let index = arena.len();
        arena.push(block);
        token(kind, index)
    }

    /// Resolve a trimmed line to its lifted block, if it is a known token.
    pub fn resolve(&self, line: &str) -> Option<&Block> {
        let caps = TOKEN.captures(line)?;
        let index: usize = caps[2].parse().ok()?;
        let arena = match &caps[1] {
            "TABLE" => &self.tables,
            _ => &self.code_blocks,
        };
        arena.get(index)
    }

    pub fn len(&self) -> usize {
        self.tables.len() + self.code_blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn arena_mut(&mut self, kind: PlaceholderKind) -> &mut Vec<Block> {
        match kind {
            PlaceholderKind::Table => &mut self.tables,
            PlaceholderKind::CodeBlock => &mut self.code_blocks,
        }
    }
}

pub fn token(kind: PlaceholderKind, index: usize) -> String {
    format!("__{}_{index}__", kind.label())
}

/// Replace every match of `pattern` with a placeholder line, building the block with `build`.
///
/// Matches are replaced in encounter order. The token is surrounded by newlines so it
/// always occupies a line of its own.
pub fn lift<F>(
    source: &str,
    pattern: &Regex,
    kind: PlaceholderKind,
    placeholders: &mut Placeholders,
    mut build: F,
) -> String
where
    F: FnMut(&Captures) -> Block,
{
    pattern
        .replace_all(source, |caps: &Captures| {
            let block = build(caps);
            format!("\n{}\n", placeholders.insert(kind, block))
        })
        .into_owned()
}
