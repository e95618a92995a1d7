//! Depth-tracked stack of open list levels.
//!
//! # The High-Level Concept
//!
//! WikiText encodes list nesting as a marker run (`*`, `**`, `##`), HTML encodes it as
//! nested `<ul>`/`<ol>` elements. Both directions reduce to the same question: given the
//! levels that are open right now and the depth the next item needs, which levels must be
//! closed and which opened?
//!
//! # The Algorithm
//!
//! 1. Pop levels while the stack is deeper than the target path.
//! 2. Push the remaining levels of the target path, each with the kind its marker names.
//!
//! Only depth drives the stack. A level that is already open keeps its kind, so `* a` then
//! `# b` stay in one `<ul>`. Closing is reported innermost first so callers can emit matching
//! end tags in order.
//!
//! Going back to WikiText, an item is written as the innermost kind's marker repeated once
//! per level (see [`marker_run`]).

use crate::ast::nodes::ListKind;

/// A single open or close step produced by [`ListStack::sync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTransition {
    Open(ListKind),
    Close(ListKind),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListStack {
    levels: Vec<ListKind>,
}

impl ListStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[ListKind] {
        &self.levels
    }

    pub fn push(&mut self, kind: ListKind) {
        self.levels.push(kind);
    }

    pub fn pop(&mut self) -> Option<ListKind> {
        self.levels.pop()
    }

    /// Bring the stack in line with `path`, returning the transitions in emit order.
    pub fn sync(&mut self, path: &[ListKind]) -> Vec<ListTransition> {
        let mut transitions = Vec::new();

        while self.levels.len() > path.len() {
            if let Some(top) = self.levels.pop() {
                transitions.push(ListTransition::Close(top));
            }
        }

        for &kind in &path[self.levels.len()..] {
            self.levels.push(kind);
            transitions.push(ListTransition::Open(kind));
        }

        transitions
    }

    /// The marker path for an item at the current position.
    ///
    /// An item outside of any list (a stray `<li>`) gets a single unordered level.
    pub fn item_path(&self) -> Vec<ListKind> {
        if self.levels.is_empty() {
            vec![ListKind::Unordered]
        } else {
            self.levels.clone()
        }
    }
}

/// Render a marker path as a WikiText marker run: the innermost kind's marker, repeated once
/// per level (at least once).
pub fn marker_run(path: &[ListKind]) -> String {
    let top = path.last().copied().unwrap_or(ListKind::Unordered);
    top.marker().to_string().repeat(path.len().max(1))
}
