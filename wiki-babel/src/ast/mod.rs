//! Document tree shared by every format.
//!
//! Each format parses into a [`nodes::Document`] and serializes from one. The tree lives
//! only for the duration of a single conversion; nothing here is persisted.

pub mod nodes;
