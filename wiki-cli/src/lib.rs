//! Library half of the `wikitext` binary, so integration tests and the binary share the
//! inspect transforms.

pub mod transforms;
