//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the Document tree and various text representations.

pub mod html;
pub mod treeviz;
pub mod wikitext;

pub use html::HtmlFormat;
pub use treeviz::TreevizFormat;
pub use wikitext::{ParseOptions, WikiTextFormat};
