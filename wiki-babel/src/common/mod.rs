//! Format-agnostic machinery shared by the parsers and serializers.

pub mod list_stack;
pub mod placeholders;
