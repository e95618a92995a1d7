//! Inspect transforms: different views of the parsed document tree.
//!
//! Transform names follow the `stage-format` pattern. There is only one stage for now, the
//! document tree (`ast`), rendered either as JSON or as a tree visualization.

use std::collections::HashMap;
use wiki_babel::formats::treeviz::to_treeviz_str_with_params;
use wiki_babel::{Document, FormatError, FormatRegistry, ParseOptions};

/// All transforms accepted by `wikitext inspect`.
pub const AVAILABLE_TRANSFORMS: &[&str] = &["ast-json", "ast-treeviz"];

/// Parse `source` with the named format.
///
/// The table options only apply to WikiText input; HTML carries its own cell types.
pub fn load_document(
    source: &str,
    from: &str,
    options: &ParseOptions,
) -> Result<Document, FormatError> {
    let registry = FormatRegistry::default();
    if from == "wikitext" {
        let mut params = HashMap::new();
        params.insert(
            "promote-row-headers".to_string(),
            options.promote_row_headers.to_string(),
        );
        registry.parse_with_options(source, from, &params)
    } else {
        registry.parse(source, from)
    }
}

/// Execute a named transform on a source document.
///
/// # Examples
///
/// ```ignore
/// let params = HashMap::new();
/// let output = execute_transform("== Items ==", "wikitext", "ast-treeviz", &ParseOptions::default(), &params)?;
/// ```
pub fn execute_transform(
    source: &str,
    from: &str,
    transform_name: &str,
    options: &ParseOptions,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    if !AVAILABLE_TRANSFORMS.contains(&transform_name) {
        return Err(format!("Unknown transform: {transform_name}"));
    }

    let doc = load_document(source, from, options).map_err(|e| format!("Transform failed: {e}"))?;

    match transform_name {
        "ast-json" => serde_json::to_string_pretty(&doc)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        // Supports: --extra-ast-full
        "ast-treeviz" => Ok(to_treeviz_str_with_params(&doc, extra_params)),
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}
