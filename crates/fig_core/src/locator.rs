//! Locator parsing
//!
//! A locator is a free-form reference to a document: either a bare file key
//! or a Figma URL. URLs carry the file key in the path segment after one of
//! the known route prefixes and may name a specific node in the `node-id`
//! query parameter.

use fig_common::{FigError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static FILE_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"figma\.com/(?:file|design|board|proto)/([a-zA-Z0-9]+)").unwrap()
});

static NODE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"node-id=([^&]+)").unwrap());

/// A parsed document reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locator {
    /// Document identifier
    pub file_key: String,

    /// Node identifier in canonical colon form, when the locator names one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

/// Extract the file key from a Figma URL, or return a bare key verbatim
///
/// Supported URL routes: `/file/<KEY>`, `/design/<KEY>`, `/board/<KEY>`,
/// `/proto/<KEY>`.
pub fn extract_file_key(file_url_or_key: &str) -> Result<String> {
    let trimmed = file_url_or_key.trim();

    if !trimmed.starts_with("http") {
        return Ok(trimmed.to_string());
    }

    FILE_KEY_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            FigError::InvalidLocator(
                "Invalid Figma URL. Expected format like \
                 https://www.figma.com/design/<FILE_KEY>/... or /file/<FILE_KEY>/..."
                    .to_string(),
            )
        })
}

/// Extract the node id from a URL's `node-id` query parameter
///
/// The URL form uses a dash separator (`12-34`); identity lookups use the
/// canonical colon form (`12:34`), so dashes are normalized. Absence of the
/// parameter is not an error, it means no specific node was requested.
pub fn extract_node_id(url: &str) -> Option<String> {
    NODE_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace('-', ":"))
}

/// Parse a full locator: file key plus optional node id
pub fn parse_locator(file_url_or_key: &str) -> Result<Locator> {
    Ok(Locator {
        file_key: extract_file_key(file_url_or_key)?,
        node_id: extract_node_id(file_url_or_key),
    })
}
