//! Template loading: comment stripping and strict JSON parsing.

use crate::types::{CollectionError, ImposterConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::warn;

/// Matches a `//` marker through to the end of its line.
///
/// Not string-aware: a `//` inside a quoted value (e.g. a URL) is removed too.
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//.*").expect("valid regex"));

/// Result of loading a single template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// The template parsed into an imposter configuration.
    Imposter(ImposterConfig),
    /// The template was not a valid imposter document.
    Malformed(String),
}

/// Remove every `//` line comment and trim surrounding whitespace.
pub fn strip_comments(content: &str) -> String {
    LINE_COMMENT.replace_all(content, "").trim().to_string()
}

/// Parse template text into an imposter configuration.
pub fn parse_template(content: &str) -> Result<ImposterConfig, serde_json::Error> {
    serde_json::from_str(&strip_comments(content))
}

/// Read and parse a template file.
///
/// A parse failure is not an error: it is logged and returned as
/// [`Template::Malformed`]. Only I/O failures are propagated.
pub fn load_template(path: &Path) -> Result<Template, CollectionError> {
    let content =
        std::fs::read_to_string(path).map_err(|source| CollectionError::ReadTemplate {
            path: path.to_path_buf(),
            source,
        })?;

    match parse_template(&content) {
        Ok(config) => Ok(Template::Imposter(config)),
        Err(e) => {
            warn!("Skipping {}: Not valid JSON ({e})", path.display());
            Ok(Template::Malformed(e.to_string()))
        }
    }
}
