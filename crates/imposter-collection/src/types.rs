//! Core types for collection generation.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Schema identifier stamped into every generated collection.
pub const POSTMAN_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Display name of the generated collection.
pub const COLLECTION_NAME: &str = "Mountebank Stubs";

/// Protocols that can be expressed as Postman requests.
pub const SUPPORTED_PROTOCOLS: [&str; 2] = ["http", "https"];

// ============================================================================
// Imposter Template Types
// ============================================================================

/// Imposter configuration as declared in a template file.
///
/// Only the fields needed to derive requests are modelled; responses,
/// behaviors and the other Mountebank settings are ignored on parse.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImposterConfig {
    pub port: u16,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default)]
    pub stubs: Vec<Stub>,
}

fn default_protocol() -> String {
    "http".to_string()
}

/// Optional field that may be omitted but not set to `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ImposterConfig {
    /// Folder name for this imposter, falling back to `Imposter <port>`.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Imposter {}", self.port),
        }
    }

    /// Whether the declared protocol can be turned into Postman requests.
    pub fn is_supported_protocol(&self) -> bool {
        SUPPORTED_PROTOCOLS.contains(&self.protocol.as_str())
    }
}

/// Stub definition. Only the predicates matter here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Stub {
    #[serde(default)]
    pub predicates: Vec<Predicate>,
}

/// A single Mountebank predicate.
///
/// Each supported match operator is an optional slot; operators this tool
/// does not inspect (`not`, `or`, `and`, `exists`, `inject`) are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predicate {
    #[serde(default, deserialize_with = "present")]
    pub equals: Option<PredicateFields>,
    #[serde(default, deserialize_with = "present")]
    pub deep_equals: Option<PredicateFields>,
    #[serde(default, deserialize_with = "present")]
    pub contains: Option<PredicateFields>,
    #[serde(default, deserialize_with = "present")]
    pub starts_with: Option<PredicateFields>,
    #[serde(default, deserialize_with = "present")]
    pub ends_with: Option<PredicateFields>,
    #[serde(default, deserialize_with = "present")]
    pub matches: Option<PredicateFields>,
}

/// Match operators a predicate can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    DeepEquals,
    Contains,
    StartsWith,
    EndsWith,
    Matches,
}

impl Operator {
    /// Name of the operator as written in imposter JSON.
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::DeepEquals => "deepEquals",
            Operator::Contains => "contains",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::Matches => "matches",
        }
    }
}

impl Predicate {
    /// Fields attached to the given operator, if the predicate uses it.
    pub fn operator(&self, op: Operator) -> Option<&PredicateFields> {
        match op {
            Operator::Equals => self.equals.as_ref(),
            Operator::DeepEquals => self.deep_equals.as_ref(),
            Operator::Contains => self.contains.as_ref(),
            Operator::StartsWith => self.starts_with.as_ref(),
            Operator::EndsWith => self.ends_with.as_ref(),
            Operator::Matches => self.matches.as_ref(),
        }
    }
}

/// Request fields inside a predicate operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PredicateFields {
    #[serde(default, deserialize_with = "present")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub method: Option<String>,
}

// ============================================================================
// Postman Collection Types
// ============================================================================

/// Root of a Postman Collection v2.1 document.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostmanCollection {
    pub info: PostmanInfo,
    pub item: Vec<ImposterFolder>,
}

impl PostmanCollection {
    /// Create an empty collection with the fixed metadata.
    pub fn new() -> Self {
        Self {
            info: PostmanInfo {
                name: COLLECTION_NAME.to_string(),
                schema: POSTMAN_SCHEMA.to_string(),
            },
            item: Vec::new(),
        }
    }

    /// Total number of requests across all folders.
    pub fn request_count(&self) -> usize {
        self.item.iter().map(|folder| folder.item.len()).sum()
    }
}

impl Default for PostmanCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// Collection metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostmanInfo {
    pub name: String,
    pub schema: String,
}

/// One folder per imposter template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImposterFolder {
    pub name: String,
    pub item: Vec<RequestItem>,
}

/// A request derived from a single stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestItem {
    pub name: String,
    pub request: PostmanRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostmanRequest {
    pub method: String,
    pub url: PostmanUrl,
}

/// Structured Postman URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostmanUrl {
    pub raw: String,
    pub protocol: String,
    pub host: Vec<String>,
    pub port: String,
    pub path: Vec<String>,
}

// ============================================================================
// Options and Reporting
// ============================================================================

/// Options controlling a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Directory scanned for imposter templates (non-recursive).
    pub templates_dir: PathBuf,
    /// File the collection is written to, replaced on every run.
    pub output: PathBuf,
    /// Extension a file must have to be considered a template.
    pub template_extension: String,
    /// Template file name that is never processed.
    pub excluded_file: String,
    /// Host used in every request URL.
    pub host: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("mountebank-templates"),
            output: PathBuf::from("mountebank_collection.json"),
            template_extension: "ejs".to_string(),
            excluded_file: "imposters.ejs".to_string(),
            host: "localhost".to_string(),
        }
    }
}

/// Why a template did not contribute a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Content was not a valid imposter document after comment stripping.
    Malformed(String),
    /// Declared protocol is neither `http` nor `https`.
    UnsupportedProtocol(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Malformed(e) => write!(f, "Not valid JSON ({e})"),
            SkipReason::UnsupportedProtocol(p) => {
                write!(f, "Protocol {p} not supported for Postman generation yet")
            }
        }
    }
}

/// A template that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTemplate {
    pub file: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of scanning a template directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Templates that were parsed and had a supported protocol.
    pub processed: Vec<PathBuf>,
    /// Templates that were skipped.
    pub skipped: Vec<SkippedTemplate>,
    /// Folders added to the collection.
    pub folders: usize,
    /// Requests added to the collection.
    pub requests: usize,
}

impl GenerateReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped template.
    pub fn skip(&mut self, file: &Path, reason: SkipReason) {
        self.skipped.push(SkippedTemplate {
            file: file.to_path_buf(),
            reason,
        });
    }

    /// Check if any template was skipped.
    pub fn has_skips(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Number of templates looked at, processed or skipped.
    pub fn files_seen(&self) -> usize {
        self.processed.len() + self.skipped.len()
    }
}

/// Failures that abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("Failed to read template directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read template {}: {source}", .path.display())]
    ReadTemplate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write collection to {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
}
