//! Engine wire types
//!
//! Shapes the analysis engine reports over its transport. Engine positions
//! are zero-based (line, column); the protocol side is zero-based
//! (line, character). The two encodings are structurally identical today but
//! are always converted through named fields in `lsp::convert`, so a future
//! divergence cannot corrupt positions silently.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A zero-based (line, column) position in engine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnginePosition {
    pub line: u32,
    pub column: u32,
}

/// A start/end pair of engine positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EngineRange {
    pub start: EnginePosition,
    pub end: EnginePosition,
}

/// Severities the engine is allowed to report.
///
/// Anything outside the known taxonomy lands in `Unknown` with the raw value
/// preserved, and is rejected loudly at the severity-mapping boundary rather
/// than coerced to a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Unknown(String),
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ERROR" => Severity::Error,
            "WARNING" => Severity::Warning,
            "INFO" => Severity::Info,
            _ => Severity::Unknown(raw),
        }
    }
}

/// A problem the engine reports for one file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub code: String,
    pub message: String,
    pub source_range: EngineRange,
    pub severity: Severity,
}

/// Where a feature is defined, as the engine reports it: a point in a
/// workspace-relative file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DefinitionLocation {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

/// A tag-name completion entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCompletion {
    pub tag_name: String,
    pub description: String,
    /// Snippet the editor inserts when the completion is accepted,
    /// e.g. `<vanilla-elem></vanilla-elem>`.
    pub expand_to: String,
}

/// An attribute-name completion entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeCompletion {
    pub name: String,
    pub description: String,
    /// Ranking key; ordering is the engine's call, not the formatter's.
    pub sort_key: String,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub inherited_from: Option<String>,
}

/// The two completion result shapes the engine produces, tagged by `kind`.
///
/// Result kinds this bridge does not understand land in `Unrecognized` and
/// format to no completions, so new engine shapes stay additive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind")]
pub enum CompletionResult {
    #[serde(rename = "element-tags")]
    ElementTags { elements: Vec<TagCompletion> },
    #[serde(rename = "attributes")]
    Attributes { attributes: Vec<AttributeCompletion> },
    #[serde(other)]
    Unrecognized,
}
