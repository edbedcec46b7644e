//! Shared types for the vector index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stored point.
///
/// The store accepts unsigned integers and UUID-style strings; both shapes
/// round-trip through the REST API unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Int(u64),
    Str(String),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointId::Int(id) => write!(f, "{}", id),
            PointId::Str(id) => write!(f, "{}", id),
        }
    }
}

impl From<u64> for PointId {
    fn from(id: u64) -> Self {
        PointId::Int(id)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        PointId::Str(id.to_string())
    }
}

/// Payload stored alongside a vector.
///
/// The fields the pipeline reads are typed; anything else a point carries
/// rides along in `extra` so upserts never lose data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorPayload {
    /// Display title for the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short summary of the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Body text, also the input for context snippets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Provenance note shown with fused results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Untyped payload fields the pipeline does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VectorPayload {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// One scored nearest-neighbor hit.
///
/// Result sets are ordered best-first by the backend; `score` is cosine
/// similarity, higher is closer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: PointId,
    pub score: f32,
    #[serde(default)]
    pub payload: VectorPayload,
}
