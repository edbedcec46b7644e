//! Types flowing through the enrichment pipeline.

use chrono::{DateTime, Utc};
use enrich_core::AppResult;
use enrich_vector::PointId;
use serde::Serialize;
use std::fmt;

/// What context enrichment did to a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextStatus {
    /// Snippets were found and appended
    Applied { snippets: Vec<String> },
    /// No usable snippets; the generic clause was appended
    DefaultClause,
    /// Enrichment could not run; the prompt passed through unchanged
    Unavailable { reason: String },
}

/// A prompt after context enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedPrompt {
    pub text: String,
    pub status: ContextStatus,
}

/// Outcome of querying one retrieval source.
///
/// A degraded source contributes no records but keeps its failure reason,
/// so the boundary can report partial results honestly instead of
/// pretending the source returned nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome<T> {
    Available(Vec<T>),
    Degraded { reason: String },
}

impl<T> SourceOutcome<T> {
    pub fn from_result(result: AppResult<Vec<T>>) -> Self {
        match result {
            Ok(records) => SourceOutcome::Available(records),
            Err(e) => SourceOutcome::Degraded {
                reason: e.to_string(),
            },
        }
    }

    pub fn records(&self) -> &[T] {
        match self {
            SourceOutcome::Available(records) => records,
            SourceOutcome::Degraded { .. } => &[],
        }
    }

    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            SourceOutcome::Available(_) => None,
            SourceOutcome::Degraded { reason } => Some(reason),
        }
    }
}

/// The retrieval stage a degradation happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalSource {
    Enrichment,
    Vector,
    Relational,
}

impl fmt::Display for RetrievalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RetrievalSource::Enrichment => "enrichment",
            RetrievalSource::Vector => "vector",
            RetrievalSource::Relational => "relational",
        };
        write!(f, "{}", name)
    }
}

/// One degraded source and why it degraded.
#[derive(Debug, Clone, PartialEq)]
pub struct Degradation {
    pub source: RetrievalSource,
    pub reason: String,
}

/// Provenance metadata on a fused result, tagged by source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source")]
pub enum ResultMetadata {
    #[serde(rename = "vector")]
    Vector {
        /// Similarity score formatted to three decimals, or "N/A"
        score: String,
        id: PointId,
    },
    #[serde(rename = "relational")]
    Relational {
        id: i32,
        #[serde(skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
        created_at: Option<DateTime<Utc>>,
    },
}

/// One entry in the unified result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusedResult {
    pub title: String,
    pub description: String,
    pub context: String,
    /// Unified 0-5 score; the list is sorted by it, descending
    pub rating: f32,
    pub metadata: ResultMetadata,
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub original_prompt: String,
    pub enriched_prompt: String,
    pub results: Vec<FusedResult>,
    pub degradations: Vec<Degradation>,
}
