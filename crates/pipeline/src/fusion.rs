//! Result fusion: one rated, ordered list from heterogeneous sources.

use crate::types::{FusedResult, ResultMetadata};
use enrich_relational::RelationalRecord;
use enrich_vector::VectorMatch;
use std::cmp::Ordering;

const FALLBACK_DESCRIPTION: &str = "No description available";
const VECTOR_FALLBACK_CONTEXT: &str = "Vector DB match";
const RELATIONAL_FALLBACK_CONTEXT: &str = "Database match";

/// Source scores live in [0, 1]; ratings in [0, 5].
const RATING_SCALE: f32 = 5.0;

/// Map a source score to the unified rating. Monotonic, clamped to [0, 5];
/// non-finite input rates as zero.
pub fn rating_from_score(score: f32) -> f32 {
    if !score.is_finite() {
        return 0.0;
    }
    (score * RATING_SCALE).clamp(0.0, RATING_SCALE)
}

fn format_score(score: f32) -> String {
    if score.is_finite() {
        format!("{:.3}", score)
    } else {
        "N/A".to_string()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn from_vector(position: usize, hit: &VectorMatch) -> FusedResult {
    let title = present(&hit.payload.title)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Result {}", position + 1));
    let description = present(&hit.payload.description)
        .or_else(|| present(&hit.payload.text))
        .unwrap_or(FALLBACK_DESCRIPTION)
        .to_string();
    let context = present(&hit.payload.context)
        .unwrap_or(VECTOR_FALLBACK_CONTEXT)
        .to_string();

    FusedResult {
        title,
        description,
        context,
        rating: rating_from_score(hit.score),
        metadata: ResultMetadata::Vector {
            score: format_score(hit.score),
            id: hit.id.clone(),
        },
    }
}

fn from_relational(position: usize, record: &RelationalRecord) -> FusedResult {
    let title = if record.title.is_empty() {
        format!("Database Result {}", position + 1)
    } else {
        record.title.clone()
    };
    let description = present(&record.description)
        .or_else(|| present(&record.content))
        .unwrap_or(FALLBACK_DESCRIPTION)
        .to_string();
    let context = present(&record.context)
        .unwrap_or(RELATIONAL_FALLBACK_CONTEXT)
        .to_string();

    FusedResult {
        title,
        description,
        context,
        rating: rating_from_score(record.relevance),
        metadata: ResultMetadata::Relational {
            id: record.id,
            category: present(&record.category).map(str::to_string),
            created_at: record.created_at,
        },
    }
}

/// Fuse both source lists into one list ordered by rating, descending.
///
/// The sort is stable and vector results are appended first, so a vector
/// result always precedes a relational result with the same rating.
pub fn fuse(vector: &[VectorMatch], relational: &[RelationalRecord]) -> Vec<FusedResult> {
    let mut results: Vec<FusedResult> = vector
        .iter()
        .enumerate()
        .map(|(position, hit)| from_vector(position, hit))
        .chain(
            relational
                .iter()
                .enumerate()
                .map(|(position, record)| from_relational(position, record)),
        )
        .collect();

    results.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    results
}
