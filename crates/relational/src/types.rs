//! Typed rows for relational search.

use chrono::{DateTime, Utc};

/// Candidate row as stored in `search_items`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub context: Option<String>,
    pub relevance_score: Option<f32>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Ranked search record handed to the pipeline.
///
/// `relevance` is the effective match tier, not the stored editorial score.
/// The stored score only breaks ties between rows in the same tier.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationalRecord {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub context: Option<String>,
    pub relevance: f32,
    pub created_at: Option<DateTime<Utc>>,
}

impl RelationalRecord {
    pub fn from_row(row: SearchRow, relevance: f32) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            content: row.content,
            category: row.category,
            context: row.context,
            relevance,
            created_at: row.created_at,
        }
    }
}
