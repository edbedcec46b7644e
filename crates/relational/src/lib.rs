//! Relational search crate for the prompt enrichment service.
//!
//! This crate provides the structured half of retrieval: keyword extraction
//! from prompts, tiered substring matching over a Postgres `search_items`
//! table, and the schema bootstrap used at startup.
//!
//! Searches run in two steps: the database narrows candidates with pattern
//! predicates, then in-process scoring assigns tiered relevance and caps the
//! result list. See [`scoring`] for the tier rules.

pub mod keywords;
pub mod schema;
pub mod scoring;
pub mod store;
pub mod types;

// Re-export main types
pub use keywords::{extract_keywords, MAX_KEYWORDS};
pub use schema::{ensure_schema, seed_sample_rows, SampleRow, SAMPLE_ROWS};
pub use scoring::{match_tier, rank_rows, MAX_RESULTS};
pub use store::{PgSearchStore, RelationalSearch};
pub use types::{RelationalRecord, SearchRow};
