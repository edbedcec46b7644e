//! Tiered relevance scoring over candidate rows.
//!
//! A row's effective score depends on where its best keyword hit lands:
//! title beats description beats content body. Rows with no hit at all are
//! dropped rather than padded with a floor score, so every returned record
//! is explainable by at least one keyword.

use crate::types::{RelationalRecord, SearchRow};
use std::cmp::Ordering;

/// Effective score for a title hit.
pub const TITLE_TIER: f32 = 0.9;
/// Effective score for a description hit.
pub const DESCRIPTION_TIER: f32 = 0.7;
/// Effective score for a content-body hit.
pub const CONTENT_TIER: f32 = 0.5;

/// Result cap after ranking.
pub const MAX_RESULTS: usize = 10;

/// Stored relevance assumed when a row has none.
const DEFAULT_STORED_RELEVANCE: f32 = 0.5;

fn contains_any(field: &str, keywords: &[String]) -> bool {
    let lowered = field.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

/// Best tier a row earns for the given keywords, or `None` when no field
/// contains any of them.
pub fn match_tier(row: &SearchRow, keywords: &[String]) -> Option<f32> {
    if contains_any(&row.title, keywords) {
        return Some(TITLE_TIER);
    }
    if row
        .description
        .as_deref()
        .is_some_and(|d| contains_any(d, keywords))
    {
        return Some(DESCRIPTION_TIER);
    }
    if row
        .content
        .as_deref()
        .is_some_and(|c| contains_any(c, keywords))
    {
        return Some(CONTENT_TIER);
    }
    None
}

/// Rank candidate rows by tier, breaking ties with the stored relevance
/// score, and cap the list at [`MAX_RESULTS`].
pub fn rank_rows(rows: Vec<SearchRow>, keywords: &[String]) -> Vec<RelationalRecord> {
    let mut scored: Vec<(f32, SearchRow)> = rows
        .into_iter()
        .filter_map(|row| match_tier(&row, keywords).map(|tier| (tier, row)))
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                let left = a.1.relevance_score.unwrap_or(DEFAULT_STORED_RELEVANCE);
                let right = b.1.relevance_score.unwrap_or(DEFAULT_STORED_RELEVANCE);
                right.partial_cmp(&left).unwrap_or(Ordering::Equal)
            })
    });
    scored.truncate(MAX_RESULTS);

    scored
        .into_iter()
        .map(|(tier, row)| RelationalRecord::from_row(row, tier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, title: &str, description: &str, content: &str, stored: f32) -> SearchRow {
        SearchRow {
            id,
            title: title.to_string(),
            description: Some(description.to_string()),
            content: Some(content.to_string()),
            category: Some("Technology".to_string()),
            context: None,
            relevance_score: Some(stored),
            created_at: None,
        }
    }

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_title_hit_beats_description_and_content() {
        let candidate = row(
            1,
            "Vector Database Overview",
            "vector search explained",
            "all about vectors",
            0.5,
        );
        assert_eq!(match_tier(&candidate, &keywords(&["vector"])), Some(TITLE_TIER));
    }

    #[test]
    fn test_description_hit_when_title_misses() {
        let candidate = row(2, "Storage Guide", "covers vector search", "plain text", 0.5);
        assert_eq!(
            match_tier(&candidate, &keywords(&["vector"])),
            Some(DESCRIPTION_TIER)
        );
    }

    #[test]
    fn test_content_hit_is_the_last_resort() {
        let candidate = row(3, "Storage Guide", "covers indexes", "mentions vectors", 0.5);
        assert_eq!(
            match_tier(&candidate, &keywords(&["vector"])),
            Some(CONTENT_TIER)
        );
    }

    #[test]
    fn test_no_hit_yields_no_tier() {
        let candidate = row(4, "Storage Guide", "covers indexes", "plain text", 0.9);
        assert_eq!(match_tier(&candidate, &keywords(&["graphql"])), None);
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let candidate = row(5, "PostgreSQL Internals", "", "", 0.5);
        assert_eq!(
            match_tier(&candidate, &keywords(&["postgres"])),
            Some(TITLE_TIER)
        );
    }

    #[test]
    fn test_rank_orders_by_tier_then_stored_relevance() {
        let rows = vec![
            row(1, "no hit here", "nothing", "vector body", 0.9),
            row(2, "vector title", "x", "y", 0.2),
            row(3, "z", "vector description", "y", 0.8),
            row(4, "vector title too", "x", "y", 0.7),
        ];
        let ranked = rank_rows(rows, &keywords(&["vector"]));

        let order: Vec<i32> = ranked.iter().map(|r| r.id).collect();
        assert_eq!(order, vec![4, 2, 3, 1]);
        assert_eq!(ranked[0].relevance, TITLE_TIER);
        assert_eq!(ranked[2].relevance, DESCRIPTION_TIER);
        assert_eq!(ranked[3].relevance, CONTENT_TIER);
    }

    #[test]
    fn test_unmatched_rows_are_dropped() {
        let rows = vec![
            row(1, "vector title", "x", "y", 0.5),
            row(2, "unrelated", "unrelated", "unrelated", 0.99),
        ];
        let ranked = rank_rows(rows, &keywords(&["vector"]));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, 1);
    }

    #[test]
    fn test_rank_caps_results_and_all_match() {
        let rows: Vec<SearchRow> = (0..25)
            .map(|i| row(i, &format!("vector doc {}", i), "x", "y", i as f32 / 25.0))
            .collect();
        let ranked = rank_rows(rows, &keywords(&["vector"]));

        assert_eq!(ranked.len(), MAX_RESULTS);
        for record in &ranked {
            assert!(record.title.contains("vector"));
        }
        // Highest stored relevance first within the shared title tier
        assert_eq!(ranked[0].id, 24);
    }

    #[test]
    fn test_missing_stored_relevance_uses_floor() {
        let mut no_score = row(1, "vector a", "x", "y", 0.0);
        no_score.relevance_score = None;
        let rows = vec![no_score, row(2, "vector b", "x", "y", 0.8)];

        let ranked = rank_rows(rows, &keywords(&["vector"]));
        assert_eq!(ranked[0].id, 2);
        assert_eq!(ranked[1].id, 1);
    }
}
