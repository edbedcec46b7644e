//! Enrichment pipeline crate for the prompt enrichment service.
//!
//! The pipeline runs one prompt through three stages:
//! 1. Context enrichment against the vector index ([`ContextEnricher`])
//! 2. Concurrent retrieval from both sources (vector search with the
//!    original prompt, relational search with the enriched one)
//! 3. Fusion into a single rated result list ([`fusion::fuse`])
//!
//! Source faults degrade rather than abort: a failed source contributes no
//! records and the output carries a [`Degradation`] naming it, so callers
//! can report partial results honestly.

pub mod enricher;
pub mod fusion;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types
pub use enricher::ContextEnricher;
pub use fusion::{fuse, rating_from_score};
pub use types::{
    ContextStatus, Degradation, EnrichedPrompt, FusedResult, PipelineOutput, ResultMetadata,
    RetrievalSource, SourceOutcome,
};

use enrich_core::AppResult;
use enrich_relational::RelationalSearch;
use enrich_vector::VectorIndex;
use std::sync::Arc;

/// Neighbors requested from the vector index during retrieval. Enrichment
/// uses its own, smaller limit.
pub const RETRIEVAL_SEARCH_LIMIT: usize = 5;

/// The full enrich-retrieve-fuse flow over both retrieval sources.
pub struct EnrichmentPipeline {
    enricher: ContextEnricher,
    vector: Arc<dyn VectorIndex>,
    relational: Arc<dyn RelationalSearch>,
}

impl EnrichmentPipeline {
    pub fn new(
        vector: Arc<dyn VectorIndex>,
        relational: Arc<dyn RelationalSearch>,
    ) -> AppResult<Self> {
        Ok(Self {
            enricher: ContextEnricher::new(vector.clone())?,
            vector,
            relational,
        })
    }

    /// Run one prompt through the pipeline. Never fails; source faults come
    /// back as degradations on the output.
    pub async fn run(&self, prompt: &str) -> PipelineOutput {
        let enriched = self.enricher.enrich(prompt).await;

        // Vector search sees the original prompt; the bracketed context
        // clause would only skew its embedding. Relational search gets the
        // enriched text.
        let (vector_result, relational_result) = futures::join!(
            self.vector.search(prompt, RETRIEVAL_SEARCH_LIMIT),
            self.relational.search(&enriched.text),
        );

        let vector_outcome = SourceOutcome::from_result(vector_result);
        let relational_outcome = SourceOutcome::from_result(relational_result);

        let mut degradations = Vec::new();
        if let ContextStatus::Unavailable { reason } = &enriched.status {
            degradations.push(Degradation {
                source: RetrievalSource::Enrichment,
                reason: reason.clone(),
            });
        }
        if let Some(reason) = vector_outcome.degraded_reason() {
            degradations.push(Degradation {
                source: RetrievalSource::Vector,
                reason: reason.to_string(),
            });
        }
        if let Some(reason) = relational_outcome.degraded_reason() {
            degradations.push(Degradation {
                source: RetrievalSource::Relational,
                reason: reason.to_string(),
            });
        }

        let results = fusion::fuse(vector_outcome.records(), relational_outcome.records());

        PipelineOutput {
            original_prompt: prompt.to_string(),
            enriched_prompt: enriched.text,
            results,
            degradations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubRelationalSearch, StubVectorIndex};
    use enrich_relational::RelationalRecord;
    use enrich_vector::{PointId, VectorMatch, VectorPayload};

    fn vector_hit(id: u64, score: f32, text: &str) -> VectorMatch {
        VectorMatch {
            id: PointId::Int(id),
            score,
            payload: VectorPayload::default().with_text(text),
        }
    }

    fn relational_record(id: i32, title: &str, relevance: f32) -> RelationalRecord {
        RelationalRecord {
            id,
            title: title.to_string(),
            description: None,
            content: None,
            category: None,
            context: None,
            relevance,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_both_sources_down_yields_empty_results() {
        let pipeline = EnrichmentPipeline::new(
            Arc::new(StubVectorIndex::failing("index offline")),
            Arc::new(StubRelationalSearch::failing("pool exhausted")),
        )
        .unwrap();

        let output = pipeline.run("any prompt").await;

        assert!(output.results.is_empty());
        assert_eq!(output.original_prompt, "any prompt");
        // Enrichment shares the vector index, so it degrades too
        let sources: Vec<RetrievalSource> =
            output.degradations.iter().map(|d| d.source).collect();
        assert_eq!(
            sources,
            vec![
                RetrievalSource::Enrichment,
                RetrievalSource::Vector,
                RetrievalSource::Relational,
            ]
        );
        // The prompt passed through enrichment unchanged
        assert_eq!(output.enriched_prompt, "any prompt");
    }

    #[tokio::test]
    async fn test_results_from_both_sources_are_fused_and_rated() {
        let pipeline = EnrichmentPipeline::new(
            Arc::new(StubVectorIndex::with_matches(vec![vector_hit(
                1,
                0.9,
                "Vectors enable similarity search.",
            )])),
            Arc::new(StubRelationalSearch::with_records(vec![relational_record(
                2,
                "Vector Database Technology",
                0.9,
            )])),
        )
        .unwrap();

        let output = pipeline.run("vector databases").await;

        assert_eq!(output.results.len(), 2);
        assert_eq!(output.results[0].rating, 4.5);
        assert_eq!(output.results[1].rating, 4.5);
        // Stable tie: vector entry first
        assert!(matches!(
            output.results[0].metadata,
            ResultMetadata::Vector { .. }
        ));
        assert!(matches!(
            output.results[1].metadata,
            ResultMetadata::Relational { .. }
        ));
        assert!(output.degradations.is_empty());
        assert!(output.enriched_prompt.starts_with("vector databases [Context:"));
    }

    #[tokio::test]
    async fn test_vector_searches_original_prompt_at_retrieval_limit() {
        let vector = Arc::new(StubVectorIndex::with_matches(vec![vector_hit(
            1, 0.8, "snippet",
        )]));
        let pipeline = EnrichmentPipeline::new(
            vector.clone(),
            Arc::new(StubRelationalSearch::with_records(Vec::new())),
        )
        .unwrap();

        pipeline.run("raw prompt").await;

        let searches = vector.searches();
        assert_eq!(searches.len(), 2);
        // First the enrichment lookup, then retrieval, both with the raw prompt
        assert_eq!(searches[0].0, "raw prompt");
        assert_eq!(searches[1], ("raw prompt".to_string(), RETRIEVAL_SEARCH_LIMIT));
    }

    #[tokio::test]
    async fn test_relational_search_receives_the_enriched_prompt() {
        let relational = Arc::new(StubRelationalSearch::with_records(Vec::new()));
        let pipeline = EnrichmentPipeline::new(
            Arc::new(StubVectorIndex::with_matches(vec![vector_hit(
                1, 0.8, "snippet",
            )])),
            relational.clone(),
        )
        .unwrap();

        pipeline.run("raw prompt").await;

        let prompts = relational.prompts();
        assert_eq!(prompts, vec!["raw prompt [Context: snippet...]".to_string()]);
    }

    #[tokio::test]
    async fn test_one_source_down_still_returns_the_other() {
        let pipeline = EnrichmentPipeline::new(
            Arc::new(StubVectorIndex::with_matches(vec![vector_hit(
                1, 0.8, "snippet",
            )])),
            Arc::new(StubRelationalSearch::failing("pool exhausted")),
        )
        .unwrap();

        let output = pipeline.run("prompt").await;

        assert_eq!(output.results.len(), 1);
        assert_eq!(output.degradations.len(), 1);
        assert_eq!(output.degradations[0].source, RetrievalSource::Relational);
        assert!(output.degradations[0].reason.contains("pool exhausted"));
    }
}
