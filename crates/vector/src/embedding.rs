//! Text embedding capability.
//!
//! Embedding is injected rather than built in: production-quality ranking
//! needs a trained text-embedding model, which this crate does not ship.
//! The deterministic hash strategy keeps development seeding and ranking
//! tests stable without one.

use crate::providers::hash::HashEmbedder;
use enrich_core::{AppError, AppResult};
use std::sync::Arc;

/// Default width of the embedding space.
///
/// Matches compact sentence-transformer models (e.g. all-MiniLM-L6-v2),
/// which the store's collections are sized for.
pub const EMBEDDING_DIMENSIONS: usize = 384;

/// Trait for embedding strategies.
#[async_trait::async_trait]
pub trait Embedder: Send + Sync + std::fmt::Debug {
    /// Strategy name (e.g., "hash")
    fn strategy_name(&self) -> &str;

    /// Width of produced vectors
    fn dimensions(&self) -> usize;

    /// Embed a single text into a fixed-width vector.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;
}

/// Create an embedder by strategy name.
pub fn create_embedder(strategy: &str, dimensions: usize) -> AppResult<Arc<dyn Embedder>> {
    match strategy {
        "hash" => Ok(Arc::new(HashEmbedder::new(dimensions))),

        "model" => Err(AppError::Embedding(
            "Model-backed embedding is not implemented yet. Use the 'hash' strategy.".to_string(),
        )),

        other => Err(AppError::Embedding(format!(
            "Unknown embedding strategy: '{}'. Supported strategies: hash",
            other
        ))),
    }
}
