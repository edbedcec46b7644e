//! Vector index abstraction.

use crate::types::{PointId, VectorMatch, VectorPayload};
use enrich_core::AppResult;

/// Nearest-neighbor index over fixed-width embeddings.
///
/// Implementations own their connections and report faults as typed errors.
/// Whether a fault degrades the response or aborts it is the caller's
/// decision, not the client's.
#[async_trait::async_trait]
pub trait VectorIndex: Send + Sync {
    /// Backend name, used in logs.
    fn backend_name(&self) -> &str;

    /// Top-`limit` nearest neighbors for `query`, closest first.
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<VectorMatch>>;

    /// Insert or replace a single point.
    async fn upsert(&self, id: PointId, vector: Vec<f32>, payload: VectorPayload)
        -> AppResult<()>;

    /// Create the backing collection when it does not exist yet.
    ///
    /// Returns `true` when a new collection was created, `false` when one
    /// was already there.
    async fn ensure_collection(&self) -> AppResult<bool>;

    /// Cheap connectivity probe for health reporting.
    async fn check_connection(&self) -> bool;
}
