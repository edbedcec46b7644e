//! Vector index crate for the prompt enrichment service.
//!
//! This crate provides the similarity-search half of retrieval: a
//! trait-based vector index abstraction, a Qdrant REST implementation, and
//! an injectable embedding capability with a deterministic default.
//!
//! # Backends
//! - **Qdrant**: REST client for a single collection (default)
//!
//! # Example
//! ```no_run
//! use enrich_vector::{create_embedder, QdrantClient, VectorIndex, EMBEDDING_DIMENSIONS};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let embedder = create_embedder("hash", EMBEDDING_DIMENSIONS)?;
//! let index = QdrantClient::new("http://localhost:6333", "prompt_context", 384, embedder)?;
//! let matches = index.search("vector databases", 3).await?;
//! println!("{} matches", matches.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod embedding;
pub mod providers;
pub mod sample;
pub mod types;

// Re-export main types
pub use client::VectorIndex;
pub use embedding::{create_embedder, Embedder, EMBEDDING_DIMENSIONS};
pub use providers::{HashEmbedder, QdrantClient};
pub use sample::{seed_collection, SampleDocument, SAMPLE_DOCUMENTS};
pub use types::{PointId, VectorMatch, VectorPayload};
