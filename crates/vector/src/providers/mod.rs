//! Embedding strategies and vector store backends.

pub mod hash;
pub mod qdrant;

pub use hash::HashEmbedder;
pub use qdrant::QdrantClient;
