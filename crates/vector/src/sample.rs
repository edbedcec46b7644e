//! Sample documents used to seed a fresh context collection.

use crate::client::VectorIndex;
use crate::embedding::Embedder;
use crate::types::{PointId, VectorPayload};
use enrich_core::AppResult;

/// One seed document for the context collection.
#[derive(Debug, Clone, Copy)]
pub struct SampleDocument {
    pub id: u64,
    pub title: &'static str,
    pub description: &'static str,
    pub text: &'static str,
    pub context: &'static str,
}

impl SampleDocument {
    /// Payload stored alongside the document's embedding.
    pub fn payload(&self) -> VectorPayload {
        VectorPayload::default()
            .with_title(self.title)
            .with_description(self.description)
            .with_text(self.text)
            .with_context(self.context)
    }
}

/// Seed documents covering the same topics as the relational sample rows,
/// so development queries hit both sources.
pub const SAMPLE_DOCUMENTS: &[SampleDocument] = &[
    SampleDocument {
        id: 1,
        title: "Machine Learning Fundamentals",
        description: "Comprehensive guide to machine learning concepts and algorithms",
        text: "Machine learning enables computers to learn from data without being explicitly programmed.",
        context: "Educational content about artificial intelligence",
    },
    SampleDocument {
        id: 2,
        title: "React Development Guide",
        description: "Best practices for building modern React applications",
        text: "React is a powerful library for building user interfaces with component-based architecture.",
        context: "Frontend development tutorial",
    },
    SampleDocument {
        id: 3,
        title: "Vector Database Technology",
        description: "Understanding vector databases for similarity search",
        text: "Vector databases store high-dimensional vectors and enable efficient similarity search operations.",
        context: "Database technology overview",
    },
    SampleDocument {
        id: 4,
        title: "RESTful API Design",
        description: "Principles of designing RESTful web services",
        text: "RESTful APIs follow stateless architecture principles for scalable web services.",
        context: "Backend development guide",
    },
    SampleDocument {
        id: 5,
        title: "Database Optimization",
        description: "Techniques for optimizing database performance",
        text: "Database optimization involves indexing, query tuning, and proper schema design.",
        context: "Database administration guide",
    },
];

/// Embed and upsert every sample document. Returns the number inserted.
pub async fn seed_collection(
    index: &dyn VectorIndex,
    embedder: &dyn Embedder,
) -> AppResult<usize> {
    for document in SAMPLE_DOCUMENTS {
        let vector = embedder.embed(document.text).await?;
        index
            .upsert(PointId::Int(document.id), vector, document.payload())
            .await?;
    }

    tracing::info!(
        "Seeded {} sample documents into the context collection",
        SAMPLE_DOCUMENTS.len()
    );
    Ok(SAMPLE_DOCUMENTS.len())
}
