//! Qdrant vector store client over its REST API.

use crate::client::VectorIndex;
use crate::embedding::Embedder;
use crate::types::{PointId, VectorMatch, VectorPayload};
use enrich_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default per-request timeout. Without one, a stalled store stalls every
/// enrichment request for as long as the socket stays open.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Cosine is the only metric the enrichment pipeline is tuned for.
const DISTANCE_METRIC: &str = "Cosine";

/// Collection creation request body.
#[derive(Debug, Serialize)]
struct CreateCollectionRequest {
    vectors: VectorParams,
}

#[derive(Debug, Serialize)]
struct VectorParams {
    size: usize,
    distance: &'static str,
}

/// Point upsert request body.
#[derive(Debug, Serialize)]
struct UpsertRequest {
    points: Vec<UpsertPoint>,
}

#[derive(Debug, Serialize)]
struct UpsertPoint {
    id: PointId,
    vector: Vec<f32>,
    payload: VectorPayload,
}

/// Nearest-neighbor search request body.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
}

/// Search response; the store wraps every payload in a `result` envelope.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    result: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    id: PointId,
    score: f32,
    #[serde(default)]
    payload: Option<VectorPayload>,
}

/// Client for a single Qdrant collection.
pub struct QdrantClient {
    base_url: String,
    collection: String,
    dimensions: usize,
    api_key: Option<String>,
    embedder: Arc<dyn Embedder>,
    client: reqwest::Client,
}

impl QdrantClient {
    /// Create a client with the default request timeout.
    pub fn new(
        base_url: impl Into<String>,
        collection: impl Into<String>,
        dimensions: usize,
        embedder: Arc<dyn Embedder>,
    ) -> AppResult<Self> {
        Ok(Self {
            base_url: base_url.into(),
            collection: collection.into(),
            dimensions,
            api_key: None,
            embedder,
            client: build_http_client(DEFAULT_TIMEOUT)?,
        })
    }

    /// Replace the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> AppResult<Self> {
        self.client = build_http_client(timeout)?;
        Ok(self)
    }

    /// Send an `api-key` header with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn collection_url(&self, suffix: &str) -> String {
        format!("{}/collections/{}{}", self.base_url, self.collection, suffix)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("api-key", key),
            None => request,
        }
    }
}

fn build_http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::VectorStore(format!("Failed to build HTTP client: {}", e)))
}

/// Read the response body for an error report, falling back when even that
/// fails.
async fn error_text(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string())
}

#[async_trait::async_trait]
impl VectorIndex for QdrantClient {
    fn backend_name(&self) -> &str {
        "qdrant"
    }

    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<VectorMatch>> {
        let vector = self.embedder.embed(query).await?;
        let url = self.collection_url("/points/search");
        let request = SearchRequest {
            vector: &vector,
            limit,
            with_payload: true,
        };

        tracing::debug!(
            "Searching collection '{}' for {} neighbors",
            self.collection,
            limit
        );

        let response = self
            .authorize(self.client.post(&url))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::VectorStore(format!("Failed to send search request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::VectorStore(format!(
                "Search failed with status {}: {}",
                status,
                error_text(response).await
            )));
        }

        let envelope: SearchEnvelope = response.json().await.map_err(|e| {
            AppError::VectorStore(format!("Failed to parse search response: {}", e))
        })?;

        Ok(envelope
            .result
            .into_iter()
            .map(|point| VectorMatch {
                id: point.id,
                score: point.score,
                payload: point.payload.unwrap_or_default(),
            })
            .collect())
    }

    async fn upsert(
        &self,
        id: PointId,
        vector: Vec<f32>,
        payload: VectorPayload,
    ) -> AppResult<()> {
        let url = format!("{}?wait=true", self.collection_url("/points"));
        let request = UpsertRequest {
            points: vec![UpsertPoint {
                id,
                vector,
                payload,
            }],
        };

        let response = self
            .authorize(self.client.put(&url))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::VectorStore(format!("Failed to send upsert request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::VectorStore(format!(
                "Upsert failed with status {}: {}",
                status,
                error_text(response).await
            )));
        }

        Ok(())
    }

    async fn ensure_collection(&self) -> AppResult<bool> {
        let url = self.collection_url("");

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| AppError::VectorStore(format!("Failed to probe collection: {}", e)))?;

        if response.status().is_success() {
            tracing::debug!("Collection '{}' already exists", self.collection);
            return Ok(false);
        }

        if response.status() != reqwest::StatusCode::NOT_FOUND {
            let status = response.status();
            return Err(AppError::VectorStore(format!(
                "Collection probe failed with status {}: {}",
                status,
                error_text(response).await
            )));
        }

        let request = CreateCollectionRequest {
            vectors: VectorParams {
                size: self.dimensions,
                distance: DISTANCE_METRIC,
            },
        };

        let response = self
            .authorize(self.client.put(&url))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::VectorStore(format!("Failed to create collection: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::VectorStore(format!(
                "Collection creation failed with status {}: {}",
                status,
                error_text(response).await
            )));
        }

        tracing::info!(
            "Created collection '{}' ({} dimensions, {} distance)",
            self.collection,
            self.dimensions,
            DISTANCE_METRIC
        );
        Ok(true)
    }

    async fn check_connection(&self) -> bool {
        let url = format!("{}/collections", self.base_url);
        match self.authorize(self.client.get(&url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Vector store connectivity probe failed: {}", e);
                false
            }
        }
    }
}
