//! Shared stubs for pipeline tests.

use enrich_core::{AppError, AppResult};
use enrich_relational::{RelationalRecord, RelationalSearch};
use enrich_vector::{PointId, VectorIndex, VectorMatch, VectorPayload};
use std::sync::Mutex;

/// In-memory [`VectorIndex`] that records every search it receives.
pub struct StubVectorIndex {
    matches: Vec<VectorMatch>,
    failure: Option<String>,
    searches: Mutex<Vec<(String, usize)>>,
}

impl StubVectorIndex {
    pub fn with_matches(matches: Vec<VectorMatch>) -> Self {
        Self {
            matches,
            failure: None,
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            matches: Vec::new(),
            failure: Some(reason.to_string()),
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn searches(&self) -> Vec<(String, usize)> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl VectorIndex for StubVectorIndex {
    fn backend_name(&self) -> &str {
        "stub"
    }

    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<VectorMatch>> {
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), limit));
        match &self.failure {
            Some(reason) => Err(AppError::VectorStore(reason.clone())),
            None => Ok(self.matches.clone()),
        }
    }

    async fn upsert(
        &self,
        _id: PointId,
        _vector: Vec<f32>,
        _payload: VectorPayload,
    ) -> AppResult<()> {
        Ok(())
    }

    async fn ensure_collection(&self) -> AppResult<bool> {
        Ok(false)
    }

    async fn check_connection(&self) -> bool {
        self.failure.is_none()
    }
}

/// In-memory [`RelationalSearch`] that records every prompt it receives.
pub struct StubRelationalSearch {
    records: Vec<RelationalRecord>,
    failure: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StubRelationalSearch {
    pub fn with_records(records: Vec<RelationalRecord>) -> Self {
        Self {
            records,
            failure: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(reason.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RelationalSearch for StubRelationalSearch {
    async fn search(&self, prompt: &str) -> AppResult<Vec<RelationalRecord>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.failure {
            Some(reason) => Err(AppError::Database(reason.clone())),
            None => Ok(self.records.clone()),
        }
    }

    async fn check_connection(&self) -> bool {
        self.failure.is_none()
    }
}
