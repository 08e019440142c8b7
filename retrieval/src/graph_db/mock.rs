//! In-memory GraphStore used by executor and controller tests.

use super::{FeatureCandidate, GraphStore};
use crate::catalog::CatalogEntry;
use crate::errors::{RetrievalError, RetrievalResult};
use crate::models::ResultRow;
use crate::routing::ParamValue;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockStore {
    /// Rows returned by `run`.
    pub rows: Vec<ResultRow>,
    /// Rows returned by `vector_query`.
    pub vector_rows: Vec<ResultRow>,
    /// Journey id -> stored feature vector.
    pub features: HashMap<String, Vec<f64>>,
    /// Candidates returned by `feature_candidates`.
    pub candidates: Vec<FeatureCandidate>,
    /// When set, `run` fails with a Store error.
    pub fail_run: bool,
    /// Catalog ids seen by `run`, in call order.
    pub executed: Mutex<Vec<String>>,
}

#[async_trait]
impl GraphStore for MockStore {
    async fn run(
        &self,
        entry: &CatalogEntry,
        _params: &HashMap<String, ParamValue>,
    ) -> RetrievalResult<Vec<ResultRow>> {
        self.executed.lock().unwrap().push(entry.id.to_string());
        if self.fail_run {
            return Err(RetrievalError::Store("connection reset".to_string()));
        }
        Ok(self.rows.clone())
    }

    async fn vector_query(
        &self,
        _index: &str,
        top_k: usize,
        _embedding: Vec<f64>,
    ) -> RetrievalResult<Vec<ResultRow>> {
        Ok(self.vector_rows.iter().take(top_k).cloned().collect())
    }

    async fn feature_vector(
        &self,
        journey_id: &str,
        _property: &str,
    ) -> RetrievalResult<Option<Vec<f64>>> {
        Ok(self.features.get(journey_id).cloned())
    }

    async fn feature_candidates(
        &self,
        _property: &str,
        exclude: &str,
    ) -> RetrievalResult<Vec<FeatureCandidate>> {
        Ok(self
            .candidates
            .iter()
            .filter(|c| {
                c.fields
                    .get("journey")
                    .and_then(|v| v.as_str())
                    .map(|id| id != exclude)
                    .unwrap_or(true)
            })
            .cloned()
            .collect())
    }
}

impl MockStore {
    pub fn executed_ids(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}
