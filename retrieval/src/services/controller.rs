//! Top-level orchestration of the two retrieval legs under an explicit
//! mode switch.
//!
//! The controller always produces a context for a well-formed request: an
//! unroutable intent contributes empty lists, and a store failure in
//! either leg degrades to an empty list with a warning. Only programming
//! errors (unknown catalog id, missing parameter) propagate.

use crate::errors::{RetrievalError, RetrievalResult};
use crate::graph_db::GraphStore;
use crate::models::{Intent, ResultRow, RetrievalContext, RetrievalMode, RetrievalRequest};
use crate::routing::route;
use crate::services::executor::StructuredQueryExecutor;
use crate::services::merger::merge_results;
use crate::services::similarity::{Anchor, SimilarityRetriever, SimilarityVariant};
use airkg_config::RetrievalPolicy;
use std::sync::Arc;

pub struct RetrievalController {
    executor: StructuredQueryExecutor,
    retriever: SimilarityRetriever,
    policy: RetrievalPolicy,
}

impl RetrievalController {
    pub fn new(store: Arc<dyn GraphStore>, policy: RetrievalPolicy) -> Self {
        Self {
            executor: StructuredQueryExecutor::new(store.clone()),
            retriever: SimilarityRetriever::new(store),
            policy,
        }
    }

    pub async fn retrieve(&self, request: &RetrievalRequest) -> RetrievalResult<RetrievalContext> {
        let intent = Intent::from_label(&request.intent);
        let entities = request.entities.normalized();
        let mode = request.mode;
        let top_k = request.top_k.unwrap_or(self.policy.default_top_k).max(1);

        let plan = route(intent, &entities);
        let mut queries_executed: Vec<String> = Vec::new();

        let baseline: Vec<ResultRow> = if mode != RetrievalMode::EmbeddingsOnly {
            match &plan.query_id {
                Some(query_id) => match self.executor.execute(&plan).await {
                    Ok(rows) => {
                        queries_executed.push(query_id.clone());
                        rows
                    }
                    Err(RetrievalError::Store(message)) => {
                        tracing::warn!(
                            query = %query_id,
                            error = %message,
                            "Structured retrieval failed, continuing without it"
                        );
                        Vec::new()
                    }
                    Err(other) => return Err(other),
                },
                None => {
                    tracing::debug!(intent = intent.label(), "No structured query resolved");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let embeddings: Vec<ResultRow> = if self.similarity_applies(mode, intent) {
            let variant = SimilarityVariant::from_question(&request.question);
            let anchor = Anchor::detect(&entities, &request.question);
            match self.retriever.similar(&anchor, top_k, variant).await {
                Ok(rows) => {
                    queries_executed.push(SimilarityRetriever::audit_tag(&anchor, variant));
                    rows
                }
                Err(RetrievalError::Store(message)) => {
                    tracing::warn!(
                        error = %message,
                        "Similarity retrieval failed, continuing without it"
                    );
                    Vec::new()
                }
                Err(other) => return Err(other),
            }
        } else {
            Vec::new()
        };

        let merged = match mode {
            RetrievalMode::BaselineOnly => baseline.clone(),
            RetrievalMode::EmbeddingsOnly => embeddings.clone(),
            RetrievalMode::Hybrid => merge_results(&baseline, &embeddings),
        };

        Ok(RetrievalContext {
            baseline,
            embeddings,
            merged,
            queries_executed,
        })
    }

    fn similarity_applies(&self, mode: RetrievalMode, intent: Intent) -> bool {
        match mode {
            RetrievalMode::BaselineOnly => false,
            RetrievalMode::EmbeddingsOnly => true,
            RetrievalMode::Hybrid => self.policy.allows_similarity(intent.label()),
        }
    }
}
