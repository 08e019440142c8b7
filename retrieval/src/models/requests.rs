use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityBundle, RetrievalContext};

/// Which retrieval legs run for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetrievalMode {
    #[serde(rename = "baseline-only")]
    BaselineOnly,
    #[serde(rename = "embeddings-only")]
    EmbeddingsOnly,
    #[default]
    #[serde(rename = "hybrid")]
    Hybrid,
}

/// One retrieval request: the user's question plus the classifier and
/// extractor output for it.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalRequest {
    #[serde(default)]
    pub question: String,
    pub intent: String,
    #[serde(default)]
    pub entities: EntityBundle,
    #[serde(default)]
    pub mode: RetrievalMode,
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RetrievalResponse {
    pub intent: String,
    pub mode: RetrievalMode,
    pub context: RetrievalContext,
    pub elapsed_ms: u128,
    pub timestamp: DateTime<Utc>,
}
