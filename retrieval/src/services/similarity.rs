//! Similarity retrieval over journey feature vectors.
//!
//! Two ways to obtain a query vector: a keyword-weighted proxy built from
//! the question text (served by the precomputed vector index), or the
//! stored feature vector of an anchor journey (ranked ad hoc by cosine).
//! Two feature variants coexist, selected by what the question talks about.

use crate::errors::RetrievalResult;
use crate::graph_db::GraphStore;
use crate::models::{EntityBundle, ResultRow};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// Precomputed cosine index over the journey proxy embeddings.
pub const EMBEDDING_INDEX: &str = "journey_embedding_index";

/// Proxy vector dimensions: delay, food, miles, legs.
pub const PROXY_DIMENSIONS: usize = 4;

const DELAY_TERMS: &[&str] = &["delay", "late", "on-time", "on time", "punctual"];
const FOOD_TERMS: &[&str] = &["food", "meal", "satisfaction", "rating", "score"];
const MILES_TERMS: &[&str] = &["mile", "miles", "distance", "loyalty"];
const LEGS_TERMS: &[&str] = &["leg", "legs", "stopover", "connection"];

const EXPERIENCE_TERMS: &[&str] = &["food", "meal", "satisfaction", "comfort", "experience"];

lazy_static! {
    static ref JOURNEY_ID: Regex = Regex::new(r"^F_\d+$").unwrap();
    static ref JOURNEY_ID_IN_TEXT: Regex = Regex::new(r"\bF_\d+\b").unwrap();
}

/// Which stored feature set a similarity lookup reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityVariant {
    /// Arrival delay and leg count.
    Operational,
    /// Food satisfaction and flown miles.
    Experience,
}

impl SimilarityVariant {
    pub fn feature_property(self) -> &'static str {
        match self {
            SimilarityVariant::Operational => "feature_operational",
            SimilarityVariant::Experience => "feature_experience",
        }
    }

    /// Lexical routing: experience wording selects the experience features;
    /// everything else, including ambiguous questions, stays operational.
    pub fn from_question(text: &str) -> Self {
        let lower = text.to_lowercase();
        if contains_any(&lower, DELAY_TERMS) || contains_any(&lower, LEGS_TERMS) {
            SimilarityVariant::Operational
        } else if contains_any(&lower, EXPERIENCE_TERMS) {
            SimilarityVariant::Experience
        } else {
            SimilarityVariant::Operational
        }
    }
}

/// What the similarity lookup is anchored to.
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// A journey already in the store, referenced by id.
    Journey(String),
    /// Free question text, vectorized through the keyword proxy.
    Text(String),
}

impl Anchor {
    /// Prefer an explicit journey id from the extracted entities, then one
    /// mentioned inline in the question, then the question text itself.
    pub fn detect(entities: &EntityBundle, question: &str) -> Anchor {
        if let Some(id) = entities.journeys.iter().find(|j| JOURNEY_ID.is_match(j)) {
            return Anchor::Journey(id.clone());
        }
        if let Some(m) = JOURNEY_ID_IN_TEXT.find(question) {
            return Anchor::Journey(m.as_str().to_string());
        }
        Anchor::Text(question.to_string())
    }
}

fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| text.contains(t))
}

/// Build the fixed-dimension proxy vector from question keywords. A text
/// with no recognized keyword would produce the zero vector, which the
/// index cannot score against; it is replaced by the uniform vector before
/// normalization.
pub fn keyword_vector(text: &str) -> Vec<f64> {
    let lower = text.to_lowercase();
    let mut v = vec![0.0; PROXY_DIMENSIONS];
    for (dim, terms) in [DELAY_TERMS, FOOD_TERMS, MILES_TERMS, LEGS_TERMS]
        .iter()
        .enumerate()
    {
        if contains_any(&lower, terms) {
            v[dim] = 1.0;
        }
    }
    if v.iter().all(|&x| x == 0.0) {
        v = vec![1.0; PROXY_DIMENSIONS];
    }
    l2_normalize(v)
}

pub fn l2_normalize(mut v: Vec<f64>) -> Vec<f64> {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
    v
}

pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a_sq = 0.0;
    let mut norm_b_sq = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a_sq += x * x;
        norm_b_sq += y * y;
    }

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

pub struct SimilarityRetriever {
    store: Arc<dyn GraphStore>,
}

impl SimilarityRetriever {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Ranked similar journeys, strictly descending by score, at most
    /// `top_k` of them. An anchor journey absent from the store yields an
    /// empty list, not an error.
    pub async fn similar(
        &self,
        anchor: &Anchor,
        top_k: usize,
        variant: SimilarityVariant,
    ) -> RetrievalResult<Vec<ResultRow>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        match anchor {
            Anchor::Text(text) => {
                let embedding = keyword_vector(text);
                self.store
                    .vector_query(EMBEDDING_INDEX, top_k, embedding)
                    .await
            }
            Anchor::Journey(id) => {
                let property = variant.feature_property();
                let anchor_vec = match self.store.feature_vector(id, property).await? {
                    Some(v) => v,
                    None => {
                        tracing::debug!(journey = %id, "Anchor journey has no stored features");
                        return Ok(Vec::new());
                    }
                };

                let mut rows: Vec<ResultRow> = self
                    .store
                    .feature_candidates(property, id)
                    .await?
                    .into_iter()
                    .map(|candidate| {
                        let score = cosine_similarity(&anchor_vec, &candidate.features);
                        ResultRow::similarity(candidate.fields, score)
                    })
                    .collect();

                // stable sort keeps store iteration order for ties
                rows.sort_by(|a, b| {
                    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
                });
                rows.truncate(top_k);
                Ok(rows)
            }
        }
    }

    /// Audit label recorded in `queries_executed` for a similarity leg.
    pub fn audit_tag(anchor: &Anchor, variant: SimilarityVariant) -> String {
        match anchor {
            Anchor::Text(_) => format!("vector::{}", EMBEDDING_INDEX),
            Anchor::Journey(_) => format!("cosine::{}", variant.feature_property()),
        }
    }
}
