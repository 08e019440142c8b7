use crate::catalog::CatalogEntry;
use crate::errors::{RetrievalError, RetrievalResult};
use crate::models::ResultRow;
use crate::routing::ParamValue;
use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph, Query};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// One similarity candidate from the ad hoc cosine scan: its presentation
/// fields plus the stored feature vector to score against.
#[derive(Debug, Clone)]
pub struct FeatureCandidate {
    pub fields: Map<String, Value>,
    pub features: Vec<f64>,
}

/// The store operations the retrieval engine needs. The production
/// implementation talks Bolt to Neo4j; tests substitute an in-memory mock.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Run one catalog template with bound parameters. All-or-nothing: a
    /// store rejection yields an error, never partial rows.
    async fn run(
        &self,
        entry: &CatalogEntry,
        params: &HashMap<String, ParamValue>,
    ) -> RetrievalResult<Vec<ResultRow>>;

    /// Nearest-neighbor lookup against a precomputed vector index.
    async fn vector_query(
        &self,
        index: &str,
        top_k: usize,
        embedding: Vec<f64>,
    ) -> RetrievalResult<Vec<ResultRow>>;

    /// Stored feature vector of one journey, if present.
    async fn feature_vector(
        &self,
        journey_id: &str,
        property: &str,
    ) -> RetrievalResult<Option<Vec<f64>>>;

    /// All other journeys carrying the same feature property.
    async fn feature_candidates(
        &self,
        property: &str,
        exclude: &str,
    ) -> RetrievalResult<Vec<FeatureCandidate>>;
}

/// Neo4j client compatible with both local Neo4j and Neo4j AuraDB.
/// Constructed once at startup and shared for the process lifetime.
pub struct Neo4jClient {
    graph: Arc<Graph>,
    uri: String,
}

fn store_err(e: impl std::fmt::Display) -> RetrievalError {
    RetrievalError::Store(e.to_string())
}

fn bind_params(mut q: Query, params: &HashMap<String, ParamValue>) -> Query {
    for (name, value) in params {
        q = match value {
            ParamValue::Str(s) => q.param(name.as_str(), s.as_str()),
            ParamValue::Int(i) => q.param(name.as_str(), *i),
            ParamValue::Float(f) => q.param(name.as_str(), *f),
        };
    }
    q
}

impl Neo4jClient {
    /// Connect and verify the session with a probe query.
    pub async fn new(uri: &str, user: &str, password: &str) -> RetrievalResult<Self> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .db("neo4j")
            .fetch_size(500)
            .max_connections(10)
            .build()
            .map_err(store_err)?;

        let graph = Graph::connect(config).await.map_err(store_err)?;

        let mut result = graph
            .execute(query("RETURN 1 AS probe"))
            .await
            .map_err(store_err)?;
        if result.next().await.map_err(store_err)?.is_some() {
            tracing::info!(uri = %uri, "Neo4j connection established");
        }

        Ok(Self {
            graph: Arc::new(graph),
            uri: uri.to_string(),
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

#[async_trait]
impl GraphStore for Neo4jClient {
    async fn run(
        &self,
        entry: &CatalogEntry,
        params: &HashMap<String, ParamValue>,
    ) -> RetrievalResult<Vec<ResultRow>> {
        let q = bind_params(query(entry.cypher), params);

        let mut stream = self.graph.execute(q).await.map_err(store_err)?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await.map_err(store_err)? {
            let mut fields = Map::new();
            for col in entry.columns {
                let value: Value = row.get(col).unwrap_or(Value::Null);
                fields.insert((*col).to_string(), value);
            }
            rows.push(ResultRow::structured(fields));
        }

        tracing::debug!(query = entry.id, rows = rows.len(), "Catalog query executed");
        Ok(rows)
    }

    async fn vector_query(
        &self,
        index: &str,
        top_k: usize,
        embedding: Vec<f64>,
    ) -> RetrievalResult<Vec<ResultRow>> {
        let cypher = format!(
            "CALL db.index.vector.queryNodes('{}', $k, $embedding) \
             YIELD node, score \
             RETURN node.feedback_ID AS journey, \
                    node.arrival_delay_minutes AS delay, \
                    node.food_satisfaction_score AS food, \
                    score \
             ORDER BY score DESC",
            index
        );
        let q = query(&cypher)
            .param("k", top_k as i64)
            .param("embedding", embedding);

        let mut stream = self.graph.execute(q).await.map_err(store_err)?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await.map_err(store_err)? {
            let mut fields = Map::new();
            for col in ["journey", "delay", "food"] {
                let value: Value = row.get(col).unwrap_or(Value::Null);
                fields.insert(col.to_string(), value);
            }
            let score: f64 = row.get("score").unwrap_or(0.0);
            rows.push(ResultRow::similarity(fields, score));
        }

        Ok(rows)
    }

    async fn feature_vector(
        &self,
        journey_id: &str,
        property: &str,
    ) -> RetrievalResult<Option<Vec<f64>>> {
        let cypher = format!(
            "MATCH (j:Journey {{feedback_ID: $id}}) RETURN j.{} AS features LIMIT 1",
            property
        );
        let q = query(&cypher).param("id", journey_id);

        let mut stream = self.graph.execute(q).await.map_err(store_err)?;
        if let Some(row) = stream.next().await.map_err(store_err)? {
            return Ok(row.get::<Vec<f64>>("features").ok());
        }
        Ok(None)
    }

    async fn feature_candidates(
        &self,
        property: &str,
        exclude: &str,
    ) -> RetrievalResult<Vec<FeatureCandidate>> {
        let cypher = format!(
            "MATCH (j:Journey) \
             WHERE j.{prop} IS NOT NULL AND j.feedback_ID <> $exclude \
             RETURN j.feedback_ID AS journey, \
                    j.arrival_delay_minutes AS delay, \
                    j.food_satisfaction_score AS food, \
                    j.{prop} AS features",
            prop = property
        );
        let q = query(&cypher).param("exclude", exclude);

        let mut stream = self.graph.execute(q).await.map_err(store_err)?;
        let mut candidates = Vec::new();
        while let Some(row) = stream.next().await.map_err(store_err)? {
            // a journey without a readable vector cannot be ranked
            let features: Vec<f64> = match row.get("features") {
                Ok(f) => f,
                Err(_) => continue,
            };
            let mut fields = Map::new();
            for col in ["journey", "delay", "food"] {
                let value: Value = row.get(col).unwrap_or(Value::Null);
                fields.insert(col.to_string(), value);
            }
            candidates.push(FeatureCandidate { fields, features });
        }

        Ok(candidates)
    }
}
