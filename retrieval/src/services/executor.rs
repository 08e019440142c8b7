//! Structured query execution: one catalog entry, bound parameters, one
//! round trip to the graph store.

use crate::catalog;
use crate::errors::{RetrievalError, RetrievalResult};
use crate::graph_db::GraphStore;
use crate::models::ResultRow;
use crate::routing::QueryPlan;
use std::sync::Arc;

pub struct StructuredQueryExecutor {
    store: Arc<dyn GraphStore>,
}

impl StructuredQueryExecutor {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Execute a resolved plan. The parameter contract is enforced before
    /// the store sees the query; a store rejection surfaces as a `Store`
    /// error with no partial rows.
    pub async fn execute(&self, plan: &QueryPlan) -> RetrievalResult<Vec<ResultRow>> {
        let id = plan.query_id.as_deref().ok_or_else(|| {
            RetrievalError::Internal("executor invoked without a resolved query".to_string())
        })?;

        let entry = catalog::lookup(id)
            .ok_or_else(|| RetrievalError::UnknownQuery(id.to_string()))?;

        for name in entry.params {
            if !plan.params.contains_key(*name) {
                return Err(RetrievalError::MissingParameter {
                    query: id.to_string(),
                    name: (*name).to_string(),
                });
            }
        }

        tracing::debug!(query = id, "Executing catalog query");
        self.store.run(entry, &plan.params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_db::mock::MockStore;
    use crate::models::{EntityBundle, Intent, RouteHint};
    use crate::routing::{route, ParamValue};
    use serde_json::json;
    use std::collections::HashMap;

    fn executor_with(store: MockStore) -> StructuredQueryExecutor {
        StructuredQueryExecutor::new(Arc::new(store))
    }

    #[tokio::test]
    async fn executes_a_routed_plan() {
        let mut fields = serde_json::Map::new();
        fields.insert("flight".to_string(), json!("42"));
        let store = MockStore {
            rows: vec![ResultRow::structured(fields)],
            ..Default::default()
        };
        let executor = executor_with(store);

        let entities = EntityBundle {
            routes: RouteHint {
                origin: "LAX".into(),
                destination: "IAX".into(),
            },
            ..Default::default()
        };
        let plan = route(Intent::FlightSearch, &entities);
        let rows = executor.execute(&plan).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("flight"), Some(&json!("42")));
        assert_eq!(rows[0].score, None);
    }

    #[tokio::test]
    async fn unknown_query_id_is_an_error() {
        let executor = executor_with(MockStore::default());
        let plan = QueryPlan {
            query_id: Some("no_such_query".to_string()),
            params: HashMap::new(),
        };

        let err = executor.execute(&plan).await.unwrap_err();
        assert!(matches!(err, RetrievalError::UnknownQuery(id) if id == "no_such_query"));
    }

    #[tokio::test]
    async fn missing_parameter_fails_before_the_store() {
        let store = MockStore::default();
        let executor = StructuredQueryExecutor::new(Arc::new(store));

        let mut params = HashMap::new();
        params.insert("origin".to_string(), ParamValue::Str("LAX".to_string()));
        let plan = QueryPlan {
            query_id: Some("flight_search".to_string()),
            params,
        };

        let err = executor.execute(&plan).await.unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::MissingParameter { ref name, .. } if name == "destination"
        ));
    }

    #[tokio::test]
    async fn store_failure_propagates_as_store_error() {
        let store = MockStore {
            fail_run: true,
            ..Default::default()
        };
        let executor = executor_with(store);

        let plan = route(Intent::SatisfactionQuery, &EntityBundle::default());
        let err = executor.execute(&plan).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Store(_)));
    }
}
