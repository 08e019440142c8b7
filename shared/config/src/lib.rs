pub mod policy;

pub use policy::RetrievalPolicy;

use std::env;

/// Process-wide configuration, resolved once at startup and passed down by
/// value. Connection credentials default to a local development store.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub port: u16,
    pub policy: RetrievalPolicy,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            neo4j_uri: env::var("NEO4J_URI")
                .unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            neo4j_user: env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string()),
            neo4j_password: env::var("NEO4J_PASSWORD")
                .unwrap_or_else(|_| "password".to_string()),
            port: env::var("RETRIEVAL_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8008),
            policy: RetrievalPolicy::from_env_path(),
        }
    }
}
