pub mod neo4j_client;

#[cfg(test)]
pub mod mock;

pub use neo4j_client::{FeatureCandidate, GraphStore, Neo4jClient};
