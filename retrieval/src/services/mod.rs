pub mod controller;
pub mod executor;
pub mod merger;
pub mod similarity;

pub use controller::RetrievalController;
pub use executor::StructuredQueryExecutor;
pub use merger::merge_results;
pub use similarity::{Anchor, SimilarityRetriever, SimilarityVariant};
