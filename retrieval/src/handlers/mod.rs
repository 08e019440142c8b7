pub mod retrieval_handler;

pub use retrieval_handler::{health, run_retrieval};
