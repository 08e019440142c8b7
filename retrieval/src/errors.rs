use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Unknown catalog query: {0}")]
    UnknownQuery(String),

    #[error("Query '{query}' is missing required parameter '{name}'")]
    MissingParameter { query: String, name: String },

    #[error("Graph store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for RetrievalError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            RetrievalError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
            RetrievalError::Store(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

pub type RetrievalResult<T> = Result<T, RetrievalError>;
