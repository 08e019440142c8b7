use crate::errors::RetrievalResult;
use crate::models::{RetrievalRequest, RetrievalResponse};
use crate::services::RetrievalController;
use actix_web::{web, HttpResponse};
use std::time::Instant;

pub async fn run_retrieval(
    controller: web::Data<RetrievalController>,
    request: web::Json<RetrievalRequest>,
) -> RetrievalResult<HttpResponse> {
    let started = Instant::now();
    let context = controller.retrieve(&request).await?;

    Ok(HttpResponse::Ok().json(RetrievalResponse {
        intent: request.intent.clone(),
        mode: request.mode,
        context,
        elapsed_ms: started.elapsed().as_millis(),
        timestamp: chrono::Utc::now(),
    }))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "retrieval"
    }))
}
