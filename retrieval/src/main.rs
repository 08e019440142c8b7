use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;

use airkg_config::AppConfig;
use airkg_observability::init_tracing_for;
use retrieval::graph_db::{GraphStore, Neo4jClient};
use retrieval::handlers;
use retrieval::services::RetrievalController;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing_for("retrieval");

    let config = AppConfig::from_env();

    tracing::info!("Connecting to Neo4j at {}...", config.neo4j_uri);
    let client = Neo4jClient::new(&config.neo4j_uri, &config.neo4j_user, &config.neo4j_password)
        .await
        .context("failed to connect to Neo4j")?;
    let store: Arc<dyn GraphStore> = Arc::new(client);

    let controller = web::Data::new(RetrievalController::new(store, config.policy.clone()));

    tracing::info!("Starting retrieval service on port {}", config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(controller.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                web::scope("/api/retrieval")
                    .route("/query", web::post().to(handlers::run_retrieval)),
            )
            .route("/health", web::get().to(handlers::health))
    })
    .bind(("0.0.0.0", config.port))
    .with_context(|| format!("failed to bind port {}", config.port))?
    .run()
    .await?;

    Ok(())
}
