// ABOUTME: Speccraft server entry point
// ABOUTME: Wires config, database, pipeline, and the HTTP router together

use std::net::SocketAddr;

use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use speccraft_ai::AiConfig;
use speccraft_api::{create_spec_router, AppState};
use speccraft_history::HistoryStorage;
use speccraft_pipeline::SpecPipeline;

mod config;

use config::ServerConfig;

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Speccraft API" }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    println!("🚀 Starting Speccraft server...");
    println!("📡 Server will run on http://localhost:{}", config.port);
    println!("🔗 CORS origin: {}", config.cors_origin);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let history = HistoryStorage::new(pool);
    history.init_schema().await?;

    let ai_config = AiConfig::from_env();
    if ai_config.api_key.is_none() {
        info!("ANTHROPIC_API_KEY not set - serving deterministic mock specifications");
    } else {
        info!("Text-generation backend configured: model={}", ai_config.model);
    }
    let pipeline = SpecPipeline::from_config(&ai_config);

    let state = AppState::new(pipeline, history);

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(root))
        .nest("/generate", create_spec_router())
        .with_state(state)
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    println!("✅ Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
