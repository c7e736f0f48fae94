//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        db::DbAdapter, extractor::PdfExtractAdapter, summarize_llm::OpenAiSummaryAdapter,
        translate_llm::OpenAiTranslationAdapter, tts::OpenAiTtsAdapter,
    },
    catalog::load_catalog,
    config::Config,
    error::ApiError,
    web::{self, rest::ApiDoc, state::AppState},
};
use async_openai::{config::OpenAIConfig, types::SpeechModel, Client};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let db_adapter = Arc::new(DbAdapter::new(db_pool.clone()));
    info!("Running database migrations...");
    db_adapter.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Load the Catalog & Ensure Content Directories ---
    let catalog = load_catalog(&config.catalog_path)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    info!("Loaded catalog with {} documents", catalog.len());

    std::fs::create_dir_all(&config.pdf_dir)?;
    std::fs::create_dir_all(&config.tts_dir)?;

    // --- 4. Initialize Service Adapters ---
    let openai_config = OpenAIConfig::new().with_api_key(
        config
            .openai_api_key
            .as_ref()
            .ok_or_else(|| ApiError::Internal("OPENAI_API_KEY is required".to_string()))?,
    );
    let openai_client = Client::with_config(openai_config);

    let summarizer = Arc::new(OpenAiSummaryAdapter::new(
        openai_client.clone(),
        config.summary_model.clone(),
    ));
    let translator = Arc::new(OpenAiTranslationAdapter::new(
        openai_client.clone(),
        config.translation_model.clone(),
        Duration::from_millis(config.translation_chunk_delay_ms),
    ));
    let tts = Arc::new(OpenAiTtsAdapter::new(openai_client.clone(), SpeechModel::Tts1));
    let extractor = Arc::new(PdfExtractAdapter::new());

    // --- 5. Build the Shared AppState & Router ---
    let app_state = Arc::new(AppState {
        db: db_adapter,
        config: config.clone(),
        catalog: Arc::new(catalog),
        extractor,
        summarizer,
        translator,
        tts,
    });

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(web::router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
