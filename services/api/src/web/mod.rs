pub mod ai;
pub mod auth;
pub mod jwt;
pub mod middleware;
pub mod rest;
pub mod state;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::warn;

use crate::web::state::AppState;

pub use middleware::require_auth;

/// Builds the complete application router: public auth/catalog routes,
/// token-gated AI routes, and the static file services for the source
/// PDFs and generated audio.
pub fn router(app_state: Arc<AppState>) -> Router {
    let origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring unparseable CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/pdfs", get(rest::list_pdfs_handler));

    // Protected routes (bearer token required)
    let protected_routes = Router::new()
        .route("/api/auth/verify", get(auth::verify_handler))
        .route("/api/ai/summarize", post(ai::summarize_handler))
        .route("/api/ai/translate", post(ai::translate_handler))
        .route("/api/ai/read-pdf", post(ai::read_pdf_handler))
        .route("/api/pdfs/search", post(rest::search_handler))
        .route("/api/users/me/summaries", get(rest::list_summaries_handler))
        .route(
            "/api/users/me/translations",
            get(rest::list_translations_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/pdfs", ServeDir::new(&app_state.config.pdf_dir))
        .nest_service("/public_tts", ServeDir::new(&app_state.config.tts_dir))
        .layer(cors)
        .with_state(app_state)
}
