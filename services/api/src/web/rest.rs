//! services/api/src/web/rest.rs
//!
//! Catalog, search, and history endpoints, plus the master definition
//! for the OpenAPI specification.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::error::{bad_request, ApiError};
use crate::web::ai::{self, resolve_pdf};
use crate::web::auth;
use crate::web::jwt::Claims;
use crate::web::state::AppState;
use newsdesk_core::search::{first_match_snippet, page_hits};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_handler,
        auth::login_handler,
        auth::verify_handler,
        list_pdfs_handler,
        search_handler,
        ai::summarize_handler,
        ai::translate_handler,
        ai::read_pdf_handler,
        list_summaries_handler,
        list_translations_handler,
    ),
    components(schemas(
        auth::RegisterRequest,
        auth::LoginRequest,
        auth::MessageResponse,
        auth::UserView,
        auth::LoginResponse,
        auth::VerifyResponse,
        ai::SummarizeRequest,
        ai::TranslateRequest,
        ai::ReadPdfRequest,
        ai::SummarizeResponse,
        ai::TranslateResponse,
        ai::ReadPdfResponse,
        ai::SummaryEntry,
        ai::TranslationEntry,
        SearchRequest,
        SearchHit,
        crate::catalog::CatalogEntry,
        crate::error::ErrorBody,
        Claims,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Newsdesk API", description = "Multilingual news-PDF portal: catalog, auth, and AI-backed document actions.")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_token` security scheme that the gated paths
/// reference, so the document resolves and Swagger UI offers the
/// Authorize dialog.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SearchRequest {
    /// The keyword or phrase to look for (case-insensitive).
    pub term: Option<String>,
    /// When present, only this document is searched, page by page.
    /// When absent, the whole catalog is scanned with one snippet per
    /// matching document.
    pub filename: Option<String>,
}

/// One search result. `page` is set only in single-document searches.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    pub text_snippet: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /api/pdfs - List the newspaper catalog
#[utoipa::path(
    get,
    path = "/api/pdfs",
    responses(
        (status = 200, description = "The document catalog", body = [crate::catalog::CatalogEntry])
    )
)]
pub async fn list_pdfs_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.as_ref().clone())
}

/// POST /api/pdfs/search - Search inside catalog PDFs
#[utoipa::path(
    post,
    path = "/api/pdfs/search",
    request_body = SearchRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Matches, possibly empty", body = [SearchHit]),
        (status = 400, description = "Missing search term"),
        (status = 404, description = "Named PDF not found"),
        (status = 500, description = "Extraction failure")
    )
)]
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let term = req
        .term
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| bad_request("Search term is required."))?;

    let hits = match req.filename.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        // Single-document mode: one hit per matching line, tagged with
        // its 1-based page number.
        Some(filename) => {
            let path = resolve_pdf(&state.config, filename)?;
            let pages = state.extractor.extract_pages(&path).await?;
            page_hits(&pages, term)
                .into_iter()
                .map(|hit| SearchHit {
                    filename: filename.to_string(),
                    page: Some(hit.page),
                    text_snippet: hit.line,
                })
                .collect()
        }
        // Catalog-wide mode: at most one snippet per document. A document
        // that fails to parse is skipped, not fatal, so one corrupt file
        // cannot break search across the rest of the catalog.
        None => {
            let mut hits = Vec::new();
            for entry in state.catalog.iter() {
                let path = state.config.pdf_dir.join(&entry.filename);
                if !path.is_file() {
                    continue;
                }
                let text = match state.extractor.extract(&path).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(filename = %entry.filename, "Skipping unreadable PDF in search: {}", e);
                        continue;
                    }
                };
                if let Some(snippet) = first_match_snippet(&text, term) {
                    hits.push(SearchHit {
                        filename: entry.filename.clone(),
                        page: None,
                        text_snippet: snippet,
                    });
                }
            }
            hits
        }
    };

    Ok(Json(hits))
}

/// GET /api/users/me/summaries - The caller's persisted summary history
#[utoipa::path(
    get,
    path = "/api/users/me/summaries",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Summary history, newest first", body = [ai::SummaryEntry]),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn list_summaries_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.db.list_summaries_for_user(claims.sub).await?;
    let entries: Vec<ai::SummaryEntry> = records.into_iter().map(Into::into).collect();
    Ok(Json(entries))
}

/// GET /api/users/me/translations - The caller's persisted translation history
#[utoipa::path(
    get,
    path = "/api/users/me/translations",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Translation history, newest first", body = [ai::TranslationEntry]),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn list_translations_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.db.list_translations_for_user(claims.sub).await?;
    let entries: Vec<ai::TranslationEntry> = records.into_iter().map(Into::into).collect();
    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_declares_the_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("document has components");
        assert!(
            components.security_schemes.contains_key("bearer_token"),
            "gated paths reference bearer_token, so it must be registered"
        );
    }
}
