//! services/api/src/web/ai.rs
//!
//! The AI-backed document actions: summarize, translate, and read-aloud
//! (TTS). Every route here sits behind the auth middleware; identity
//! comes from the token claims, never from the request body.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::audio::{content_key, pcm_to_wav, TTS_SAMPLE_RATE};
use crate::config::Config;
use crate::error::{bad_request, not_found, ApiError};
use crate::web::jwt::Claims;
use crate::web::state::AppState;
use newsdesk_core::domain::{SummaryRecord, TranslationRecord, VoiceChoice};

/// The default number of bullet points requested from the summarizer.
const DEFAULT_SUMMARY_POINTS: u8 = 5;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SummarizeRequest {
    pub filename: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct TranslateRequest {
    pub filename: Option<String>,
    /// Target language as an ISO-2 code (e.g. "fr").
    pub language: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ReadPdfRequest {
    pub filename: Option<String>,
    /// "Male" or "Female"; any other value falls back to the default voice.
    pub voice: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub id: uuid::Uuid,
    pub filename: String,
    pub summary: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<SummaryRecord> for SummaryEntry {
    fn from(r: SummaryRecord) -> Self {
        Self {
            id: r.id,
            filename: r.filename,
            summary: r.summary,
            created_at: r.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    pub id: uuid::Uuid,
    pub filename: String,
    pub translated_text: String,
    pub language: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<TranslationRecord> for TranslationEntry {
    fn from(r: TranslationRecord) -> Self {
        Self {
            id: r.id,
            filename: r.filename,
            translated_text: r.translated_text,
            language: r.language,
            created_at: r.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResponse {
    pub summary: String,
    /// The extracted source text the summary was produced from.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_entry: Option<SummaryEntry>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub original_text: String,
    pub translated_text: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_entry: Option<TranslationEntry>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadPdfResponse {
    /// Public path of the generated WAV file, served from `/public_tts`.
    pub tts_file: String,
}

//=========================================================================================
// Helpers
//=========================================================================================

/// Resolves a catalog filename against the PDF directory. Filenames are
/// plain names, never paths; anything with a separator is rejected before
/// touching the filesystem.
pub fn resolve_pdf(config: &Config, filename: &str) -> Result<PathBuf, ApiError> {
    if filename.contains(['/', '\\']) || filename.contains("..") {
        return Err(bad_request("Invalid filename."));
    }
    let path = config.pdf_dir.join(filename);
    if !path.is_file() {
        return Err(not_found("PDF file not found."));
    }
    Ok(path)
}

fn required_field<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| bad_request(message))
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/ai/summarize - Summarize a catalog PDF into bullet points
#[utoipa::path(
    post,
    path = "/api/ai/summarize",
    request_body = SummarizeRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Summary generated", body = SummarizeResponse),
        (status = 400, description = "Missing filename"),
        (status = 404, description = "PDF file not found"),
        (status = 500, description = "Extraction or provider failure")
    )
)]
pub async fn summarize_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SummarizeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let filename = required_field(&req.filename, "Missing filename.")?;
    let path = resolve_pdf(&state.config, filename)?;

    let text = state.extractor.extract(&path).await?;
    let summary = state
        .summarizer
        .summarize(&text, DEFAULT_SUMMARY_POINTS)
        .await?;

    let db_entry = if state.config.persist_artifacts {
        let record = state
            .db
            .save_summary(claims.sub, filename, &text, &summary)
            .await
            .map_err(|e| {
                error!("Failed to persist summary: {}", e);
                ApiError::Port(e)
            })?;
        Some(SummaryEntry::from(record))
    } else {
        None
    };

    info!(filename, user = %claims.sub, "Summarized document");
    Ok(Json(SummarizeResponse {
        summary,
        text,
        db_entry,
    }))
}

/// POST /api/ai/translate - Translate a catalog PDF to a target language
#[utoipa::path(
    post,
    path = "/api/ai/translate",
    request_body = TranslateRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Translation generated", body = TranslateResponse),
        (status = 400, description = "Missing filename or language"),
        (status = 404, description = "PDF file not found, or no extractable text"),
        (status = 500, description = "Extraction or provider failure")
    )
)]
pub async fn translate_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<TranslateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let filename = required_field(&req.filename, "Missing filename or language.")?;
    let language = required_field(&req.language, "Missing filename or language.")?;
    let path = resolve_pdf(&state.config, filename)?;

    let text = state.extractor.extract(&path).await?;
    if text.trim().is_empty() {
        return Err(not_found("No text extracted from PDF."));
    }

    let translated_text = state.translator.translate(&text, language).await?;

    let db_entry = if state.config.persist_artifacts {
        let record = state
            .db
            .save_translation(claims.sub, filename, &text, &translated_text, language)
            .await
            .map_err(|e| {
                error!("Failed to persist translation: {}", e);
                ApiError::Port(e)
            })?;
        Some(TranslationEntry::from(record))
    } else {
        None
    };

    info!(filename, language, user = %claims.sub, "Translated document");
    Ok(Json(TranslateResponse {
        original_text: text,
        translated_text,
        language: language.to_string(),
        db_entry,
    }))
}

/// POST /api/ai/read-pdf - Synthesize speech for a catalog PDF
///
/// Generated audio is content-addressed by (voice, text): repeating a
/// request re-serves the existing WAV instead of calling the provider
/// again.
#[utoipa::path(
    post,
    path = "/api/ai/read-pdf",
    request_body = ReadPdfRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Audio generated", body = ReadPdfResponse),
        (status = 400, description = "Missing filename or voice selection"),
        (status = 404, description = "PDF file not found, or no extractable text"),
        (status = 500, description = "Extraction, provider, or encoding failure")
    )
)]
pub async fn read_pdf_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ReadPdfRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let filename = required_field(&req.filename, "Missing filename or voice selection.")?;
    let voice_label = required_field(&req.voice, "Missing filename or voice selection.")?;
    let voice = VoiceChoice::from_label(voice_label);
    let path = resolve_pdf(&state.config, filename)?;

    let text = state.extractor.extract(&path).await?;
    if text.trim().is_empty() {
        return Err(not_found("No text extracted from PDF."));
    }

    let tts_file_name = format!("tts_{}.wav", content_key(voice, &text));
    let tts_path = state.config.tts_dir.join(&tts_file_name);

    if !tts_path.is_file() {
        let samples = state.tts.synthesize(&text, voice).await?;
        let wav = pcm_to_wav(&samples, TTS_SAMPLE_RATE)
            .map_err(|e| ApiError::Internal(format!("Failed to encode WAV: {}", e)))?;
        tokio::fs::write(&tts_path, &wav).await?;
        info!(filename, file = %tts_file_name, user = %claims.sub, "Generated TTS audio");
    } else {
        info!(filename, file = %tts_file_name, "Re-serving existing TTS audio");
    }

    Ok(Json(ReadPdfResponse {
        tts_file: format!("/public_tts/{}", tts_file_name),
    }))
}
