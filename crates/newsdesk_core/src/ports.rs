//! crates/newsdesk_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use std::path::Path;
use uuid::Uuid;

use crate::domain::{NewUser, SummaryRecord, TranslationRecord, UserCredentials, VoiceChoice};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network)
/// while keeping enough shape for the web layer to pick a status code.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Provider(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- User Management ---

    /// Inserts a new user row. Fails with `Conflict` when the email is
    /// already registered (unique-constraint violation).
    async fn create_user(&self, new_user: &NewUser) -> PortResult<Uuid>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    // --- Artifact History ---

    async fn save_summary(
        &self,
        user_id: Uuid,
        filename: &str,
        source_text: &str,
        summary: &str,
    ) -> PortResult<SummaryRecord>;

    async fn save_translation(
        &self,
        user_id: Uuid,
        filename: &str,
        original_text: &str,
        translated_text: &str,
        language: &str,
    ) -> PortResult<TranslationRecord>;

    async fn list_summaries_for_user(&self, user_id: Uuid) -> PortResult<Vec<SummaryRecord>>;

    async fn list_translations_for_user(
        &self,
        user_id: Uuid,
    ) -> PortResult<Vec<TranslationRecord>>;
}

#[async_trait]
pub trait TextExtractionService: Send + Sync {
    /// Extracts the full plain-text content of a PDF. An empty string means
    /// the file parsed but contained no extractable text.
    async fn extract(&self, path: &Path) -> PortResult<String>;

    /// Extracts the text page by page, for per-page search.
    async fn extract_pages(&self, path: &Path) -> PortResult<Vec<String>>;
}

#[async_trait]
pub trait SummarizationService: Send + Sync {
    /// Summarizes text into at most `max_points` bullet points, in the
    /// original language of the source.
    async fn summarize(&self, text: &str, max_points: u8) -> PortResult<String>;
}

#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translates text into the language named by an ISO-2 code.
    async fn translate(&self, text: &str, language_code: &str) -> PortResult<String>;
}

#[async_trait]
pub trait SpeechSynthesisService: Send + Sync {
    /// Synthesizes speech for the text, returning raw mono 16-bit PCM
    /// samples at the provider's fixed sample rate.
    async fn synthesize(&self, text: &str, voice: VoiceChoice) -> PortResult<Vec<i16>>;
}
