//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use crate::catalog::CatalogEntry;
use crate::config::Config;
use newsdesk_core::ports::{
    DatabaseService, SpeechSynthesisService, SummarizationService, TextExtractionService,
    TranslationService,
};

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub config: Arc<Config>,
    /// The fixed newspaper catalog, loaded at startup.
    pub catalog: Arc<Vec<CatalogEntry>>,
    pub extractor: Arc<dyn TextExtractionService>,
    pub summarizer: Arc<dyn SummarizationService>,
    pub translator: Arc<dyn TranslationService>,
    pub tts: Arc<dyn SpeechSynthesisService>,
}
