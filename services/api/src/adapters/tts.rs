//! services/api/src/adapters/tts.rs
//!
//! This module contains the adapter for the Text-to-Speech (TTS) service.
//! It implements the `SpeechSynthesisService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;

use newsdesk_core::domain::VoiceChoice;
use newsdesk_core::ports::{PortError, PortResult, SpeechSynthesisService};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `SpeechSynthesisService` port using the
/// OpenAI TTS API. Audio is requested as raw PCM: mono, 16-bit signed,
/// at the provider's fixed 24 kHz sample rate.
#[derive(Clone)]
pub struct OpenAiTtsAdapter {
    client: Client<OpenAIConfig>,
    model: SpeechModel,
}

impl OpenAiTtsAdapter {
    /// Creates a new `OpenAiTtsAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: SpeechModel) -> Self {
        Self { client, model }
    }
}

/// The two fixed provider voices behind the catalog's voice selector.
fn provider_voice(voice: VoiceChoice) -> Voice {
    match voice {
        VoiceChoice::Male => Voice::Onyx,
        VoiceChoice::Female => Voice::Nova,
    }
}

//=========================================================================================
// `SpeechSynthesisService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SpeechSynthesisService for OpenAiTtsAdapter {
    /// Synthesizes speech and returns the decoded 16-bit PCM samples.
    async fn synthesize(&self, text: &str, voice: VoiceChoice) -> PortResult<Vec<i16>> {
        if text.trim().is_empty() {
            return Err(PortError::InvalidInput("Text is empty.".to_string()));
        }

        let request = CreateSpeechRequest {
            model: self.model.clone(),
            input: text.to_string(),
            voice: provider_voice(voice),
            response_format: Some(SpeechResponseFormat::Pcm),
            ..Default::default()
        };

        // Call the API and manually map the error, which respects the orphan rule.
        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e: OpenAIError| PortError::Provider(e.to_string()))?;

        let bytes = response.bytes;
        if bytes.is_empty() {
            return Err(PortError::Provider("No audio returned.".to_string()));
        }

        // PCM arrives as little-endian byte pairs; a trailing odd byte is dropped.
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(samples)
    }
}
