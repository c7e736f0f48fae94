//! services/api/src/adapters/translate_llm.rs
//!
//! This module contains the adapter for the translation LLM.
//! It implements the `TranslationService` port from the `core` crate.
//!
//! Long documents are split into 2000-character chunks to respect the
//! provider's input-size limit. Chunks are translated sequentially, each
//! prompt framed with its position among the chunks so the model keeps
//! context, with a configurable delay between requests to stay under
//! rate limits. Any chunk failure fails the whole translation; partial
//! results are discarded.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use newsdesk_core::chunk::{chunk_text, TRANSLATION_CHUNK_SIZE};
use newsdesk_core::ports::{PortError, PortResult, TranslationService};

const SYSTEM_INSTRUCTIONS: &str = "You are a professional translator. Provide ONLY the \
    translation without any explanations or additional text.";

/// ISO-2 codes resolved to the language names used in prompts. Unknown
/// codes pass through unchanged.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("ar", "Arabic"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("tr", "Turkish"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("sv", "Swedish"),
    ("da", "Danish"),
    ("no", "Norwegian"),
    ("fi", "Finnish"),
];

fn language_name(code: &str) -> &str {
    let lowered = code.to_lowercase();
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == lowered)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

fn build_chunk_prompt(chunk: &str, target_language: &str, index: usize, total: usize) -> String {
    format!(
        "Translate the following text to {}. This is part {} of {} of a larger document, \
         so maintain context.\n\nText to translate:\n{}",
        target_language, index, total, chunk
    )
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TranslationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiTranslationAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    chunk_delay: Duration,
}

impl OpenAiTranslationAdapter {
    /// Creates a new `OpenAiTranslationAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, chunk_delay: Duration) -> Self {
        Self {
            client,
            model,
            chunk_delay,
        }
    }

    async fn translate_chunk(&self, prompt: String) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Provider(e.to_string()))?;

        match response.choices.into_iter().next() {
            Some(choice) => match choice.message.content {
                Some(content) => Ok(content.trim().to_string()),
                None => Err(PortError::Provider(
                    "Translation LLM response contained no text content.".to_string(),
                )),
            },
            None => Err(PortError::Provider(
                "Translation LLM returned no choices in its response.".to_string(),
            )),
        }
    }
}

//=========================================================================================
// `TranslationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TranslationService for OpenAiTranslationAdapter {
    async fn translate(&self, text: &str, language_code: &str) -> PortResult<String> {
        if text.trim().is_empty() || language_code.trim().is_empty() {
            return Err(PortError::InvalidInput(
                "Missing text or language.".to_string(),
            ));
        }

        let target_language = language_name(language_code).to_string();
        let chunks = chunk_text(text, TRANSLATION_CHUNK_SIZE);
        let total = chunks.len();
        debug!(target = %target_language, chunks = total, "Starting chunked translation");

        let mut translated_chunks = Vec::with_capacity(total);
        for (i, chunk) in chunks.iter().enumerate() {
            let prompt = build_chunk_prompt(chunk, &target_language, i + 1, total);
            let translated = self.translate_chunk(prompt).await?;
            translated_chunks.push(translated);
            debug!(chunk = i + 1, total, "Chunk translated");

            if i + 1 < total {
                tokio::time::sleep(self.chunk_delay).await;
            }
        }

        Ok(translated_chunks.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve_to_language_names() {
        assert_eq!(language_name("fr"), "French");
        assert_eq!(language_name("AR"), "Arabic");
        assert_eq!(language_name("en"), "English");
    }

    #[test]
    fn unknown_codes_pass_through_unchanged() {
        assert_eq!(language_name("xx"), "xx");
        assert_eq!(language_name("elvish"), "elvish");
    }

    #[test]
    fn chunk_prompt_frames_position_among_chunks() {
        let prompt = build_chunk_prompt("Bonjour", "English", 2, 7);
        assert!(prompt.contains("part 2 of 7"));
        assert!(prompt.contains("Translate the following text to English."));
        assert!(prompt.ends_with("Bonjour"));
    }
}
