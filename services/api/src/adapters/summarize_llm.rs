//! services/api/src/adapters/summarize_llm.rs
//!
//! This module contains the adapter for the summarization LLM.
//! It implements the `SummarizationService` port from the `core` crate.

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

use newsdesk_core::ports::{PortError, PortResult, SummarizationService};

const SYSTEM_INSTRUCTIONS: &str = "You are a professional news summarizer. \
    Focus on the most important information and key facts.";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `SummarizationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiSummaryAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiSummaryAdapter {
    /// Creates a new `OpenAiSummaryAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

fn build_user_prompt(text: &str, max_points: u8) -> String {
    format!(
        "Summarize the following newsletter in {} clear and concise bullet points, \
         written in the original language of the text.\n\nNewsletter Text:\n{}",
        max_points, text
    )
}

//=========================================================================================
// `SummarizationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SummarizationService for OpenAiSummaryAdapter {
    /// Summarizes the text into at most `max_points` bullet points.
    ///
    /// The trimmed model response is returned verbatim; the bullet count
    /// is not structurally validated.
    async fn summarize(&self, text: &str, max_points: u8) -> PortResult<String> {
        if text.trim().is_empty() {
            return Err(PortError::InvalidInput(
                "Text is empty. Cannot summarize.".to_string(),
            ));
        }

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(build_user_prompt(text, max_points))
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

        // Call the API and manually map the error, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Provider(e.to_string()))?;

        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content.trim().to_string())
            } else {
                Err(PortError::Provider(
                    "Summarization LLM response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Provider(
                "Summarization LLM returned no choices in its response.".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_point_count_and_source_text() {
        let prompt = build_user_prompt("Paris is the capital of France.", 5);
        assert!(prompt.contains("5 clear and concise bullet points"));
        assert!(prompt.contains("Paris is the capital of France."));
        assert!(prompt.contains("original language"));
    }
}
