//! services/api/src/adapters/translate_llm.rs
//!
//! This module contains the adapter for the translation LLM.
//! It implements the `TranslationService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    error::OpenAIError,
    Client,
};
use async_trait::async_trait;
use study_buddy_core::ports::{PortError, PortResult, TranslationService};

/// An adapter that implements `TranslationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiTranslateAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiTranslateAdapter {
    /// Creates a new `OpenAiTranslateAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl TranslationService for OpenAiTranslateAdapter {
    /// Translates educational text into the named target language.
    async fn translate(&self, text: &str, target_language: &str) -> PortResult<String> {
        let messages = vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!(
                    "You are a professional educational translator. Translate the following \
                     educational text into {}, one of South Africa's official languages. Keep \
                     the academic tone appropriate for high school learners and preserve \
                     technical terms in brackets if they are essential. Text: \"{}\"",
                    target_language, text
                ))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?,
        )];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                PortError::Unexpected(
                    "Translation LLM response contained no text content.".to_string(),
                )
            })
    }
}
