//! services/api/src/adapters/topic_llm.rs
//!
//! This module contains the adapter for the topic-classification LLM.
//! It implements the `TopicClassificationService` port from the `core` crate.

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
use study_buddy_core::ports::{PortError, PortResult, TopicClassificationService};

/// The label substituted whenever the model returns nothing usable.
const FALLBACK_TOPIC: &str = "General Studies";

/// An adapter that implements `TopicClassificationService` using an
/// OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiTopicAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiTopicAdapter {
    /// Creates a new `OpenAiTopicAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl TopicClassificationService for OpenAiTopicAdapter {
    /// Labels a question with its academic subject in one or two words.
    async fn classify_topic(&self, question: &str) -> PortResult<String> {
        let messages = vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!(
                    "Identify the main academic subject of this question in 1-2 words \
                     (e.g., \"Mathematics\", \"Physical Sciences\", \"Life Sciences\", \
                     \"History\"). Question: \"{}\"",
                    question
                ))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?,
        )];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(10u32)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let label = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| FALLBACK_TOPIC.to_string());

        Ok(label)
    }
}
