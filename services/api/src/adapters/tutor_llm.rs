//! services/api/src/adapters/tutor_llm.rs
//!
//! This module contains the adapter for the main tutoring LLM.
//! It implements the `TutorService` port from the `core` crate.

const SYSTEM_INSTRUCTIONS: &str = r#"You are StudyBuddy, a friendly and encouraging AI tutor for South African students in Grades 8-12.
Your goal is to help students learn by explaining concepts clearly, providing study tips, and answering their school-related questions.

Requirements:
1. Provide a clear, age-appropriate, and educational answer.
2. Use bullet points for readability.
3. Use South African context or examples where relevant.
4. Always end with a short "Study Tip" to help the student master the topic.
5. Tone: Supportive, patient, and academic yet accessible."#;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        CreateChatCompletionRequestArgs, ImageUrlArgs,
    },
    error::OpenAIError,
    Client,
};
use async_trait::async_trait;
use study_buddy_core::ports::{PortError, PortResult, TutorService};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TutorService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiTutorAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiTutorAdapter {
    /// Creates a new `OpenAiTutorAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    fn build_user_content(
        question: &str,
        notes: Option<&str>,
        image_base64: Option<&str>,
    ) -> PortResult<ChatCompletionRequestUserMessageContent> {
        let mut prompt = format!("User Question: {}", question);
        if let Some(notes) = notes {
            prompt.push_str(&format!(
                "\nAdditional context from student notes: {}",
                notes
            ));
        }

        // Plain text unless an image is attached; then a multi-part message
        // with the image inlined as a data URL.
        match image_base64 {
            None => Ok(prompt.into()),
            Some(data) => {
                let text_part = ChatCompletionRequestMessageContentPartTextArgs::default()
                    .text(prompt)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;
                let image_part = ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(
                        ImageUrlArgs::default()
                            .url(format!("data:image/jpeg;base64,{}", data))
                            .build()
                            .map_err(|e| PortError::Unexpected(e.to_string()))?,
                    )
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;
                Ok(ChatCompletionRequestUserMessageContent::Array(vec![
                    text_part.into(),
                    image_part.into(),
                ]))
            }
        }
    }
}

//=========================================================================================
// `TutorService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TutorService for OpenAiTutorAdapter {
    /// Answers a student's question, optionally grounded in their notes and
    /// an attached image.
    async fn answer_question(
        &self,
        question: &str,
        notes: Option<&str>,
        image_base64: Option<&str>,
    ) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_INSTRUCTIONS)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(Self::build_user_content(question, notes, image_base64)?)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let answer = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected("Tutor LLM response contained no text content.".to_string())
            })?;

        Ok(answer.trim().to_string())
    }
}
