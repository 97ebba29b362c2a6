//! services/api/src/adapters/quiz_llm.rs
//!
//! This module contains the adapter for the quiz-generating LLM.
//! It implements the `QuizService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    error::OpenAIError,
    Client,
};
use async_trait::async_trait;
use serde::Deserialize;
use study_buddy_core::domain::QuizQuestion;
use study_buddy_core::ports::{PortError, PortResult, QuizService};

const SYSTEM_INSTRUCTIONS: &str = r#"You are a quiz generator for Grade 8-12 students.
Given study notes, generate a 5-question multiple choice quiz that helps the student study.

Respond with a JSON object of this exact shape and nothing else:
{
  "questions": [
    {
      "id": "q1",
      "question": "...",
      "options": ["...", "...", "...", "..."],
      "correctAnswer": 0,
      "explanation": "..."
    }
  ]
}

Rules:
- Exactly 5 questions, each with exactly 4 options.
- "correctAnswer" is the zero-based index of the correct option.
- Every question must be answerable from the notes."#;

/// The JSON-object envelope the model is instructed to produce. The chat
/// API's JSON mode requires a top-level object, not a bare array.
#[derive(Deserialize)]
struct QuizEnvelope {
    questions: Vec<QuizQuestion>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `QuizService` using an OpenAI-compatible LLM
/// in strict JSON mode.
#[derive(Clone)]
pub struct OpenAiQuizAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiQuizAdapter {
    /// Creates a new `OpenAiQuizAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Decodes the model's JSON reply into quiz questions, rejecting
    /// questions whose answer index does not point at an option.
    fn parse_quiz(raw: &str) -> PortResult<Vec<QuizQuestion>> {
        let envelope: QuizEnvelope = serde_json::from_str(raw)
            .map_err(|e| PortError::Unexpected(format!("Quiz LLM returned malformed JSON: {}", e)))?;

        for question in &envelope.questions {
            if question.correct_answer >= question.options.len() {
                return Err(PortError::Unexpected(format!(
                    "Quiz question '{}' has answer index {} but only {} options",
                    question.id,
                    question.correct_answer,
                    question.options.len()
                )));
            }
        }

        Ok(envelope.questions)
    }
}

//=========================================================================================
// `QuizService` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuizService for OpenAiQuizAdapter {
    /// Generates a multiple-choice quiz from pasted study notes.
    async fn generate_quiz(&self, notes: &str) -> PortResult<Vec<QuizQuestion>> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_INSTRUCTIONS)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(format!("Study notes:\n\n{}", notes))
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let raw = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected("Quiz LLM response contained no text content.".to_string())
            })?;

        Self::parse_quiz(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_quiz() {
        let raw = r#"{
            "questions": [
                {
                    "id": "q1",
                    "question": "What is 2 + 2?",
                    "options": ["3", "4", "5", "6"],
                    "correctAnswer": 1,
                    "explanation": "Two plus two equals four."
                }
            ]
        }"#;

        let quiz = OpenAiQuizAdapter::parse_quiz(raw).unwrap();
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].options.len(), 4);
        assert_eq!(quiz[0].correct_answer, 1);
    }

    #[test]
    fn rejects_out_of_range_answer_index() {
        let raw = r#"{
            "questions": [
                {
                    "id": "q1",
                    "question": "What is 2 + 2?",
                    "options": ["3", "4"],
                    "correctAnswer": 7,
                    "explanation": "..."
                }
            ]
        }"#;

        assert!(OpenAiQuizAdapter::parse_quiz(raw).is_err());
    }

    #[test]
    fn rejects_non_json_replies() {
        assert!(OpenAiQuizAdapter::parse_quiz("Sure! Here is your quiz:").is_err());
    }
}
