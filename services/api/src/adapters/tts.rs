//! services/api/src/adapters/tts.rs
//!
//! This module contains the adapter for OpenAI's Text-to-Speech (TTS) service.
//! It implements the `SpeechService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    error::OpenAIError,
    Client,
};
use async_trait::async_trait;
use study_buddy_core::ports::{PortError, PortResult, SpeechService};

/// Read-aloud requests are capped at this many characters of input text.
const MAX_SPOKEN_CHARS: usize = 500;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `SpeechService` port using the OpenAI TTS API.
#[derive(Clone)]
pub struct OpenAiTtsAdapter {
    client: Client<OpenAIConfig>,
    model: SpeechModel,
    voice: Voice,
}

impl OpenAiTtsAdapter {
    /// Creates a new `OpenAiTtsAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: SpeechModel, voice: Voice) -> Self {
        Self {
            client,
            model,
            voice,
        }
    }
}

//=========================================================================================
// `SpeechService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SpeechService for OpenAiTtsAdapter {
    /// Synthesizes speech for the given text.
    /// Returns raw 16-bit PCM samples at 24 kHz, mono.
    async fn synthesize(&self, text: &str) -> PortResult<Vec<u8>> {
        let spoken: String = text.chars().take(MAX_SPOKEN_CHARS).collect();

        let request = CreateSpeechRequest {
            model: self.model.clone(),
            input: spoken,
            voice: self.voice.clone(),
            response_format: Some(SpeechResponseFormat::Pcm),
            ..Default::default()
        };

        // Call the API and manually map the error, which respects the orphan rule.
        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // The response contains a `bytes` field. We call `.to_vec()` on that field.
        Ok(response.bytes.to_vec())
    }
}
