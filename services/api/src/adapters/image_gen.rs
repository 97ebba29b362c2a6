//! services/api/src/adapters/image_gen.rs
//!
//! This module contains the adapter for the image-generation service.
//! It implements the `IllustrationService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    types::{CreateImageRequestArgs, Image, ImageModel, ImageResponseFormat, ImageSize},
    error::OpenAIError,
    Client,
};
use async_trait::async_trait;
use base64::Engine;
use study_buddy_core::ports::{PortError, PortResult, IllustrationService};

const PROMPT_TEMPLATE: &str = r#"Create a clear, educational illustration to help a student understand the following concept:

Concept: {concept}

Requirements:
- Style: Simple, clean, and easy to read
- Type: Diagram, infographic, or visual aid suitable for learning
- Labels: Include important parts if applicable
- Colors: Use soft blue-based colors, not too flashy
- Perspective: Front view or top view if relevant
- Do not include unnecessary details or text"#;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `IllustrationService` port using the
/// OpenAI image-generation API.
#[derive(Clone)]
pub struct OpenAiImageAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiImageAdapter {
    /// Creates a new `OpenAiImageAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `IllustrationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl IllustrationService for OpenAiImageAdapter {
    /// Generates a square educational illustration and returns its raw PNG bytes.
    async fn generate_illustration(&self, concept: &str) -> PortResult<Vec<u8>> {
        let prompt = PROMPT_TEMPLATE.replace("{concept}", concept);

        let request = CreateImageRequestArgs::default()
            .model(ImageModel::Other(self.model.clone()))
            .prompt(prompt)
            .n(1)
            .size(ImageSize::S1024x1024)
            .response_format(ImageResponseFormat::B64Json)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error, which respects the orphan rule.
        let response = self
            .client
            .images()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let image = response.data.into_iter().next().ok_or_else(|| {
            PortError::Unexpected("Image API returned no images.".to_string())
        })?;

        Self::decode_image(image.as_ref())
    }
}

impl OpenAiImageAdapter {
    /// Extracts the raw bytes from an inline (b64_json) image response.
    fn decode_image(image: &Image) -> PortResult<Vec<u8>> {
        match image {
            Image::B64Json { b64_json, .. } => base64::engine::general_purpose::STANDARD
                .decode(b64_json.as_str())
                .map_err(|e| {
                    PortError::Unexpected(format!("Image API returned invalid base64: {}", e))
                }),
            Image::Url { .. } => Err(PortError::Unexpected(
                "Image API returned a URL instead of inline data.".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn decodes_inline_image_data() {
        let image = Image::B64Json {
            b64_json: Arc::new("aGVsbG8=".to_string()),
            revised_prompt: None,
        };
        assert_eq!(OpenAiImageAdapter::decode_image(&image).unwrap(), b"hello");
    }

    #[test]
    fn rejects_url_only_responses() {
        let image = Image::Url {
            url: "https://example.com/image.png".to_string(),
            revised_prompt: None,
        };
        assert!(OpenAiImageAdapter::decode_image(&image).is_err());
    }
}
