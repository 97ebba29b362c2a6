//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use base64::Engine;
use chrono::Local;
use hound::{WavSpec, WavWriter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use study_buddy_core::domain::{DailyActivity, QuizQuestion, StudyEntry, UserProgress};
use study_buddy_core::history;
use tracing::{error, warn};
use utoipa::{OpenApi, ToSchema};

/// The user-visible message shown when the AI gateway fails for any reason.
const APOLOGY_MESSAGE: &str =
    "Eish, StudyBuddy ran into a small problem. Let's try again, sharp?";

/// Trailing window of the dashboard activity chart, in days.
const ACTIVITY_WINDOW_DAYS: u32 = 5;

/// Sample rate of the PCM audio returned by the speech adapter.
const SPEECH_SAMPLE_RATE: u32 = 24_000;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        ask_handler,
        quiz_handler,
        translate_handler,
        speak_handler,
        history_handler,
        progress_handler,
        dashboard_handler,
    ),
    components(
        schemas(AskRequest, QuizRequest, TranslateRequest, TranslateResponse, SpeakRequest, SpeakResponse)
    ),
    tags(
        (name = "StudyBuddy API", description = "API endpoints for the AI study assistant.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Request and Response Structs
//=========================================================================================

/// A question from the student, optionally grounded in pasted notes and an
/// attached image.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub question: String,
    /// Text extracted from the student's uploaded notes, if any.
    #[serde(default)]
    pub notes: Option<String>,
    /// Display name of the source material (e.g. the uploaded file name).
    #[serde(default)]
    pub notes_name: Option<String>,
    /// Base64-encoded JPEG attached to the question.
    #[serde(default)]
    pub image_base64: Option<String>,
    /// When true, also generate an educational illustration for the question.
    #[serde(default)]
    pub visual: bool,
}

/// The outcome of an ask. When the AI gateway fails, `answer` carries the
/// generic apology and the remaining fields are absent; nothing is persisted.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<StudyEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<UserProgress>,
}

#[derive(Deserialize, ToSchema)]
pub struct QuizRequest {
    pub notes: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SpeakRequest {
    pub text: String,
}

/// Synthesized speech, base64-encoded as a WAV file (16-bit PCM, 24 kHz, mono).
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpeakResponse {
    pub audio_base64: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub progress: UserProgress,
    pub daily_activity: Vec<DailyActivity>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Ask the tutor a question.
///
/// Answers the question, classifies its topic, appends a history entry, and
/// records progress. AI gateway failures collapse to a generic apology with
/// nothing persisted.
#[utoipa::path(
    post,
    path = "/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Answer (or apology) with the recorded entry and updated progress"),
        (status = 400, description = "Empty question"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn ask_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if request.question.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Question must not be empty".to_string()));
    }

    let ai_result = async {
        let answer = app_state
            .tutor_adapter
            .answer_question(
                &request.question,
                request.notes.as_deref(),
                request.image_base64.as_deref(),
            )
            .await?;
        let topic = app_state
            .topic_adapter
            .classify_topic(&request.question)
            .await?;
        Ok::<_, study_buddy_core::ports::PortError>((answer, topic))
    }
    .await;

    let (answer, topic) = match ai_result {
        Ok(pair) => pair,
        Err(e) => {
            warn!("AI gateway failed while answering: {}", e);
            return Ok(Json(AskResponse {
                answer: APOLOGY_MESSAGE.to_string(),
                topic: None,
                entry: None,
                progress: None,
            }));
        }
    };

    // The illustration is best effort; a failure here must not lose the answer.
    let generated_image_url = if request.visual {
        match app_state
            .image_adapter
            .generate_illustration(&request.question)
            .await
        {
            Ok(png) => Some(format!(
                "data:image/png;base64,{}",
                base64::engine::general_purpose::STANDARD.encode(png)
            )),
            Err(e) => {
                warn!("Illustration generation failed: {}", e);
                None
            }
        }
    } else {
        None
    };

    let mut entry = StudyEntry::new(request.question.clone(), answer.clone(), topic.clone());
    entry.notes_used = request.notes_name;
    entry.has_image = request.image_base64.is_some().then_some(true);
    entry.generated_image_url = generated_image_url;

    app_state
        .store
        .append_entry(entry.clone())
        .await
        .map_err(internal_error)?;
    let progress = app_state
        .tracker
        .record_question(&topic, Local::now().date_naive())
        .await
        .map_err(internal_error)?;

    Ok(Json(AskResponse {
        answer,
        topic: Some(topic),
        entry: Some(entry),
        progress: Some(progress),
    }))
}

/// Generate a multiple-choice quiz from pasted study notes.
#[utoipa::path(
    post,
    path = "/quiz",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "The generated quiz questions"),
        (status = 400, description = "Empty notes"),
        (status = 502, description = "Quiz generation failed")
    )
)]
pub async fn quiz_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<QuizRequest>,
) -> Result<Json<Vec<QuizQuestion>>, (StatusCode, String)> {
    if request.notes.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Notes must not be empty".to_string()));
    }

    match app_state.quiz_adapter.generate_quiz(&request.notes).await {
        Ok(questions) => Ok(Json(questions)),
        Err(e) => {
            warn!("Quiz generation failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                "Could not generate a quiz from those notes. Please try again.".to_string(),
            ))
        }
    }
}

/// Translate an answer into one of the supported languages.
#[utoipa::path(
    post,
    path = "/translate",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "The translated text", body = TranslateResponse),
        (status = 400, description = "Empty text"),
        (status = 502, description = "Translation failed")
    )
)]
pub async fn translate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, (StatusCode, String)> {
    if request.text.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Text must not be empty".to_string()));
    }

    match app_state
        .translate_adapter
        .translate(&request.text, &request.target_language)
        .await
    {
        Ok(translated_text) => Ok(Json(TranslateResponse { translated_text })),
        Err(e) => {
            warn!("Translation failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                "Could not translate right now. Please try again.".to_string(),
            ))
        }
    }
}

/// Read an answer aloud.
///
/// Returns the synthesized speech as a base64-encoded WAV file.
#[utoipa::path(
    post,
    path = "/speak",
    request_body = SpeakRequest,
    responses(
        (status = 200, description = "Base64-encoded WAV audio", body = SpeakResponse),
        (status = 400, description = "Empty text"),
        (status = 502, description = "Speech synthesis failed")
    )
)]
pub async fn speak_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<SpeakRequest>,
) -> Result<Json<SpeakResponse>, (StatusCode, String)> {
    if request.text.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Text must not be empty".to_string()));
    }

    let pcm = match app_state.tts_adapter.synthesize(&request.text).await {
        Ok(pcm) => pcm,
        Err(e) => {
            warn!("Speech synthesis failed: {}", e);
            return Err((
                StatusCode::BAD_GATEWAY,
                "Could not read that aloud right now. Please try again.".to_string(),
            ));
        }
    };

    let wav = pcm16_to_wav(&pcm, SPEECH_SAMPLE_RATE).map_err(|e| {
        error!("Failed to encode WAV: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to encode audio".to_string(),
        )
    })?;

    Ok(Json(SpeakResponse {
        audio_base64: base64::engine::general_purpose::STANDARD.encode(wav),
    }))
}

/// Fetch the full study history, most-recent-first.
#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "All study entries, most-recent-first"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn history_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<StudyEntry>>, (StatusCode, String)> {
    let entries = app_state.store.read_history().await.map_err(internal_error)?;
    Ok(Json(entries))
}

/// Fetch the current progress record.
#[utoipa::path(
    get,
    path = "/progress",
    responses(
        (status = 200, description = "The current progress record"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn progress_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<UserProgress>, (StatusCode, String)> {
    let progress = app_state.store.read_progress().await.map_err(internal_error)?;
    Ok(Json(progress))
}

/// Fetch the dashboard data: progress plus the trailing activity window.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Progress and per-day activity counts"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn dashboard_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<DashboardResponse>, (StatusCode, String)> {
    let progress = app_state.store.read_progress().await.map_err(internal_error)?;
    let entries = app_state.store.read_history().await.map_err(internal_error)?;
    let daily_activity =
        history::daily_activity(&entries, Local::now().date_naive(), ACTIVITY_WINDOW_DAYS);

    Ok(Json(DashboardResponse {
        progress,
        daily_activity,
    }))
}

//=========================================================================================
// Helpers
//=========================================================================================

fn internal_error(e: study_buddy_core::ports::PortError) -> (StatusCode, String) {
    error!("Storage operation failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal storage error".to_string(),
    )
}

/// Wraps raw 16-bit mono PCM samples in a WAV container so the browser can
/// play them directly.
fn pcm16_to_wav(pcm_data: &[u8], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let mut cursor = std::io::Cursor::new(Vec::new());

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::new(&mut cursor, spec)?;
    for chunk in pcm_data.chunks_exact(2) {
        let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_wrapping_preserves_sample_count() {
        // 100 samples of silence.
        let pcm = vec![0u8; 200];
        let wav = pcm16_to_wav(&pcm, SPEECH_SAMPLE_RATE).unwrap();

        let reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, SPEECH_SAMPLE_RATE);
        assert_eq!(reader.spec().bits_per_sample, 16);
        assert_eq!(reader.len(), 100);
    }
}
