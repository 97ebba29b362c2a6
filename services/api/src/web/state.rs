//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::sync::Arc;
use study_buddy_core::ports::{
    IllustrationService, QuizService, SpeechService, StudyStore, TopicClassificationService,
    TranslationService, TutorService,
};
use study_buddy_core::tracker::ProgressTracker;

/// The shared application state, created once at startup and passed to all handlers.
///
/// The store and tracker are explicit handles owned here; nothing in the
/// application reaches for ambient storage.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudyStore>,
    pub tracker: Arc<ProgressTracker>,
    pub config: Arc<Config>,
    pub tutor_adapter: Arc<dyn TutorService>,
    pub topic_adapter: Arc<dyn TopicClassificationService>,
    pub translate_adapter: Arc<dyn TranslationService>,
    pub image_adapter: Arc<dyn IllustrationService>,
    pub tts_adapter: Arc<dyn SpeechService>,
    pub quiz_adapter: Arc<dyn QuizService>,
}
