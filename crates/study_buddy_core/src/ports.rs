//! crates/study_buddy_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like file storage or
//! hosted AI APIs.

use async_trait::async_trait;
use crate::domain::{QuizQuestion, StudyEntry, UserProgress};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., storage, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// A stored document exists but could not be decoded. Absence of a
    /// document is not an error; it yields defaults instead.
    #[error("Stored state is corrupt: {0}")]
    CorruptState(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Persistence Port
//=========================================================================================

/// Durable storage of the two application documents: the history log and the
/// progress record. Both are read and written whole, one document per call.
///
/// Callers are a single logical actor; no two mutations of the same document
/// are in flight concurrently in the intended usage pattern.
#[async_trait]
pub trait StudyStore: Send + Sync {
    /// Returns the stored history, most-recent-first, or an empty sequence
    /// if no history document exists yet.
    async fn read_history(&self) -> PortResult<Vec<StudyEntry>>;

    /// Overwrites the stored history.
    async fn write_history(&self, entries: &[StudyEntry]) -> PortResult<()>;

    /// Inserts the entry at the head of the stored history.
    async fn append_entry(&self, entry: StudyEntry) -> PortResult<()>;

    /// Returns the stored progress record, or a default record (zeroed
    /// counters, `last_study_date` = today) if none exists yet.
    async fn read_progress(&self) -> PortResult<UserProgress>;

    /// Overwrites the stored progress record.
    async fn write_progress(&self, progress: &UserProgress) -> PortResult<()>;
}

//=========================================================================================
// AI Gateway Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TutorService: Send + Sync {
    /// Answers a student's question, optionally grounded in pasted notes and
    /// an attached image (base64-encoded JPEG).
    async fn answer_question(
        &self,
        question: &str,
        notes: Option<&str>,
        image_base64: Option<&str>,
    ) -> PortResult<String>;
}

#[async_trait]
pub trait TopicClassificationService: Send + Sync {
    /// Labels a question with its academic subject in one or two words.
    async fn classify_topic(&self, question: &str) -> PortResult<String>;
}

#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translates educational text into the named target language.
    async fn translate(&self, text: &str, target_language: &str) -> PortResult<String>;
}

#[async_trait]
pub trait IllustrationService: Send + Sync {
    /// Generates an educational illustration for a concept. Returns raw PNG bytes.
    async fn generate_illustration(&self, concept: &str) -> PortResult<Vec<u8>>;
}

#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Synthesizes speech for the given text.
    /// Returns raw 16-bit PCM samples at 24 kHz, mono.
    async fn synthesize(&self, text: &str) -> PortResult<Vec<u8>>;
}

#[async_trait]
pub trait QuizService: Send + Sync {
    /// Generates a multiple-choice quiz from pasted study notes.
    async fn generate_quiz(&self, notes: &str) -> PortResult<Vec<QuizQuestion>>;
}
