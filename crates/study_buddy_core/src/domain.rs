//! crates/study_buddy_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! Field names serialize as camelCase to stay compatible with the JSON
//! documents the browser client reads and writes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One record per question asked. Immutable once created; entries are
/// prepended to the history and never edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyEntry {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    /// Short subject label produced by the topic classifier.
    pub topic: String,
    pub timestamp: DateTime<Utc>,
    /// Name of the source material (e.g. uploaded notes file), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_used: Option<String>,
    /// Whether the user attached an image to the question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_image: Option<bool>,
    /// Data-URL reference to a generated illustration, if one was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_image_url: Option<String>,
}

impl StudyEntry {
    /// Creates a new entry stamped with a fresh id and the current instant.
    pub fn new(question: String, answer: String, topic: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            answer,
            topic,
            timestamp: Utc::now(),
            notes_used: None,
            has_image: None,
            generated_image_url: None,
        }
    }
}

/// The singleton per-installation progress record.
///
/// Invariant: `total_questions` equals the sum of all values in
/// `topics_mastered`. Both are only ever advanced through
/// [`crate::progress::advance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub total_questions: u64,
    /// Cumulative estimated study time, advanced by a fixed quantum per
    /// question and kept rounded to one decimal place.
    pub study_hours: f64,
    pub topics_mastered: HashMap<String, u64>,
    /// Count of consecutive calendar days with at least one question.
    pub streak: u32,
    /// Calendar date of the last recorded study activity.
    pub last_study_date: NaiveDate,
}

impl UserProgress {
    /// The default record substituted when no progress document exists yet.
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            total_questions: 0,
            study_hours: 0.0,
            topics_mastered: HashMap::new(),
            streak: 0,
            last_study_date: today,
        }
    }
}

/// A single multiple-choice quiz question generated from pasted notes.
/// Produced by the AI gateway and returned to the client, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct choice.
    pub correct_answer: usize,
    pub explanation: String,
}

/// Question count for one calendar day, used by the dashboard activity chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: usize,
}
