//! services/api/src/adapters/store.rs
//!
//! This module contains the storage adapter, which is the concrete implementation
//! of the `StudyStore` port from the `core` crate. It keeps the two application
//! documents (history and progress) as JSON files under a data directory,
//! mirroring the fixed localStorage keys the browser client used.

use async_trait::async_trait;
use chrono::Local;
use std::path::{Path, PathBuf};
use study_buddy_core::domain::{StudyEntry, UserProgress};
use study_buddy_core::ports::{PortError, PortResult, StudyStore};
use tokio::sync::Mutex;

/// Fixed document names within the data directory.
const HISTORY_FILE: &str = "history.json";
const PROGRESS_FILE: &str = "progress.json";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A file-backed storage adapter that implements the `StudyStore` port.
///
/// Each call reads or writes one document whole. A single write lock keeps
/// the read-modify-write of `append_entry` consistent; progress updates are
/// composed by the `ProgressTracker`, which is driven by one logical actor.
pub struct JsonFileStore {
    history_path: PathBuf,
    progress_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    pub async fn open(data_dir: &Path) -> Result<Self, std::io::Error> {
        tokio::fs::create_dir_all(data_dir).await?;
        Ok(Self {
            history_path: data_dir.join(HISTORY_FILE),
            progress_path: data_dir.join(PROGRESS_FILE),
            write_lock: Mutex::new(()),
        })
    }

    /// Reads and decodes one document. Absence yields `None`; a document
    /// that exists but cannot be decoded is a `CorruptState` error rather
    /// than a silent fallback to defaults.
    async fn read_document<T: serde::de::DeserializeOwned>(
        path: &Path,
    ) -> PortResult<Option<T>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };
        let value = serde_json::from_slice(&bytes).map_err(|e| {
            PortError::CorruptState(format!("{}: {}", path.display(), e))
        })?;
        Ok(Some(value))
    }

    async fn write_document<T: serde::Serialize>(path: &Path, value: &T) -> PortResult<()> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

//=========================================================================================
// `StudyStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl StudyStore for JsonFileStore {
    async fn read_history(&self) -> PortResult<Vec<StudyEntry>> {
        Ok(Self::read_document(&self.history_path)
            .await?
            .unwrap_or_default())
    }

    async fn write_history(&self, entries: &[StudyEntry]) -> PortResult<()> {
        let _guard = self.write_lock.lock().await;
        Self::write_document(&self.history_path, &entries).await
    }

    async fn append_entry(&self, entry: StudyEntry) -> PortResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut history: Vec<StudyEntry> = Self::read_document(&self.history_path)
            .await?
            .unwrap_or_default();
        history.insert(0, entry);
        Self::write_document(&self.history_path, &history).await
    }

    async fn read_progress(&self) -> PortResult<UserProgress> {
        let stored: Option<UserProgress> = Self::read_document(&self.progress_path).await?;
        Ok(stored.unwrap_or_else(|| UserProgress::empty(Local::now().date_naive())))
    }

    async fn write_progress(&self, progress: &UserProgress) -> PortResult<()> {
        let _guard = self.write_lock.lock().await;
        Self::write_document(&self.progress_path, progress).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_store() -> (TempDir, JsonFileStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    fn entry(question: &str) -> StudyEntry {
        StudyEntry::new(
            question.to_string(),
            "An answer.".to_string(),
            "Mathematics".to_string(),
        )
    }

    #[tokio::test]
    async fn empty_store_reads_defaults() {
        let (_dir, store) = open_store().await;

        assert!(store.read_history().await.unwrap().is_empty());

        let progress = store.read_progress().await.unwrap();
        assert_eq!(progress.total_questions, 0);
        assert_eq!(progress.study_hours, 0.0);
        assert!(progress.topics_mastered.is_empty());
        assert_eq!(progress.streak, 0);
        assert_eq!(progress.last_study_date, Local::now().date_naive());
    }

    #[tokio::test]
    async fn append_is_prepend_only_and_order_preserving() {
        let (_dir, store) = open_store().await;

        store.append_entry(entry("first question")).await.unwrap();
        store.append_entry(entry("second question")).await.unwrap();

        let history = store.read_history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].question, "second question");
        assert_eq!(history[1].question, "first question");
    }

    #[tokio::test]
    async fn progress_round_trips_through_the_file() {
        let (_dir, store) = open_store().await;

        let mut progress = UserProgress::empty("2024-01-01".parse().unwrap());
        progress.total_questions = 3;
        progress.study_hours = 0.3;
        progress.topics_mastered.insert("History".to_string(), 3);
        progress.streak = 2;

        store.write_progress(&progress).await.unwrap();
        let first = store.read_progress().await.unwrap();
        let second = store.read_progress().await.unwrap();
        assert_eq!(first, progress);
        // Reads without an intervening write return equal values.
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn corrupt_document_is_reported_not_replaced() {
        let (dir, store) = open_store().await;
        tokio::fs::write(dir.path().join("progress.json"), b"{not json")
            .await
            .unwrap();

        let err = store.read_progress().await.unwrap_err();
        assert!(matches!(err, PortError::CorruptState(_)));
    }

    #[tokio::test]
    async fn stored_documents_use_camel_case_keys() {
        let (dir, store) = open_store().await;
        let progress = UserProgress::empty("2024-01-01".parse().unwrap());
        store.write_progress(&progress).await.unwrap();

        let raw = tokio::fs::read_to_string(dir.path().join("progress.json"))
            .await
            .unwrap();
        assert!(raw.contains("\"totalQuestions\""));
        assert!(raw.contains("\"lastStudyDate\": \"2024-01-01\""));
    }
}
