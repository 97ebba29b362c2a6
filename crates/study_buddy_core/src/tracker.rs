//! crates/study_buddy_core/src/tracker.rs
//!
//! The progress tracker component: reads the current record from the store,
//! advances it through the pure computation, and writes it back.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::UserProgress;
use crate::ports::{PortResult, StudyStore};
use crate::progress;

/// Records completed questions against the persisted progress record.
///
/// The store handle is injected explicitly; there is no ambient storage
/// singleton anywhere in the core.
pub struct ProgressTracker {
    store: Arc<dyn StudyStore>,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn StudyStore>) -> Self {
        Self { store }
    }

    /// Records one completed question on `today` and returns the updated
    /// record after persisting it.
    pub async fn record_question(&self, topic: &str, today: NaiveDate) -> PortResult<UserProgress> {
        let current = self.store.read_progress().await?;
        let updated = progress::advance(current, topic, today);
        self.store.write_progress(&updated).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StudyEntry;
    use crate::ports::StudyStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// An in-memory store standing in for the JSON file adapter.
    #[derive(Default)]
    struct MemoryStore {
        history: Mutex<Vec<StudyEntry>>,
        progress: Mutex<Option<UserProgress>>,
    }

    #[async_trait]
    impl StudyStore for MemoryStore {
        async fn read_history(&self) -> PortResult<Vec<StudyEntry>> {
            Ok(self.history.lock().unwrap().clone())
        }

        async fn write_history(&self, entries: &[StudyEntry]) -> PortResult<()> {
            *self.history.lock().unwrap() = entries.to_vec();
            Ok(())
        }

        async fn append_entry(&self, entry: StudyEntry) -> PortResult<()> {
            self.history.lock().unwrap().insert(0, entry);
            Ok(())
        }

        async fn read_progress(&self) -> PortResult<UserProgress> {
            // The default record predates every date the tests record on.
            let stored = self.progress.lock().unwrap().clone();
            Ok(stored.unwrap_or_else(|| UserProgress::empty(day("2023-12-31"))))
        }

        async fn write_progress(&self, progress: &UserProgress) -> PortResult<()> {
            *self.progress.lock().unwrap() = Some(progress.clone());
            Ok(())
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn record_question_persists_the_updated_record() {
        let store = Arc::new(MemoryStore::default());
        let tracker = ProgressTracker::new(store.clone());

        let returned = tracker
            .record_question("Mathematics", day("2024-01-01"))
            .await
            .unwrap();
        assert_eq!(returned.total_questions, 1);
        assert_eq!(returned.streak, 1);

        // The value returned must be the value persisted.
        let stored = store.read_progress().await.unwrap();
        assert_eq!(stored, returned);
    }

    #[tokio::test]
    async fn consecutive_days_accumulate_through_the_store() {
        let store = Arc::new(MemoryStore::default());
        let tracker = ProgressTracker::new(store);

        tracker
            .record_question("History", day("2024-01-01"))
            .await
            .unwrap();
        tracker
            .record_question("History", day("2024-01-02"))
            .await
            .unwrap();
        let third = tracker
            .record_question("Mathematics", day("2024-01-03"))
            .await
            .unwrap();

        assert_eq!(third.total_questions, 3);
        assert_eq!(third.streak, 3);
        assert_eq!(third.topics_mastered["History"], 2);
        assert_eq!(third.topics_mastered["Mathematics"], 1);
    }
}
