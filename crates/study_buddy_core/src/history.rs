//! crates/study_buddy_core/src/history.rs
//!
//! Read-path helpers over the stored history. Mutation goes through
//! [`crate::ports::StudyStore::append_entry`] only.

use chrono::NaiveDate;

use crate::domain::{DailyActivity, StudyEntry};

/// Counts questions per calendar day over a trailing window ending on
/// `today`, oldest day first. Days with no activity are included with a
/// count of zero so the dashboard chart has a fixed number of bars.
pub fn daily_activity(entries: &[StudyEntry], today: NaiveDate, days: u32) -> Vec<DailyActivity> {
    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(chrono::Days::new(offset as u64)))
        .map(|date| DailyActivity {
            date,
            count: entries
                .iter()
                .filter(|e| e.timestamp.date_naive() == date)
                .count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry_on(date: &str, hour: u32) -> StudyEntry {
        let date: NaiveDate = date.parse().unwrap();
        let mut entry = StudyEntry::new(
            "What is photosynthesis?".to_string(),
            "Plants convert light into chemical energy.".to_string(),
            "Life Sciences".to_string(),
        );
        entry.timestamp = Utc
            .from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap());
        entry
    }

    #[test]
    fn counts_entries_per_day_oldest_first() {
        let entries = vec![
            entry_on("2024-05-03", 9),
            entry_on("2024-05-03", 14),
            entry_on("2024-05-01", 8),
        ];
        let today: NaiveDate = "2024-05-03".parse().unwrap();

        let activity = daily_activity(&entries, today, 5);
        assert_eq!(activity.len(), 5);
        assert_eq!(activity[0].date, "2024-04-29".parse().unwrap());
        assert_eq!(activity[0].count, 0);
        assert_eq!(activity[2].count, 1); // 2024-05-01
        assert_eq!(activity[4].date, today);
        assert_eq!(activity[4].count, 2);
    }

    #[test]
    fn entries_outside_the_window_are_ignored() {
        let entries = vec![entry_on("2024-04-01", 10)];
        let today: NaiveDate = "2024-05-03".parse().unwrap();

        let activity = daily_activity(&entries, today, 5);
        assert!(activity.iter().all(|day| day.count == 0));
    }

    #[test]
    fn empty_history_yields_a_zeroed_window() {
        let today: NaiveDate = "2024-05-03".parse().unwrap();
        let activity = daily_activity(&[], today, 5);
        assert_eq!(activity.len(), 5);
        assert!(activity.iter().all(|day| day.count == 0));
    }
}
