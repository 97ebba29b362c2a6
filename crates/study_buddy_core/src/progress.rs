//! crates/study_buddy_core/src/progress.rs
//!
//! The pure progress/streak computation. Persistence is the caller's job
//! (see [`crate::tracker::ProgressTracker`]).

use chrono::NaiveDate;
use crate::domain::UserProgress;

/// Fixed study-time quantum credited per recorded question, in hours.
pub const HOURS_PER_QUESTION: f64 = 0.1;

/// Computes the next progress record after one completed question.
///
/// - `total_questions` grows by 1 and the topic's tally by 1, so the sum of
///   `topics_mastered` always equals `total_questions`.
/// - `study_hours` grows by [`HOURS_PER_QUESTION`], rounded to one decimal
///   place so repeated additions do not drift.
/// - The streak changes only when `today` differs from `last_study_date`:
///   +1 when exactly one calendar day has elapsed, reset to 1 otherwise.
///   A `last_study_date` in the future counts as "otherwise" and resets the
///   streak rather than failing. After any recording the streak is at least
///   1: a day with a question is, by definition, a streak day.
pub fn advance(mut progress: UserProgress, topic: &str, today: NaiveDate) -> UserProgress {
    progress.total_questions += 1;
    progress.study_hours = round_to_tenth(progress.study_hours + HOURS_PER_QUESTION);

    *progress
        .topics_mastered
        .entry(topic.to_string())
        .or_insert(0) += 1;

    if progress.last_study_date != today {
        let continues = progress.last_study_date.succ_opt() == Some(today);
        progress.streak = if continues { progress.streak + 1 } else { 1 };
        progress.last_study_date = today;
    }
    progress.streak = progress.streak.max(1);

    progress
}

fn round_to_tenth(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn first_question_from_default_record() {
        // The default record carries the date it was created on; the first
        // question can land on any later day.
        let today = day("2024-01-01");
        let updated = advance(UserProgress::empty(day("2023-12-01")), "Mathematics", today);

        assert_eq!(updated.total_questions, 1);
        assert_eq!(updated.study_hours, 0.1);
        assert_eq!(updated.topics_mastered["Mathematics"], 1);
        assert_eq!(updated.streak, 1);
        assert_eq!(updated.last_study_date, today);
    }

    #[test]
    fn first_question_on_the_creation_day_starts_the_streak() {
        // The default record carries its creation date, so the very first
        // question can land on the same calendar day. A day with a question
        // is a streak day, so the streak must come out at 1, not stay 0.
        let today = day("2024-01-01");
        let updated = advance(UserProgress::empty(today), "Mathematics", today);

        assert_eq!(updated.total_questions, 1);
        assert_eq!(updated.study_hours, 0.1);
        assert_eq!(updated.topics_mastered["Mathematics"], 1);
        assert_eq!(updated.streak, 1);
        assert_eq!(updated.last_study_date, today);
    }

    #[test]
    fn topic_tallies_sum_to_total() {
        let today = day("2024-03-10");
        let mut progress = UserProgress::empty(today);
        for topic in ["Mathematics", "History", "Mathematics", "Life Sciences"] {
            progress = advance(progress, topic, today);
        }

        assert_eq!(progress.total_questions, 4);
        let tally_sum: u64 = progress.topics_mastered.values().sum();
        assert_eq!(tally_sum, progress.total_questions);
        assert_eq!(progress.topics_mastered["Mathematics"], 2);
    }

    #[test]
    fn study_hours_do_not_drift() {
        let today = day("2024-03-10");
        let mut progress = UserProgress::empty(today);
        for _ in 0..10 {
            progress = advance(progress, "Physics", today);
        }
        // Ten additions of 0.1 must land exactly on 1.0, not 0.9999....
        assert_eq!(progress.study_hours, 1.0);
    }

    #[test]
    fn same_day_leaves_streak_unchanged() {
        let today = day("2024-01-01");
        let mut progress = UserProgress::empty(today);
        progress.streak = 3;

        let updated = advance(progress, "History", today);
        assert_eq!(updated.streak, 3);
        assert_eq!(updated.last_study_date, today);
    }

    #[test]
    fn consecutive_day_extends_streak() {
        let mut progress = UserProgress::empty(day("2024-01-01"));
        progress.streak = 3;

        let updated = advance(progress, "History", day("2024-01-02"));
        assert_eq!(updated.streak, 4);
        assert_eq!(updated.last_study_date, day("2024-01-02"));
    }

    #[test]
    fn gap_resets_streak() {
        let mut progress = UserProgress::empty(day("2024-01-01"));
        progress.streak = 5;

        let updated = advance(progress, "History", day("2024-01-05"));
        assert_eq!(updated.streak, 1);
        assert_eq!(updated.last_study_date, day("2024-01-05"));
    }

    #[test]
    fn future_last_study_date_resets_streak() {
        // Clock skew: the stored date is ahead of "today". Fail open with a
        // reset instead of erroring.
        let mut progress = UserProgress::empty(day("2024-06-20"));
        progress.streak = 7;

        let updated = advance(progress, "Geography", day("2024-06-15"));
        assert_eq!(updated.streak, 1);
        assert_eq!(updated.last_study_date, day("2024-06-15"));
    }

    #[test]
    fn streak_across_month_boundary() {
        let mut progress = UserProgress::empty(day("2024-01-31"));
        progress.streak = 2;

        let updated = advance(progress, "History", day("2024-02-01"));
        assert_eq!(updated.streak, 3);
    }
}
