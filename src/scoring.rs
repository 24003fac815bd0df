use chrono::Utc;

use crate::models::{Mood, MoodCheckIn};

/// Trailing window used for trend classification.
pub const TREND_WINDOW_DAYS: i64 = 7;
/// Number of most-recent check-ins sampled for insights and triage.
pub const RECENT_SAMPLE: usize = 5;

pub fn mood_score(mood: Mood) -> i64 {
    match mood {
        Mood::Great => 4,
        Mood::Okay => 3,
        Mood::Bad => 2,
        Mood::Terrible => 1,
        Mood::Unknown => 0,
    }
}

pub fn sort_newest_first(history: &[MoodCheckIn]) -> Vec<MoodCheckIn> {
    let mut sorted = history.to_vec();
    sorted.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    sorted
}

/// Check-ins recorded within the trailing `days`, most recent first.
pub fn recent_window(history: &[MoodCheckIn], days: i64) -> Vec<MoodCheckIn> {
    let now = Utc::now();
    let mut recent: Vec<MoodCheckIn> = history
        .iter()
        .filter(|entry| (now - entry.recorded_at).num_days() <= days)
        .cloned()
        .collect();
    recent.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    recent
}

pub fn bad_mood_count(entries: &[MoodCheckIn]) -> usize {
    entries.iter().filter(|entry| entry.mood.is_low()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn sample_checkin(days_ago: i64, mood: Mood) -> MoodCheckIn {
        MoodCheckIn {
            student_id: Uuid::new_v4(),
            mood,
            recorded_at: Utc::now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn scores_increase_with_mood() {
        assert!(mood_score(Mood::Terrible) < mood_score(Mood::Bad));
        assert!(mood_score(Mood::Bad) < mood_score(Mood::Okay));
        assert!(mood_score(Mood::Okay) < mood_score(Mood::Great));
    }

    #[test]
    fn unrecognized_mood_scores_zero() {
        assert_eq!(mood_score(Mood::Unknown), 0);
        assert_eq!(mood_score(Mood::from_label("meh")), 0);
    }

    #[test]
    fn recent_window_drops_old_entries() {
        let history = vec![
            sample_checkin(2, Mood::Okay),
            sample_checkin(20, Mood::Bad),
            sample_checkin(5, Mood::Great),
        ];

        let recent = recent_window(&history, TREND_WINDOW_DAYS);
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn recent_window_orders_newest_first() {
        let history = vec![
            sample_checkin(5, Mood::Bad),
            sample_checkin(1, Mood::Great),
            sample_checkin(3, Mood::Okay),
        ];

        let recent = recent_window(&history, TREND_WINDOW_DAYS);
        let moods: Vec<Mood> = recent.iter().map(|entry| entry.mood).collect();
        assert_eq!(moods, vec![Mood::Great, Mood::Okay, Mood::Bad]);
    }

    #[test]
    fn bad_mood_count_covers_both_low_labels() {
        let entries = vec![
            sample_checkin(0, Mood::Terrible),
            sample_checkin(1, Mood::Bad),
            sample_checkin(2, Mood::Okay),
            sample_checkin(3, Mood::Unknown),
        ];

        assert_eq!(bad_mood_count(&entries), 2);
    }
}
