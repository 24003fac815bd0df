use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{MoodCheckIn, PriorityEntry, PriorityTier, StudentRecord};
use crate::scoring::{bad_mood_count, RECENT_SAMPLE};

/// Builds the counsellor work queue from a snapshot of every student's
/// check-ins. The sort is stable, so students in the same tier come out in
/// the order they went in and the queue does not churn between renders.
pub fn rank_students(students: &[StudentRecord], checkins: &[MoodCheckIn]) -> Vec<PriorityEntry> {
    let mut by_student: HashMap<Uuid, Vec<MoodCheckIn>> = HashMap::new();
    for checkin in checkins {
        by_student
            .entry(checkin.student_id)
            .or_default()
            .push(checkin.clone());
    }

    let mut entries: Vec<PriorityEntry> = students
        .iter()
        .map(|student| {
            let mut history = by_student.remove(&student.id).unwrap_or_default();
            history.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
            let (tier, reason) = classify(&history);
            PriorityEntry {
                student: student.clone(),
                tier,
                reason: reason.to_string(),
                history,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.tier.weight().cmp(&a.tier.weight()));
    entries
}

/// Tier rules over the five most recent check-ins; `history` must already
/// be sorted most recent first. An empty history gets its own reason so
/// the dashboard can separate settled students from ones who never
/// checked in.
fn classify(history: &[MoodCheckIn]) -> (PriorityTier, &'static str) {
    if history.is_empty() {
        return (PriorityTier::Low, "New student / No data");
    }

    let recent = &history[..history.len().min(RECENT_SAMPLE)];
    match bad_mood_count(recent) {
        n if n >= 3 => (PriorityTier::High, "Persistent low mood"),
        n if n >= 1 => (PriorityTier::Medium, "Recent low mood reported"),
        _ => (PriorityTier::Low, "Stable mood"),
    }
}
