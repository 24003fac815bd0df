use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{Mood, MoodCheckIn, StudentRecord};

/// Canned cohort for running the triage pass without a database, also used
/// as seed data. Ids are fixed so re-seeding stays idempotent.
pub fn snapshot() -> anyhow::Result<(Vec<StudentRecord>, Vec<MoodCheckIn>)> {
    let students = vec![
        StudentRecord {
            id: Uuid::parse_str("5b2e61a9-7c14-4c43-9f0e-2a8d30b1f6d4")?,
            full_name: "Amara Osei".to_string(),
            email: "amara.osei@mindcare.ai".to_string(),
        },
        StudentRecord {
            id: Uuid::parse_str("1f6b5c02-83ab-4c56-9d61-47f0acbb62e9")?,
            full_name: "Jonas Weber".to_string(),
            email: "jonas.weber@mindcare.ai".to_string(),
        },
        StudentRecord {
            id: Uuid::parse_str("c4a8e7d3-51fd-49f2-8a34-9be06f2c11a8")?,
            full_name: "Priya Nair".to_string(),
            email: "priya.nair@mindcare.ai".to_string(),
        },
        StudentRecord {
            id: Uuid::parse_str("8d301b44-6e0a-4f7b-b6d2-0c95f41e7a23")?,
            full_name: "Tom Svensson".to_string(),
            email: "tom.svensson@mindcare.ai".to_string(),
        },
    ];

    let now = Utc::now();

    // Amara: a week sliding from great to terrible (high priority).
    // Jonas: mostly fine with one recent dip (medium).
    // Priya: consistently positive (low).
    // Tom: registered but never checked in.
    let checkins = vec![
        checkin(&students[0], 0, Mood::Terrible, now),
        checkin(&students[0], 1, Mood::Terrible, now),
        checkin(&students[0], 2, Mood::Bad, now),
        checkin(&students[0], 3, Mood::Okay, now),
        checkin(&students[0], 4, Mood::Great, now),
        checkin(&students[0], 5, Mood::Great, now),
        checkin(&students[1], 1, Mood::Okay, now),
        checkin(&students[1], 3, Mood::Bad, now),
        checkin(&students[1], 5, Mood::Great, now),
        checkin(&students[1], 8, Mood::Great, now),
        checkin(&students[1], 12, Mood::Okay, now),
        checkin(&students[2], 0, Mood::Great, now),
        checkin(&students[2], 2, Mood::Great, now),
        checkin(&students[2], 4, Mood::Okay, now),
        checkin(&students[2], 6, Mood::Great, now),
    ];

    Ok((students, checkins))
}

fn checkin(
    student: &StudentRecord,
    days_ago: i64,
    mood: Mood,
    now: DateTime<Utc>,
) -> MoodCheckIn {
    MoodCheckIn {
        student_id: student.id,
        mood,
        recorded_at: now - Duration::days(days_ago),
    }
}
