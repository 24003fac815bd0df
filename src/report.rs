use std::collections::HashMap;
use std::fmt::Write;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::{DailyMood, Mood, MoodCheckIn, MoodCount, PriorityTier, StudentRecord};
use crate::scoring::{mood_score, sort_newest_first};
use crate::trend::{analyze_trend, generate_insight};
use crate::triage::rank_students;

pub fn mood_distribution(checkins: &[MoodCheckIn]) -> Vec<MoodCount> {
    let mut map: HashMap<Mood, usize> = HashMap::new();
    for checkin in checkins {
        *map.entry(checkin.mood).or_insert(0) += 1;
    }

    let mut counts: Vec<MoodCount> = map
        .into_iter()
        .map(|(mood, count)| MoodCount { mood, count })
        .collect();

    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.mood.as_str().cmp(b.mood.as_str()))
    });
    counts
}

/// Scores for the trailing `days`, oldest day first. Days with no
/// check-in score 0; where a day has several, the first one found wins,
/// matching the student dashboard chart.
pub fn daily_series(history: &[MoodCheckIn], days: i64) -> Vec<DailyMood> {
    let today = Utc::now().date_naive();
    (0..days)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            let score = history
                .iter()
                .find(|entry| entry.recorded_at.date_naive() == day)
                .map(|entry| mood_score(entry.mood))
                .unwrap_or(0);
            DailyMood { day, score }
        })
        .collect()
}

pub fn build_report(students: &[StudentRecord], checkins: &[MoodCheckIn]) -> String {
    let queue = rank_students(students, checkins);
    let distribution = mood_distribution(checkins);
    let high = queue
        .iter()
        .filter(|entry| entry.tier == PriorityTier::High)
        .count();
    let medium = queue
        .iter()
        .filter(|entry| entry.tier == PriorityTier::Medium)
        .count();

    let mut output = String::new();
    let _ = writeln!(output, "# Student Triage Report");
    let _ = writeln!(
        output,
        "{} students, {} check-ins ({} high priority, {} medium)",
        students.len(),
        checkins.len(),
        high,
        medium
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Mood Mix");

    if distribution.is_empty() {
        let _ = writeln!(output, "No check-ins recorded for this cohort.");
    } else {
        for count in distribution.iter() {
            let _ = writeln!(
                output,
                "- {}: {} check-ins",
                count.mood.as_str(),
                count.count
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Priority Queue");

    if queue.is_empty() {
        let _ = writeln!(output, "No students found.");
    } else {
        for entry in queue.iter() {
            let assessment = analyze_trend(&entry.history);
            let insight = generate_insight(&entry.history);
            let trend_label = match assessment.percent_change {
                Some(pct) => format!("{} ({}%)", assessment.direction.as_str(), pct),
                None => format!("{} (no data)", assessment.direction.as_str()),
            };
            let _ = writeln!(
                output,
                "- [{}] {} ({}): {}; trend {}; {} (confidence {})",
                entry.tier.as_str(),
                entry.student.full_name,
                entry.student.email,
                entry.reason,
                trend_label,
                insight.text,
                insight.confidence.as_str()
            );
        }
    }

    let names: HashMap<Uuid, &str> = students
        .iter()
        .map(|student| (student.id, student.full_name.as_str()))
        .collect();
    let recent = sort_newest_first(checkins);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Check-ins");

    if recent.is_empty() {
        let _ = writeln!(output, "No check-ins recorded for this cohort.");
    } else {
        for checkin in recent.iter().take(5) {
            let name = names.get(&checkin.student_id).copied().unwrap_or("unknown");
            let _ = writeln!(
                output,
                "- {} reported {} on {}",
                name,
                checkin.mood.as_str(),
                checkin.recorded_at.format("%Y-%m-%d")
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student(full_name: &str, email: &str) -> StudentRecord {
        StudentRecord {
            id: Uuid::new_v4(),
            full_name: full_name.to_string(),
            email: email.to_string(),
        }
    }

    fn sample_checkin(student: &StudentRecord, hours_ago: i64, mood: Mood) -> MoodCheckIn {
        MoodCheckIn {
            student_id: student.id,
            mood,
            recorded_at: Utc::now() - Duration::hours(hours_ago),
        }
    }

    #[test]
    fn distribution_counts_each_label() {
        let student = sample_student("Avery Lee", "avery@example.edu");
        let checkins = vec![
            sample_checkin(&student, 1, Mood::Great),
            sample_checkin(&student, 2, Mood::Great),
            sample_checkin(&student, 3, Mood::Bad),
        ];

        let counts = mood_distribution(&checkins);
        assert_eq!(
            counts,
            vec![
                MoodCount {
                    mood: Mood::Great,
                    count: 2
                },
                MoodCount {
                    mood: Mood::Bad,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn daily_series_fills_quiet_days_with_zero() {
        let student = sample_student("Avery Lee", "avery@example.edu");
        let history = vec![
            sample_checkin(&student, 0, Mood::Great),
            sample_checkin(&student, 24 * 2, Mood::Bad),
        ];

        let series = daily_series(&history, 7);
        assert_eq!(series.len(), 7);
        assert_eq!(series[6].score, 4);
        assert_eq!(series[4].score, 2);
        assert_eq!(series[0].score, 0);
    }

    #[test]
    fn report_orders_queue_by_priority() {
        let calm = sample_student("Calm Student", "calm@example.edu");
        let struggling = sample_student("Struggling Student", "struggling@example.edu");
        let mut checkins = vec![sample_checkin(&calm, 1, Mood::Great)];
        checkins.extend((0..3).map(|day| sample_checkin(&struggling, day * 24, Mood::Terrible)));

        let report = build_report(&[calm, struggling], &checkins);
        let struggling_at = report.find("Struggling Student").unwrap();
        let calm_at = report.find("Calm Student").unwrap();
        assert!(struggling_at < calm_at);
        assert!(report.contains("[High]"));
        assert!(report.contains("Persistent low mood"));
    }

    #[test]
    fn empty_cohort_report_still_renders() {
        let report = build_report(&[], &[]);
        assert!(report.contains("No students found."));
        assert!(report.contains("No check-ins recorded for this cohort."));
    }
}
