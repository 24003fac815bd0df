use crate::models::{Confidence, InsightSummary, MoodCheckIn, TrendAssessment, TrendDirection};
use crate::scoring::{
    bad_mood_count, mood_score, recent_window, sort_newest_first, RECENT_SAMPLE, TREND_WINDOW_DAYS,
};

/// Classifies a student's short-term mood direction from the trailing week
/// of check-ins. Fewer than two usable entries yields `stable` with no
/// percentage, which callers render as "no data" instead of a misleading
/// 0% shift.
pub fn analyze_trend(history: &[MoodCheckIn]) -> TrendAssessment {
    if history.len() < 2 {
        return TrendAssessment {
            direction: TrendDirection::Stable,
            percent_change: None,
        };
    }

    let recent = recent_window(history, TREND_WINDOW_DAYS);
    if recent.len() < 2 {
        return TrendAssessment {
            direction: TrendDirection::Stable,
            percent_change: None,
        };
    }

    // Newest half of the window against the older half.
    let split = (recent.len() + 1) / 2;
    let current_avg = average_score(&recent[..split]);
    let previous_avg = average_score(&recent[split..]);
    let diff = current_avg - previous_avg;

    let percent_change = if previous_avg != 0.0 {
        Some(((diff.abs() / previous_avg) * 100.0).round() as u32)
    } else {
        Some(0)
    };

    let direction = if diff > 0.5 {
        TrendDirection::Improving
    } else if diff < -0.5 {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    TrendAssessment {
        direction,
        percent_change,
    }
}

/// Summarizes the five most recent check-ins regardless of age. This is a
/// wider net than the 7-day trend window, so a student who went quiet can
/// still carry an insight while the trend reads "no data".
pub fn generate_insight(history: &[MoodCheckIn]) -> InsightSummary {
    if history.is_empty() {
        return InsightSummary {
            text: "No data available for analysis.".to_string(),
            confidence: Confidence::Low,
        };
    }

    let sorted = sort_newest_first(history);
    let sample = &sorted[..sorted.len().min(RECENT_SAMPLE)];

    match bad_mood_count(sample) {
        n if n >= 3 => InsightSummary {
            text: "Pattern of persistent low mood detected this week.".to_string(),
            confidence: Confidence::High,
        },
        0 => InsightSummary {
            text: "Consistently positive mood reported recently.".to_string(),
            confidence: Confidence::High,
        },
        _ => InsightSummary {
            text: "Mood fluctuations appear normal for this period.".to_string(),
            confidence: Confidence::Medium,
        },
    }
}

fn average_score(entries: &[MoodCheckIn]) -> f64 {
    let total: i64 = entries.iter().map(|entry| mood_score(entry.mood)).sum();
    total as f64 / entries.len() as f64
}
