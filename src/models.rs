use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mood label as submitted from the check-in screen. Labels the storage
/// layer hands back that match none of the four known values fold into
/// `Unknown` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Terrible,
    Bad,
    Okay,
    Great,
    #[serde(other)]
    Unknown,
}

impl Mood {
    pub fn from_label(value: &str) -> Mood {
        match value.trim().to_lowercase().as_str() {
            "terrible" => Mood::Terrible,
            "bad" => Mood::Bad,
            "okay" => Mood::Okay,
            "great" => Mood::Great,
            _ => Mood::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Terrible => "terrible",
            Mood::Bad => "bad",
            Mood::Okay => "okay",
            Mood::Great => "great",
            Mood::Unknown => "unknown",
        }
    }

    /// `bad` and `terrible` both count as a low-mood report.
    pub fn is_low(&self) -> bool {
        matches!(self, Mood::Bad | Mood::Terrible)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodCheckIn {
    pub student_id: Uuid,
    pub mood: Mood,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Declining => "declining",
            TrendDirection::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendAssessment {
    pub direction: TrendDirection,
    /// Magnitude of the half-over-half shift. `None` when there are too
    /// few recent check-ins to compare halves.
    pub percent_change: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightSummary {
    pub text: String,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub fn weight(&self) -> u8 {
        match self {
            PriorityTier::High => 3,
            PriorityTier::Medium => 2,
            PriorityTier::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::High => "High",
            PriorityTier::Medium => "Medium",
            PriorityTier::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriorityEntry {
    pub student: StudentRecord,
    pub tier: PriorityTier,
    pub reason: String,
    /// The student's check-ins, most recent first.
    pub history: Vec<MoodCheckIn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyMood {
    pub day: NaiveDate,
    pub score: i64,
}
