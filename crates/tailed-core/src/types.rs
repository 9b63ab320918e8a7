use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar date format used by the contributions calendar (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One calendar date's contribution count.
///
/// The date is kept exactly as the upstream calendar reported it. It is only
/// parsed where ordering or weekday/month grouping needs a real date, so a
/// malformed value never aborts an analysis.
///
/// # Examples
///
/// ```
/// use tailed_core::ContributionDay;
///
/// let day = ContributionDay::new("2024-01-03", 5);
/// assert_eq!(day.contribution_count, 5);
/// assert!(day.parsed_date().is_some());
/// assert!(ContributionDay::new("not-a-date", 1).parsed_date().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    /// Calendar date, `YYYY-MM-DD`, no time or zone component.
    pub date: String,
    /// Number of contributions recorded on that date.
    pub contribution_count: u64,
}

impl ContributionDay {
    /// Build a day from a date string and a count.
    pub fn new(date: impl Into<String>, contribution_count: u64) -> Self {
        Self {
            date: date.into(),
            contribution_count,
        }
    }

    /// Parse the date as a naive calendar date, `None` if malformed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Whether any contribution was recorded on this day.
    pub fn is_active(&self) -> bool {
        self.contribution_count > 0
    }
}

/// A week unit as delivered by the contributions calendar.
///
/// Week boundaries are the upstream calendar's own, not ISO weeks.
///
/// # Examples
///
/// ```
/// use tailed_core::{CalendarWeek, ContributionDay};
///
/// let week = CalendarWeek {
///     first_day: "2024-01-07".into(),
///     contribution_days: vec![ContributionDay::new("2024-01-07", 2)],
/// };
/// assert_eq!(week.contribution_days.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    /// Date of the first day in the week.
    pub first_day: String,
    /// Chronological days of the week (at most seven).
    #[serde(default)]
    pub contribution_days: Vec<ContributionDay>,
}

/// Aggregated week for heatmap display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBucket {
    /// First day of the week as reported by the source calendar.
    pub week_start_date: String,
    /// Sum of `contribution_count` over `days`.
    pub total_count: u64,
    /// Chronological days, at most seven.
    pub days: Vec<ContributionDay>,
}

/// Streak counters derived from a day list.
///
/// # Examples
///
/// ```
/// use tailed_core::StreakState;
///
/// let state = StreakState::default();
/// assert_eq!(state.current_streak, 0);
/// assert_eq!(state.max_streak, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    /// Consecutive active days ending today (or yesterday if today is still empty).
    pub current_streak: u32,
    /// Longest run of active days in the supplied sequence.
    pub max_streak: u32,
    /// Days with at least one contribution.
    pub active_days: u32,
}

/// The busiest single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostProductiveDay {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Contributions on that date.
    pub contributions: u64,
}

/// Contributions within one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActivity {
    /// Month key, `YYYY-MM`.
    pub month: String,
    /// Sum of contributions in the month.
    pub count: u64,
}

/// Profile statistics produced from two years of contribution calendar data.
///
/// Serializes with camelCase keys so it can be merged directly into a user
/// profile record.
///
/// # Examples
///
/// ```
/// use tailed_core::ContributionSummary;
///
/// let summary = ContributionSummary::default();
/// let json = serde_json::to_value(&summary).unwrap();
/// assert_eq!(json["contributionCount"], 0);
/// assert!(json["mostProductiveDay"].is_null());
/// assert_eq!(json["dayOfWeekActivity"].as_array().unwrap().len(), 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSummary {
    /// Total contributions across both windows.
    pub contribution_count: u64,
    /// Current daily streak.
    pub current_streak: u32,
    /// Longest daily streak.
    pub max_streak: u32,
    /// Average active days per week, one decimal place.
    pub active_days_per_week: f64,
    /// Average contributions per day over at most 365 days, one decimal place.
    pub average_contributions_per_day: f64,
    /// Busiest day, `None` when there is no data.
    pub most_productive_day: Option<MostProductiveDay>,
    /// Week-by-week heatmap data, older window first.
    pub weekly_contributions: Vec<WeeklyBucket>,
    /// Contributions per weekday, Sunday first.
    pub day_of_week_activity: [u64; 7],
    /// Months ranked by activity, busiest first.
    pub monthly_activity: Vec<MonthlyActivity>,
}

/// Output format for CLI results.
///
/// # Examples
///
/// ```
/// use tailed_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
/// assert_eq!(fmt.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
    /// Markdown-formatted output.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
