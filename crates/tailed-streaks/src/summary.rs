//! Profile summary assembled from the two calendar windows.

use chrono::NaiveDate;
use tailed_core::{CalendarWeek, ContributionDay, ContributionSummary};

use crate::activity::{day_of_week_histogram, monthly_histogram, most_productive_day, weekly_buckets};
use crate::merge::{flatten_weeks, merge_weeks};
use crate::streaks::{compute_totals, streak_state};

/// Denominator cap for the per-day average.
pub const AVERAGE_DAY_CAP: usize = 365;

/// Average contributions per day over at most [`AVERAGE_DAY_CAP`] days.
///
/// The cap keeps the figure a per-year rate even when two years of data are
/// merged. Returns `0.0` for an empty list.
///
/// # Examples
///
/// ```
/// use tailed_core::ContributionDay;
/// use tailed_streaks::summary::average_per_day;
///
/// let days: Vec<_> = (0..730).map(|_| ContributionDay::new("2024-01-01", 1)).collect();
/// assert_eq!(average_per_day(&days, 730), 2.0);
/// assert_eq!(average_per_day(&[], 10), 0.0);
/// ```
pub fn average_per_day(days: &[ContributionDay], total_contributions: u64) -> f64 {
    if days.is_empty() {
        return 0.0;
    }
    total_contributions as f64 / days.len().min(AVERAGE_DAY_CAP) as f64
}

/// Active days per seven-day span of the supplied list. `0.0` when empty.
///
/// # Examples
///
/// ```
/// use tailed_core::ContributionDay;
/// use tailed_streaks::summary::active_days_per_week;
///
/// let days: Vec<_> = (1..=14)
///     .map(|d| ContributionDay::new(format!("2024-01-{d:02}"), (d % 2) as u64))
///     .collect();
/// assert_eq!(active_days_per_week(&days), 3.5);
/// ```
pub fn active_days_per_week(days: &[ContributionDay]) -> f64 {
    if days.is_empty() {
        return 0.0;
    }
    let active = days.iter().filter(|d| d.is_active()).count() as f64;
    active / (days.len() as f64 / 7.0)
}

/// Round to one decimal place, halves away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derive the full profile summary from the older and newer calendar windows.
///
/// `today` anchors the current streak; nothing here reads the clock.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tailed_core::{CalendarWeek, ContributionDay};
/// use tailed_streaks::analyze;
///
/// let newer = vec![CalendarWeek {
///     first_day: "2023-12-31".into(),
///     contribution_days: vec![
///         ContributionDay::new("2024-01-01", 3),
///         ContributionDay::new("2024-01-02", 0),
///         ContributionDay::new("2024-01-03", 5),
///         ContributionDay::new("2024-01-04", 2),
///     ],
/// }];
/// let today = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
/// let summary = analyze(&[], &newer, today);
/// assert_eq!(summary.contribution_count, 10);
/// assert_eq!(summary.current_streak, 2);
/// assert_eq!(summary.max_streak, 2);
/// ```
pub fn analyze(
    older: &[CalendarWeek],
    newer: &[CalendarWeek],
    today: NaiveDate,
) -> ContributionSummary {
    let weeks = merge_weeks(older, newer);
    let days = flatten_weeks(&weeks);

    let total = compute_totals(&days);
    let streaks = streak_state(&days, today);
    tracing::debug!(
        days = days.len(),
        weeks = weeks.len(),
        total,
        current_streak = streaks.current_streak,
        max_streak = streaks.max_streak,
        "analyzed contribution calendar"
    );

    ContributionSummary {
        contribution_count: total,
        current_streak: streaks.current_streak,
        max_streak: streaks.max_streak,
        active_days_per_week: round_one_decimal(active_days_per_week(&days)),
        average_contributions_per_day: round_one_decimal(average_per_day(&days, total)),
        most_productive_day: most_productive_day(&days),
        weekly_contributions: weekly_buckets(&weeks),
        day_of_week_activity: day_of_week_histogram(&days),
        monthly_activity: monthly_histogram(&days),
    }
}
