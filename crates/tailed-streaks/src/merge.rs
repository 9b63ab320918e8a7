//! Merging the two year windows of a contributions calendar.
//!
//! The calendar API caps a query at one year, so a profile refresh asks for
//! two adjacent windows and concatenates them here. Nothing is deduplicated:
//! if the windows overlap, repeated dates stay as separate entries and are
//! counted twice by every aggregate.

use tailed_core::{CalendarWeek, ContributionDay};

/// Concatenate two day lists, older window first.
///
/// Each window keeps its internal order.
///
/// # Examples
///
/// ```
/// use tailed_core::ContributionDay;
/// use tailed_streaks::merge::merge_years;
///
/// let older = vec![ContributionDay::new("2023-01-01", 1)];
/// let newer = vec![ContributionDay::new("2024-01-01", 2)];
/// let merged = merge_years(&older, &newer);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].date, "2023-01-01");
/// ```
pub fn merge_years(older: &[ContributionDay], newer: &[ContributionDay]) -> Vec<ContributionDay> {
    let mut merged = Vec::with_capacity(older.len() + newer.len());
    merged.extend_from_slice(older);
    merged.extend_from_slice(newer);
    merged
}

/// Concatenate two week lists, older window first.
pub fn merge_weeks(older: &[CalendarWeek], newer: &[CalendarWeek]) -> Vec<CalendarWeek> {
    let mut merged = Vec::with_capacity(older.len() + newer.len());
    merged.extend_from_slice(older);
    merged.extend_from_slice(newer);
    merged
}

/// Flatten calendar weeks into a single chronological day list.
///
/// # Examples
///
/// ```
/// use tailed_core::{CalendarWeek, ContributionDay};
/// use tailed_streaks::merge::flatten_weeks;
///
/// let weeks = vec![
///     CalendarWeek {
///         first_day: "2024-01-07".into(),
///         contribution_days: vec![
///             ContributionDay::new("2024-01-07", 1),
///             ContributionDay::new("2024-01-08", 0),
///         ],
///     },
///     CalendarWeek {
///         first_day: "2024-01-14".into(),
///         contribution_days: vec![ContributionDay::new("2024-01-14", 3)],
///     },
/// ];
/// let days = flatten_weeks(&weeks);
/// assert_eq!(days.len(), 3);
/// assert_eq!(days[2].contribution_count, 3);
/// ```
pub fn flatten_weeks(weeks: &[CalendarWeek]) -> Vec<ContributionDay> {
    weeks
        .iter()
        .flat_map(|w| w.contribution_days.iter().cloned())
        .collect()
}
