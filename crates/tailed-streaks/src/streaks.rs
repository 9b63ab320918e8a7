//! Daily streak and activity counters.
//!
//! The current streak is gap-sensitive: it walks backwards from an anchor
//! date and stops at the first missing or empty day. The max streak is not:
//! it only looks at the literal sequence of entries, so a date absent from
//! the list does not break a run. Both compare naive calendar dates and never
//! timestamps.

use chrono::{Days, NaiveDate};
use tailed_core::{ContributionDay, StreakState};

/// Sum of `contribution_count` over every entry, duplicates included.
///
/// # Examples
///
/// ```
/// use tailed_core::ContributionDay;
/// use tailed_streaks::streaks::compute_totals;
///
/// let days = vec![
///     ContributionDay::new("2024-01-01", 3),
///     ContributionDay::new("2024-01-02", 4),
/// ];
/// assert_eq!(compute_totals(&days), 7);
/// ```
pub fn compute_totals(days: &[ContributionDay]) -> u64 {
    days.iter().map(|d| d.contribution_count).sum()
}

/// Number of entries with at least one contribution.
pub fn active_days(days: &[ContributionDay]) -> u32 {
    days.iter().filter(|d| d.is_active()).count() as u32
}

/// Consecutive active days ending at `today`.
///
/// Entries are ordered newest first. If the newest entry is `today` with no
/// contributions yet, it is skipped and the walk starts from yesterday. The
/// walk then expects one entry per calendar day; a gap, an empty day, or any
/// entry that is not the expected date ends the streak.
///
/// Entries whose date does not parse are ignored.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tailed_core::ContributionDay;
/// use tailed_streaks::streaks::compute_current_streak;
///
/// let days = vec![
///     ContributionDay::new("2024-01-01", 3),
///     ContributionDay::new("2024-01-02", 0),
///     ContributionDay::new("2024-01-03", 5),
///     ContributionDay::new("2024-01-04", 2),
/// ];
/// let today = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
/// assert_eq!(compute_current_streak(&days, today), 2);
/// ```
pub fn compute_current_streak(days: &[ContributionDay], today: NaiveDate) -> u32 {
    let mut dated = dated_entries(days);
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut anchor = today;
    let mut entries = dated.as_slice();
    if let Some(&(date, count)) = entries.first() {
        if date == anchor && count == 0 {
            let Some(yesterday) = anchor.pred_opt() else {
                return 0;
            };
            anchor = yesterday;
            entries = &entries[1..];
        }
    }

    let mut streak = 0;
    for (offset, &(date, count)) in entries.iter().enumerate() {
        let expected = anchor.checked_sub_days(Days::new(offset as u64));
        if expected != Some(date) || count == 0 {
            break;
        }
        streak += 1;
    }
    streak
}

/// Longest run of active entries in ascending date order.
///
/// Only an explicit zero-count entry resets the run; dates missing from the
/// list are not treated as breaks. Does not depend on the current date.
///
/// # Examples
///
/// ```
/// use tailed_core::ContributionDay;
/// use tailed_streaks::streaks::compute_max_streak;
///
/// let days = vec![
///     ContributionDay::new("2024-01-01", 1),
///     ContributionDay::new("2024-01-05", 1),
///     ContributionDay::new("2024-01-09", 1),
/// ];
/// assert_eq!(compute_max_streak(&days), 3);
/// ```
pub fn compute_max_streak(days: &[ContributionDay]) -> u32 {
    let mut dated = dated_entries(days);
    dated.sort_by(|a, b| a.0.cmp(&b.0));

    let mut max_streak = 0;
    let mut running = 0;
    for &(_, count) in &dated {
        if count > 0 {
            running += 1;
            max_streak = max_streak.max(running);
        } else {
            running = 0;
        }
    }
    max_streak
}

/// Compute all streak counters in one call.
pub fn streak_state(days: &[ContributionDay], today: NaiveDate) -> StreakState {
    StreakState {
        current_streak: compute_current_streak(days, today),
        max_streak: compute_max_streak(days),
        active_days: active_days(days),
    }
}

fn dated_entries(days: &[ContributionDay]) -> Vec<(NaiveDate, u64)> {
    days.iter()
        .filter_map(|d| d.parsed_date().map(|date| (date, d.contribution_count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(entries: &[(&str, u64)]) -> Vec<ContributionDay> {
        entries
            .iter()
            .map(|(date, count)| ContributionDay::new(*date, *count))
            .collect()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn streak_broken_by_zero_day() {
        let list = days(&[
            ("2024-01-01", 3),
            ("2024-01-02", 0),
            ("2024-01-03", 5),
            ("2024-01-04", 2),
        ]);
        assert_eq!(compute_current_streak(&list, date("2024-01-04")), 2);
        assert_eq!(compute_max_streak(&list), 2);
    }

    #[test]
    fn empty_today_shifts_anchor_to_yesterday() {
        let list = days(&[
            ("2024-03-06", 1),
            ("2024-03-07", 2),
            ("2024-03-08", 4),
            ("2024-03-09", 1),
            ("2024-03-10", 0),
        ]);
        assert_eq!(compute_current_streak(&list, date("2024-03-10")), 4);
    }

    #[test]
    fn lone_empty_today_gives_zero() {
        let list = days(&[("2024-03-10", 0)]);
        assert_eq!(compute_current_streak(&list, date("2024-03-10")), 0);
    }

    #[test]
    fn gap_in_dates_breaks_current_but_not_max() {
        let list = days(&[
            ("2024-05-01", 1),
            ("2024-05-02", 1),
            ("2024-05-04", 1),
            ("2024-05-05", 1),
        ]);
        assert_eq!(compute_current_streak(&list, date("2024-05-05")), 2);
        assert_eq!(compute_max_streak(&list), 4);
    }

    #[test]
    fn stale_data_has_no_current_streak() {
        let list = days(&[("2024-01-01", 5), ("2024-01-02", 5)]);
        assert_eq!(compute_current_streak(&list, date("2024-02-01")), 0);
        assert_eq!(compute_max_streak(&list), 2);
    }

    #[test]
    fn unsorted_input_is_handled() {
        let list = days(&[
            ("2024-01-04", 2),
            ("2024-01-02", 1),
            ("2024-01-03", 5),
            ("2024-01-01", 0),
        ]);
        assert_eq!(compute_current_streak(&list, date("2024-01-04")), 3);
        assert_eq!(compute_max_streak(&list), 3);
    }

    #[test]
    fn streak_crosses_month_and_leap_day() {
        let list = days(&[
            ("2024-02-28", 1),
            ("2024-02-29", 1),
            ("2024-03-01", 1),
        ]);
        assert_eq!(compute_current_streak(&list, date("2024-03-01")), 3);
    }

    #[test]
    fn duplicate_dates_stop_the_walk() {
        let list = days(&[("2024-01-02", 1), ("2024-01-03", 1), ("2024-01-03", 1)]);
        assert_eq!(compute_current_streak(&list, date("2024-01-03")), 1);
        assert_eq!(compute_max_streak(&list), 3);
    }

    #[test]
    fn malformed_dates_are_skipped() {
        let list = days(&[("2024-01-01", 1), ("garbage", 0), ("2024-01-02", 1)]);
        assert_eq!(compute_current_streak(&list, date("2024-01-02")), 2);
        assert_eq!(compute_max_streak(&list), 2);
        assert_eq!(active_days(&list), 2);
        assert_eq!(compute_totals(&list), 2);
    }

    #[test]
    fn max_streak_ignores_anchor() {
        let list = days(&[("2023-12-30", 1), ("2023-12-31", 1), ("2024-01-01", 0)]);
        let early = streak_state(&list, date("2024-01-01"));
        let late = streak_state(&list, date("2030-06-01"));
        assert_eq!(early.max_streak, 2);
        assert_eq!(late.max_streak, 2);
        assert_eq!(early.current_streak, 2);
        assert_eq!(late.current_streak, 0);
    }

    #[test]
    fn active_days_bounded_by_length() {
        let mixed = days(&[("2024-01-01", 1), ("2024-01-02", 0)]);
        assert!(active_days(&mixed) < mixed.len() as u32);

        let all_active = days(&[("2024-01-01", 1), ("2024-01-02", 7)]);
        assert_eq!(active_days(&all_active), all_active.len() as u32);
    }

    #[test]
    fn state_invariants_hold_for_current_run() {
        let list = days(&[
            ("2024-04-01", 2),
            ("2024-04-02", 0),
            ("2024-04-03", 1),
            ("2024-04-04", 1),
            ("2024-04-05", 1),
        ]);
        let state = streak_state(&list, date("2024-04-05"));
        assert_eq!(state.current_streak, 3);
        assert!(state.max_streak >= state.current_streak);
        assert!(state.current_streak <= state.active_days);
        assert_eq!(state.active_days, 4);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let state = streak_state(&[], date("2024-01-01"));
        assert_eq!(state, StreakState::default());
        assert_eq!(compute_totals(&[]), 0);
    }
}
