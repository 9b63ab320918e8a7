//! Activity distributions: weekly heatmap buckets, weekday and monthly
//! histograms, and the busiest day.

use std::collections::BTreeMap;

use chrono::Datelike;
use tailed_core::{CalendarWeek, ContributionDay, MonthlyActivity, MostProductiveDay, WeeklyBucket};

/// One bucket per upstream calendar week, in the order given.
///
/// Week boundaries come from the calendar itself and are never recomputed.
///
/// # Examples
///
/// ```
/// use tailed_core::{CalendarWeek, ContributionDay};
/// use tailed_streaks::activity::weekly_buckets;
///
/// let weeks = vec![CalendarWeek {
///     first_day: "2024-01-07".into(),
///     contribution_days: vec![
///         ContributionDay::new("2024-01-07", 2),
///         ContributionDay::new("2024-01-08", 3),
///     ],
/// }];
/// let buckets = weekly_buckets(&weeks);
/// assert_eq!(buckets[0].week_start_date, "2024-01-07");
/// assert_eq!(buckets[0].total_count, 5);
/// ```
pub fn weekly_buckets(weeks: &[CalendarWeek]) -> Vec<WeeklyBucket> {
    weeks
        .iter()
        .map(|week| WeeklyBucket {
            week_start_date: week.first_day.clone(),
            total_count: week
                .contribution_days
                .iter()
                .map(|d| d.contribution_count)
                .sum(),
            days: week.contribution_days.clone(),
        })
        .collect()
}

/// Contributions per weekday, index 0 = Sunday.
///
/// Days whose date does not parse contribute nothing.
///
/// # Examples
///
/// ```
/// use tailed_core::ContributionDay;
/// use tailed_streaks::activity::day_of_week_histogram;
///
/// // 2024-01-07 was a Sunday.
/// let days = vec![
///     ContributionDay::new("2024-01-07", 4),
///     ContributionDay::new("2024-01-08", 1),
/// ];
/// let hist = day_of_week_histogram(&days);
/// assert_eq!(hist[0], 4);
/// assert_eq!(hist[1], 1);
/// ```
pub fn day_of_week_histogram(days: &[ContributionDay]) -> [u64; 7] {
    let mut histogram = [0u64; 7];
    for day in days {
        if let Some(date) = day.parsed_date() {
            histogram[date.weekday().num_days_from_sunday() as usize] += day.contribution_count;
        }
    }
    histogram
}

/// Contributions per `YYYY-MM`, busiest month first.
///
/// Months with equal counts stay in chronological order. Days whose date
/// does not parse are left out.
///
/// # Examples
///
/// ```
/// use tailed_core::ContributionDay;
/// use tailed_streaks::activity::monthly_histogram;
///
/// let days = vec![
///     ContributionDay::new("2024-01-15", 2),
///     ContributionDay::new("2024-02-01", 9),
///     ContributionDay::new("2024-01-16", 3),
/// ];
/// let months = monthly_histogram(&days);
/// assert_eq!(months[0].month, "2024-02");
/// assert_eq!(months[1].count, 5);
/// ```
pub fn monthly_histogram(days: &[ContributionDay]) -> Vec<MonthlyActivity> {
    let mut by_month: BTreeMap<String, u64> = BTreeMap::new();
    for day in days {
        let Some(date) = day.parsed_date() else {
            continue;
        };
        let key = format!("{:04}-{:02}", date.year(), date.month());
        *by_month.entry(key).or_default() += day.contribution_count;
    }

    let mut months: Vec<MonthlyActivity> = by_month
        .into_iter()
        .map(|(month, count)| MonthlyActivity { month, count })
        .collect();
    months.sort_by(|a, b| b.count.cmp(&a.count));
    months
}

/// The entry with the highest count; the earliest entry wins ties.
///
/// Returns `None` for an empty list.
///
/// # Examples
///
/// ```
/// use tailed_core::ContributionDay;
/// use tailed_streaks::activity::most_productive_day;
///
/// let days = vec![
///     ContributionDay::new("2024-01-01", 7),
///     ContributionDay::new("2024-01-02", 7),
/// ];
/// let best = most_productive_day(&days).unwrap();
/// assert_eq!(best.date, "2024-01-01");
/// assert!(most_productive_day(&[]).is_none());
/// ```
pub fn most_productive_day(days: &[ContributionDay]) -> Option<MostProductiveDay> {
    let mut best: Option<&ContributionDay> = None;
    for day in days {
        match best {
            Some(current) if current.contribution_count >= day.contribution_count => {}
            _ => best = Some(day),
        }
    }
    best.map(|day| MostProductiveDay {
        date: day.date.clone(),
        contributions: day.contribution_count,
    })
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

    #[test]
    fn weekly_buckets_keep_upstream_boundaries() {
        // A partial first week, as the calendar returns at a window edge.
        let weeks = vec![
            CalendarWeek {
                first_day: "2024-01-03".into(),
                contribution_days: days(&[("2024-01-03", 1), ("2024-01-04", 0), ("2024-01-05", 2)]),
            },
            CalendarWeek {
                first_day: "2024-01-07".into(),
                contribution_days: days(&[("2024-01-07", 4)]),
            },
        ];
        let buckets = weekly_buckets(&weeks);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].week_start_date, "2024-01-03");
        assert_eq!(buckets[0].total_count, 3);
        assert_eq!(buckets[0].days.len(), 3);
        assert_eq!(buckets[1].total_count, 4);
    }

    #[test]
    fn empty_week_has_zero_total() {
        let weeks = vec![CalendarWeek {
            first_day: "2024-01-07".into(),
            contribution_days: vec![],
        }];
        assert_eq!(weekly_buckets(&weeks)[0].total_count, 0);
    }

    #[test]
    fn weekday_histogram_uses_sunday_zero() {
        // 2024-03-09 is a Saturday, 2024-03-10 a Sunday, 2024-03-13 a Wednesday.
        let list = days(&[
            ("2024-03-09", 2),
            ("2024-03-10", 5),
            ("2024-03-13", 1),
            ("2024-03-17", 3),
        ]);
        let hist = day_of_week_histogram(&list);
        assert_eq!(hist, [8, 0, 0, 1, 0, 0, 2]);
    }

    #[test]
    fn weekday_histogram_skips_bad_dates() {
        let list = days(&[("2024-13-01", 9), ("2024-03-10", 1)]);
        assert_eq!(day_of_week_histogram(&list).iter().sum::<u64>(), 1);
    }

    #[test]
    fn monthly_histogram_ranks_by_count() {
        let list = days(&[
            ("2023-11-02", 1),
            ("2023-12-24", 4),
            ("2024-01-01", 2),
            ("2024-01-20", 8),
        ]);
        let months = monthly_histogram(&list);
        let keys: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, vec!["2024-01", "2023-12", "2023-11"]);
        assert_eq!(months[0].count, 10);
    }

    #[test]
    fn monthly_ties_are_chronological() {
        let list = days(&[("2024-02-01", 3), ("2023-12-01", 3), ("2024-01-01", 3)]);
        let keys: Vec<String> = monthly_histogram(&list)
            .into_iter()
            .map(|m| m.month)
            .collect();
        assert_eq!(keys, vec!["2023-12", "2024-01", "2024-02"]);
    }

    #[test]
    fn months_with_no_activity_are_listed() {
        let list = days(&[("2024-06-01", 0)]);
        let months = monthly_histogram(&list);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].count, 0);
    }

    #[test]
    fn most_productive_day_first_wins_ties() {
        let list = days(&[("2024-01-05", 3), ("2024-01-01", 9), ("2024-01-09", 9)]);
        let best = most_productive_day(&list).unwrap();
        assert_eq!(best.date, "2024-01-01");
        assert_eq!(best.contributions, 9);
    }

    #[test]
    fn most_productive_day_all_zero_returns_first() {
        let list = days(&[("2024-01-02", 0), ("2024-01-03", 0)]);
        assert_eq!(most_productive_day(&list).unwrap().date, "2024-01-02");
    }

    #[test]
    fn empty_inputs_give_empty_outputs() {
        assert!(weekly_buckets(&[]).is_empty());
        assert_eq!(day_of_week_histogram(&[]), [0; 7]);
        assert!(monthly_histogram(&[]).is_empty());
        assert!(most_productive_day(&[]).is_none());
    }
}
