//! Calendar query windows and tolerant parsing of the GraphQL payload.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde_json::Value;
use tailed_core::{CalendarWeek, ContributionDay, TailedError};

/// GraphQL query for one window of a user's contribution calendar.
pub const CALENDAR_QUERY: &str = r#"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          firstDay
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

/// A `from..=to` range passed to `contributionsCollection`.
///
/// GitHub rejects ranges longer than one year, so a two-year history is
/// requested as [`YearWindow::previous`] followed by [`YearWindow::recent`].
/// The two never overlap.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tailed_github::calendar::YearWindow;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let recent = YearWindow::recent(today);
/// let previous = YearWindow::previous(today);
/// assert_eq!(recent.from_param(), "2023-06-16T00:00:00Z");
/// assert_eq!(recent.to_param(), "2024-06-15T23:59:59Z");
/// assert_eq!(previous.to_param(), "2023-06-15T23:59:59Z");
/// assert!(previous.to < recent.from);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    /// Inclusive start.
    pub from: DateTime<Utc>,
    /// Inclusive end.
    pub to: DateTime<Utc>,
}

impl YearWindow {
    /// The year ending at the end of `today`.
    pub fn recent(today: NaiveDate) -> Self {
        Self::year_ending(today)
    }

    /// The year immediately before [`YearWindow::recent`].
    pub fn previous(today: NaiveDate) -> Self {
        let end = today.checked_sub_months(Months::new(12)).unwrap_or(today);
        Self::year_ending(end)
    }

    fn year_ending(last_day: NaiveDate) -> Self {
        let first_day = last_day
            .checked_sub_months(Months::new(12))
            .and_then(|d| d.succ_opt())
            .unwrap_or(last_day);
        let from = first_day.and_time(NaiveTime::MIN).and_utc();
        let to = last_day.and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
            - Duration::seconds(1);
        Self { from, to }
    }

    /// `from` formatted for the GraphQL `DateTime` scalar.
    pub fn from_param(&self) -> String {
        self.from.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// `to` formatted for the GraphQL `DateTime` scalar.
    pub fn to_param(&self) -> String {
        self.to.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Extract calendar weeks from a full GraphQL response body.
///
/// # Errors
///
/// Returns [`TailedError::GitHub`] if the response carries GraphQL errors
/// or the user does not exist, and [`TailedError::Parse`] if the calendar
/// is missing from an otherwise successful response.
///
/// # Examples
///
/// ```
/// use tailed_github::calendar::parse_calendar_response;
///
/// let body = serde_json::json!({
///     "data": { "user": { "contributionsCollection": { "contributionCalendar": {
///         "totalContributions": 3,
///         "weeks": [{
///             "firstDay": "2024-01-07",
///             "contributionDays": [{ "date": "2024-01-07", "contributionCount": 3 }]
///         }]
///     }}}}
/// });
/// let weeks = parse_calendar_response(&body).unwrap();
/// assert_eq!(weeks[0].contribution_days[0].contribution_count, 3);
/// ```
pub fn parse_calendar_response(body: &Value) -> Result<Vec<CalendarWeek>, TailedError> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect();
            return Err(TailedError::GitHub(format!(
                "GraphQL error: {}",
                if messages.is_empty() {
                    "unknown error".to_string()
                } else {
                    messages.join("; ")
                }
            )));
        }
    }

    let user = body
        .get("data")
        .and_then(|d| d.get("user"))
        .ok_or_else(|| TailedError::Parse("response has no data.user field".into()))?;
    if user.is_null() {
        return Err(TailedError::GitHub("user not found".into()));
    }

    let weeks = user
        .get("contributionsCollection")
        .and_then(|c| c.get("contributionCalendar"))
        .and_then(|c| c.get("weeks"))
        .ok_or_else(|| TailedError::Parse("response has no contribution calendar".into()))?;

    parse_weeks(weeks)
}

/// Parse a JSON array of calendar weeks, skipping malformed entries.
///
/// Day entries without a string date or with a count that is not a
/// non-negative integer are dropped with a warning. A week without
/// `firstDay` falls back to its first valid day; a week with neither is
/// dropped.
///
/// # Errors
///
/// Returns [`TailedError::Parse`] if `weeks` is not an array.
pub fn parse_weeks(weeks: &Value) -> Result<Vec<CalendarWeek>, TailedError> {
    let entries = weeks
        .as_array()
        .ok_or_else(|| TailedError::Parse("calendar weeks must be a JSON array".into()))?;

    let mut parsed = Vec::with_capacity(entries.len());
    for (index, week) in entries.iter().enumerate() {
        let days: Vec<ContributionDay> = week
            .get("contributionDays")
            .and_then(Value::as_array)
            .map(|days| days.iter().filter_map(parse_day).collect())
            .unwrap_or_default();

        let first_day = match week.get("firstDay").and_then(Value::as_str) {
            Some(first) => first.to_string(),
            None => match days.first() {
                Some(day) => day.date.clone(),
                None => {
                    tracing::warn!(index, "skipping calendar week without firstDay or days");
                    continue;
                }
            },
        };

        parsed.push(CalendarWeek {
            first_day,
            contribution_days: days,
        });
    }
    Ok(parsed)
}

fn parse_day(day: &Value) -> Option<ContributionDay> {
    let Some(date) = day.get("date").and_then(Value::as_str) else {
        tracing::warn!(entry = %day, "skipping contribution day without a date");
        return None;
    };
    let Some(count) = day.get("contributionCount").and_then(Value::as_u64) else {
        tracing::warn!(date, "skipping contribution day with an invalid count");
        return None;
    };
    Some(ContributionDay::new(date, count))
}
