//! Two-window calendar retrieval with per-window degradation.

use std::future::Future;

use chrono::NaiveDate;
use tailed_core::{CalendarWeek, TailedError};

use crate::calendar::YearWindow;

/// Anything that can return one window of a user's contribution calendar.
///
/// [`GitHubClient`](crate::client::GitHubClient) is the production source.
pub trait CalendarSource {
    /// Fetch the calendar weeks for `login` within `window`.
    fn fetch_window(
        &self,
        login: &str,
        window: YearWindow,
    ) -> impl Future<Output = Result<Vec<CalendarWeek>, TailedError>> + Send;
}

/// The two calendar windows of a profile refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TwoYearCalendar {
    /// The year before the most recent one.
    pub older: Vec<CalendarWeek>,
    /// The most recent year, ending today.
    pub newer: Vec<CalendarWeek>,
}

impl TwoYearCalendar {
    /// Whether neither window returned any week.
    pub fn is_empty(&self) -> bool {
        self.older.is_empty() && self.newer.is_empty()
    }
}

/// Fetch both windows concurrently.
///
/// A window that fails is logged and replaced by an empty list; this never
/// returns an error.
pub async fn fetch_two_years<S: CalendarSource>(
    source: &S,
    login: &str,
    today: NaiveDate,
) -> TwoYearCalendar {
    let previous = YearWindow::previous(today);
    let recent = YearWindow::recent(today);

    let (older, newer) = tokio::join!(
        source.fetch_window(login, previous),
        source.fetch_window(login, recent),
    );

    TwoYearCalendar {
        older: degrade(older, login, "previous"),
        newer: degrade(newer, login, "recent"),
    }
}

fn degrade(
    result: Result<Vec<CalendarWeek>, TailedError>,
    login: &str,
    window: &str,
) -> Vec<CalendarWeek> {
    match result {
        Ok(weeks) => {
            tracing::debug!(login, window, weeks = weeks.len(), "fetched calendar window");
            weeks
        }
        Err(e) => {
            tracing::warn!(login, window, error = %e, "calendar window unavailable, using empty data");
            Vec::new()
        }
    }
}
