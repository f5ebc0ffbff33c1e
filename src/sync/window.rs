use chrono::{Datelike, Duration, NaiveDate};

/// Classification of a release date relative to the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBucket {
    /// Released within the lookback window, `[recent_start, today]` inclusive.
    Recent,
    /// Released this year but before the lookback window.
    YearToDate,
    /// Outside both ranges; not considered at all.
    Ignored,
}

/// The date ranges a single run operates on, derived from today's date and
/// the configured lookback.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub today: NaiveDate,
    pub recent_start: NaiveDate,
    pub year_start: NaiveDate,
}

impl TimeWindow {
    pub fn new(today: NaiveDate, lookback_days: i64) -> Self {
        let recent_start = today - Duration::days(lookback_days);
        let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap();

        Self {
            today,
            recent_start,
            year_start,
        }
    }

    /// Buckets a release date. Exactly one bucket holds for any date; both
    /// window boundaries are inclusive, the year-to-date range ends just
    /// before `recent_start`.
    pub fn classify(&self, date: NaiveDate) -> WindowBucket {
        if date >= self.recent_start && date <= self.today {
            WindowBucket::Recent
        } else if date >= self.year_start && date < self.recent_start {
            WindowBucket::YearToDate
        } else {
            WindowBucket::Ignored
        }
    }
}
