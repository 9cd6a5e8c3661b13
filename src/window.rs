// src/window.rs
use crate::types::{FetchMode, QueryWindow};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};

/// Timestamp layout the FDSN service accepts: local time, no zone suffix.
pub const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl QueryWindow {
    pub fn for_mode(mode: FetchMode, now: NaiveDateTime) -> Self {
        let end = now.with_nanosecond(0).unwrap_or(now);
        let start = match mode {
            FetchMode::Last30Days => end - Duration::days(30),
            FetchMode::Trailing365Days => end - Duration::days(365),
            FetchMode::CurrentYear => start_of_year(end),
        };

        // Only reachable at exactly Jan 1 00:00:00 in CurrentYear mode.
        let end = if end <= start {
            start + Duration::seconds(1)
        } else {
            end
        };

        QueryWindow { start, end }
    }

    pub fn for_mode_now(mode: FetchMode) -> Self {
        Self::for_mode(mode, Local::now().naive_local())
    }

    pub fn start_param(&self) -> String {
        self.start.format(QUERY_TIME_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(QUERY_TIME_FORMAT).to_string()
    }

    /// Year used to name the current-year snapshot.
    pub fn year(&self) -> i32 {
        self.start.year()
    }
}

fn start_of_year(at: NaiveDateTime) -> NaiveDateTime {
    NaiveDate::from_yo_opt(at.year(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_start_before_end_for_every_mode() {
        let now = Local::now().naive_local();
        for mode in FetchMode::ALL {
            let window = QueryWindow::for_mode(mode, now);
            assert!(window.start < window.end, "{} produced an empty window", mode);
            assert!((now - window.end).num_seconds().abs() <= 1);
        }
    }

    #[test]
    fn test_last_30_days() {
        let window = QueryWindow::for_mode(FetchMode::Last30Days, at(2024, 3, 10, 8, 15, 30));
        assert_eq!(window.start, at(2024, 2, 9, 8, 15, 30));
        assert_eq!(window.end, at(2024, 3, 10, 8, 15, 30));
    }

    #[test]
    fn test_trailing_365_days_across_leap_day() {
        let window = QueryWindow::for_mode(FetchMode::Trailing365Days, at(2024, 6, 15, 12, 0, 0));
        assert_eq!(window.start, at(2023, 6, 16, 12, 0, 0));
        assert_eq!(window.end - window.start, Duration::days(365));
    }

    #[test]
    fn test_current_year_starts_at_jan_first() {
        let window = QueryWindow::for_mode(FetchMode::CurrentYear, at(2024, 6, 15, 9, 30, 0));
        assert_eq!(window.start, at(2024, 1, 1, 0, 0, 0));
        assert_eq!(window.end, at(2024, 6, 15, 9, 30, 0));
        assert_eq!(window.year(), 2024);
    }

    #[test]
    fn test_current_year_at_new_year_midnight_is_not_empty() {
        let window = QueryWindow::for_mode(FetchMode::CurrentYear, at(2025, 1, 1, 0, 0, 0));
        assert_eq!(window.start, at(2025, 1, 1, 0, 0, 0));
        assert_eq!(window.end, at(2025, 1, 1, 0, 0, 1));
        assert_eq!(window.year(), 2025);
    }

    #[test]
    fn test_subsecond_now_is_truncated() {
        let now = at(2024, 1, 1, 0, 0, 0).with_nanosecond(500_000_000).unwrap();
        let window = QueryWindow::for_mode(FetchMode::CurrentYear, now);
        assert!(window.start < window.end);
        assert_eq!(window.end_param(), "2024-01-01T00:00:01");
    }

    #[test]
    fn test_param_format() {
        let window = QueryWindow::for_mode(FetchMode::Last30Days, at(2024, 11, 5, 7, 3, 9));
        assert_eq!(window.start_param(), "2024-10-06T07:03:09");
        assert_eq!(window.end_param(), "2024-11-05T07:03:09");
    }
}
