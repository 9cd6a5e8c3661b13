// src/types.rs
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

// --- Input ---

/// Which snapshot to fetch. Selects both the time window and the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// now - 30 days .. now
    #[value(name = "last-30-days")]
    Last30Days,
    /// Jan 1 of the current year .. now
    CurrentYear,
    /// now - 365 days .. now
    #[value(name = "trailing-365-days")]
    Trailing365Days,
}

impl FetchMode {
    pub const ALL: [FetchMode; 3] = [
        FetchMode::Last30Days,
        FetchMode::CurrentYear,
        FetchMode::Trailing365Days,
    ];
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchMode::Last30Days => "last-30-days",
            FetchMode::CurrentYear => "current-year",
            FetchMode::Trailing365Days => "trailing-365-days",
        };
        f.write_str(name)
    }
}

/// `orderby` directive understood by the FDSN event service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderBy {
    Time,
    TimeAsc,
}

impl OrderBy {
    pub fn as_param(&self) -> &'static str {
        match self {
            OrderBy::Time => "time",
            OrderBy::TimeAsc => "time-asc",
        }
    }
}

/// What to do when the remote side of a fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ErrorPolicy {
    /// Return the error to the caller (interactive use).
    Propagate,
    /// Log it and report a zero count (scheduled use).
    #[default]
    LogAndContinue,
}

/// Start/end of one query, local wall-clock time at second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Geographic and magnitude filter sent with every query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueryFilter {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_magnitude: f64,
}

// --- Output ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum FetchStatus {
    Saved,
    /// Remote failure swallowed under `ErrorPolicy::LogAndContinue`.
    Skipped(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchReport {
    pub mode: FetchMode,
    pub window: QueryWindow,
    pub output_path: PathBuf,
    pub count: usize,
    pub status: FetchStatus,
}

impl FetchReport {
    pub fn is_saved(&self) -> bool {
        self.status == FetchStatus::Saved
    }
}
