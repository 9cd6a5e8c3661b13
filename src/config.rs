// src/config.rs
use crate::errors::FetchError;
use crate::types::{FetchMode, OrderBy, QueryFilter};
use log::{debug, warn};
use std::path::PathBuf;
use std::time::Duration;

pub const USGS_QUERY_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_ENDPOINT: &str = "QUAKE_FETCHER_ENDPOINT";
pub const ENV_DATA_DIR: &str = "QUAKE_FETCHER_DATA_DIR";
pub const ENV_TIMEOUT_SECS: &str = "QUAKE_FETCHER_TIMEOUT_SECS";

// Japan region. Compiled in, shared by every mode.
pub const JAPAN_FILTER: QueryFilter = QueryFilter {
    min_latitude: 20.0,
    max_latitude: 50.0,
    min_longitude: 120.0,
    max_longitude: 155.0,
    min_magnitude: 2.5,
};

/// Per-mode constants: where the snapshot goes and how it is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeProfile {
    /// File name; `{year}` is replaced with the window's year.
    pub file_name: &'static str,
    pub order_by: OrderBy,
    pub pretty: bool,
}

impl ModeProfile {
    pub fn for_mode(mode: FetchMode) -> Self {
        match mode {
            FetchMode::Last30Days => ModeProfile {
                file_name: "earthquakes_1month.json",
                order_by: OrderBy::TimeAsc,
                pretty: false,
            },
            FetchMode::CurrentYear => ModeProfile {
                file_name: "earthquakes_{year}.json",
                order_by: OrderBy::Time,
                pretty: true,
            },
            FetchMode::Trailing365Days => ModeProfile {
                file_name: "earthquakes.json",
                order_by: OrderBy::Time,
                pretty: true,
            },
        }
    }

    pub fn file_name_for_year(&self, year: i32) -> String {
        self.file_name.replace("{year}", &year.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub endpoint: String,
    pub data_dir: PathBuf,
    pub timeout: Duration,
    pub filter: QueryFilter,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: USGS_QUERY_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            filter: JAPAN_FILTER,
        }
    }
}

impl FetcherConfig {
    /// Defaults overridden by `QUAKE_FETCHER_*` variables (a `.env` file is honored).
    pub fn from_env() -> Result<Self, FetchError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, FetchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir.trim());
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = parse_timeout_secs(&raw)?;
        }

        debug!(
            "[config::from_lookup] endpoint={} data_dir={} timeout={:?}",
            config.endpoint,
            config.data_dir.display(),
            config.timeout
        );
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_timeout_secs(raw: &str) -> Result<Duration, FetchError> {
    let secs: u64 = raw.trim().parse().map_err(|e| {
        FetchError::Config(format!("{} must be a whole number of seconds, got '{}': {}", ENV_TIMEOUT_SECS, raw, e))
    })?;
    Ok(timeout_from_secs(secs, ENV_TIMEOUT_SECS))
}

/// Request timeout from a user-supplied second count. `source` names where the
/// value came from (env var or CLI flag) for the warning on 0.
pub fn timeout_from_secs(secs: u64, source: &str) -> Duration {
    if secs == 0 {
        // reqwest has no "zero" timeout; the request would simply fail.
        warn!(
            "[config::timeout_from_secs] {}=0 ignored, using {}s",
            source, DEFAULT_TIMEOUT_SECS
        );
        return Duration::from_secs(DEFAULT_TIMEOUT_SECS);
    }
    Duration::from_secs(secs)
}
