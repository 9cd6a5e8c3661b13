// src/fetcher.rs
use crate::config::{FetcherConfig, ModeProfile};
use crate::errors::FetchError;
use crate::query::{query_params, request_url};
use crate::storage::{output_path, write_collection};
use crate::types::{ErrorPolicy, FetchMode, FetchReport, FetchStatus, QueryWindow};
use chrono::{Local, NaiveDateTime};
use log::{debug, error, info, warn};
use reqwest::Client;
use serde_json::Value;
use url::Url;

pub struct EarthquakeFetcher {
    client: Client,
    config: FetcherConfig,
}

impl EarthquakeFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub async fn fetch(&self, mode: FetchMode, policy: ErrorPolicy) -> Result<FetchReport, FetchError> {
        self.fetch_at(mode, policy, Local::now().naive_local()).await
    }

    /// Runs one fetch with `now` pinned, e.g. for a scheduled run or a test.
    pub async fn fetch_at(
        &self,
        mode: FetchMode,
        policy: ErrorPolicy,
        now: NaiveDateTime,
    ) -> Result<FetchReport, FetchError> {
        let window = QueryWindow::for_mode(mode, now);
        let profile = ModeProfile::for_mode(mode);
        let path = output_path(&self.config.data_dir, mode, &window);

        let params = query_params(&window, &self.config.filter, profile.order_by);
        let url = request_url(&self.config.endpoint, &params)?;

        println!(
            "Fetching {} earthquakes ({} to {})...",
            mode,
            window.start_param(),
            window.end_param()
        );

        let collection = match self.request_collection(&url).await {
            Ok(collection) => collection,
            Err(e) if e.is_remote() && policy == ErrorPolicy::LogAndContinue => {
                error!(
                    "[fetcher::fetch_at] {} fetch failed for window {} .. {} ({}): {}",
                    mode,
                    window.start_param(),
                    window.end_param(),
                    url,
                    e
                );
                println!("  Error fetching {}: {}", mode, e);
                return Ok(FetchReport {
                    mode,
                    window,
                    output_path: path,
                    count: 0,
                    status: FetchStatus::Skipped(e.to_string()),
                });
            }
            Err(e) => {
                error!(
                    "[fetcher::fetch_at] {} fetch failed for window {} .. {}: {}",
                    mode,
                    window.start_param(),
                    window.end_param(),
                    e
                );
                return Err(e);
            }
        };

        let count = count_events(&collection);
        println!("  -> {} events found.", count);

        // Write failures are never swallowed, whatever the policy.
        write_collection(&path, &collection, profile.pretty).await?;
        println!("  Saved to {}", path.display());
        info!(
            "[fetcher::fetch_at] {} snapshot saved: {} events -> {}",
            mode,
            count,
            path.display()
        );

        Ok(FetchReport {
            mode,
            window,
            output_path: path,
            count,
            status: FetchStatus::Saved,
        })
    }

    /// Fetches each mode in turn. Stops at the first error the policy lets through.
    pub async fn fetch_all(&self, modes: &[FetchMode], policy: ErrorPolicy) -> Result<Vec<FetchReport>, FetchError> {
        let now = Local::now().naive_local();
        let mut reports = Vec::with_capacity(modes.len());
        for &mode in modes {
            reports.push(self.fetch_at(mode, policy, now).await?);
        }
        Ok(reports)
    }

    async fn request_collection(&self, url: &Url) -> Result<Value, FetchError> {
        debug!("[fetcher::request_collection] GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        debug!("[fetcher::request_collection] Response length: {}", body.len());
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Number of events in a feature collection: the length of `features`.
/// `metadata.count` is only cross-checked.
pub fn count_events(collection: &Value) -> usize {
    let count = collection
        .get("features")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    if let Some(reported) = collection
        .get("metadata")
        .and_then(|m| m.get("count"))
        .and_then(Value::as_u64)
    {
        if reported != count as u64 {
            warn!(
                "[fetcher::count_events] metadata.count={} but {} features received",
                reported, count
            );
        }
    }
    count
}
