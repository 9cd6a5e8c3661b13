// src/lib.rs
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod query;
pub mod storage;
pub mod types;
pub mod window;

pub use config::FetcherConfig;
pub use errors::FetchError;
pub use fetcher::EarthquakeFetcher;
pub use types::{ErrorPolicy, FetchMode, FetchReport, FetchStatus, QueryFilter, QueryWindow};
