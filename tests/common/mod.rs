// tests/common/mod.rs
#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use quake_fetcher::FetcherConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const QUERY_PATH: &str = "/fdsnws/event/1/query";

pub type SeenQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
    seen: SeenQueries,
}

async fn usgs_query(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.seen.lock().unwrap().push(params);
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

pub struct MockUsgs {
    pub endpoint: String,
    pub seen: SeenQueries,
}

impl MockUsgs {
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        Self::start_with_delay(status, body, None).await
    }

    pub async fn start_with_delay(status: StatusCode, body: impl Into<String>, delay: Option<Duration>) -> Self {
        let seen: SeenQueries = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body: body.into(),
            delay,
            seen: seen.clone(),
        };
        let app = Router::new().route(QUERY_PATH, get(usgs_query)).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockUsgs {
            endpoint: format!("http://{}{}", addr, QUERY_PATH),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.seen.lock().unwrap().clone()
    }
}

/// A feature collection shaped like a USGS response, with `n` events.
pub fn feature_collection(n: usize) -> Value {
    let features: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "type": "Feature",
                "properties": {
                    "mag": 2.5 + i as f64 * 0.1,
                    "place": format!("{} km E of Miyako, 岩手県", 10 + i),
                    "time": 1718400000000_i64 + i as i64 * 60_000,
                    "type": "earthquake"
                },
                "geometry": {"type": "Point", "coordinates": [142.1 + i as f64 * 0.01, 39.6, 35.0]},
                "id": format!("us7000m{:03}", i)
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "metadata": {"generated": 1718445600000_i64, "title": "USGS Earthquakes", "status": 200, "count": n},
        "features": features
    })
}

pub fn scratch_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("quake_fetcher_{}_{}", label, uuid::Uuid::new_v4()))
}

pub fn config_for(endpoint: &str, data_dir: &PathBuf) -> FetcherConfig {
    FetcherConfig::default()
        .with_endpoint(endpoint)
        .with_data_dir(data_dir.clone())
}

pub fn setup_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
