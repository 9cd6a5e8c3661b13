// src/query.rs
use crate::errors::FetchError;
use crate::types::{OrderBy, QueryFilter, QueryWindow};
use url::Url;

/// Query-string pairs for one FDSN event request, in a stable order.
pub fn query_params(
    window: &QueryWindow,
    filter: &QueryFilter,
    order_by: OrderBy,
) -> Vec<(&'static str, String)> {
    vec![
        ("format", "geojson".to_string()),
        ("starttime", window.start_param()),
        ("endtime", window.end_param()),
        ("minlatitude", filter.min_latitude.to_string()),
        ("maxlatitude", filter.max_latitude.to_string()),
        ("minlongitude", filter.min_longitude.to_string()),
        ("maxlongitude", filter.max_longitude.to_string()),
        ("minmagnitude", filter.min_magnitude.to_string()),
        ("orderby", order_by.as_param().to_string()),
    ]
}

pub fn request_url(endpoint: &str, params: &[(&'static str, String)]) -> Result<Url, FetchError> {
    let url = Url::parse_with_params(endpoint, params.iter().map(|(k, v)| (*k, v.as_str())))
        .map_err(|e| FetchError::Config(format!("invalid endpoint '{}': {}", endpoint, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::Config(format!(
            "endpoint '{}' must be http or https, got '{}'",
            endpoint, other
        ))),
    }
}
