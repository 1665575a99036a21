pub mod historical;
pub mod live;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::from_str;
use tracing::{debug, error};

use crate::models::error::Result;

pub use historical::HistoricalClient;
pub use live::LiveClient;

/// GETs `url` and decodes the body. Non-2xx statuses are errors.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T> {
    debug!("Sending request to {} {:?}", url, query);
    let res = http.get(url).query(query).send().await?.error_for_status()?;
    let body = res.text().await?;
    Ok(from_str(&body)?)
}

/// Logs a failed fetch and falls back to the empty value for its shape:
/// `[]` for lists and `None` for single records.
pub(crate) fn or_empty<T: Default>(what: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        error!("Error fetching {}: {}", what, e);
        T::default()
    })
}
