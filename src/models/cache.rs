use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::error::Result;

#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
        }
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.is_fresh_at(Utc::now(), ttl)
    }

    pub fn is_fresh_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.timestamp < ttl
    }
}

/// Builds the key for an endpoint call. Parameters that read as numbers are
/// stored as JSON numbers, so `"44"`, `" 44"` and `"44.0"` share an entry.
pub fn cache_key(endpoint: &str, params: &[(&str, &str)]) -> String {
    let normalized: Map<String, Value> = params
        .iter()
        .map(|(name, value)| (name.to_string(), normalize_param(value)))
        .collect();
    format!("{endpoint}-{}", Value::Object(normalized))
}

fn normalize_param(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    match trimmed.parse::<f64>() {
        Ok(float) if float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 => {
            Value::from(float as i64)
        }
        Ok(float) if float.is_finite() => Value::from(float),
        _ => Value::String(raw.to_string()),
    }
}

/// Time-bounded memo of normalized responses, owned by a single client.
pub struct ResponseCache {
    ttl: Duration,
    entries: DashMap<String, CacheEntry<Value>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// Returns the stored value while it is younger than the TTL.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entry = self.entries.get(key)?;
        if entry.is_fresh(self.ttl) {
            debug!("Cache hit for {}", key);
            Some(entry.data.clone())
        } else {
            debug!("Cache entry expired for {}", key);
            None
        }
    }

    pub fn set(&self, key: String, data: Value) {
        self.entries.insert(key, CacheEntry::new(data));
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serves `key` from the cache or runs `fetch` and stores its result.
    /// Errors and `null` results are never stored.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: String, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(data) = self.get(&key) {
            match serde_json::from_value(data) {
                Ok(value) => return Ok(value),
                Err(e) => debug!("Discarding unreadable cache entry {}: {}", key, e),
            }
        }

        debug!("Cache miss for {}", key);
        let value = fetch().await?;
        let data = serde_json::to_value(&value)?;
        if !data.is_null() {
            self.set(key, data);
        }
        Ok(value)
    }
}
