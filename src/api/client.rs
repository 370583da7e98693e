use super::ApiError;
use chrono::{DateTime, Duration, Local, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

const QUERY_URL: &str = "api/0/query";
const BUCKETS_URL: &str = "api/0/buckets";

/// Bucket id prefix used by the AFK watcher.
const AFK_BUCKET_PREFIX: &str = "aw-watcher-afk_";

/// One event as the tracking server reports it.
///
/// `data` is schemaless: categorized events carry a `$category` path array,
/// AFK events carry a `status` string.
#[derive(Debug, Clone, Deserialize)]
pub struct AwEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_secs: f64,
    #[serde(default)]
    pub data: Value,
}

impl AwEvent {
    /// Event duration as a chrono duration.
    pub fn duration(&self) -> Duration {
        Duration::milliseconds((self.duration_secs * 1000.0) as i64)
    }

    /// When the event ended.
    pub fn end(&self) -> DateTime<Utc> {
        self.timestamp + self.duration()
    }

    /// The `">"`-joined category path of a categorized event.
    pub fn category_label(&self) -> Option<String> {
        let parts = self.data.get("$category")?.as_array()?;
        let labels: Vec<&str> = parts.iter().filter_map(|p| p.as_str()).collect();
        if labels.is_empty() {
            return None;
        }
        Some(labels.join(">"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Minimal client for the aw-server REST API.
#[derive(Clone)]
pub struct AwClient {
    client: Client,
    base_url: String,
}

impl AwClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Runs a canonical query over `[start, end)` and returns the events the
    /// query RETURNs.
    ///
    /// The server evaluates the statements once per timeperiod; we always
    /// send exactly one window, so the first result is the whole answer.
    pub async fn query(&self, statements: &[String], start: DateTime<Local>, end: DateTime<Local>) -> Result<Vec<AwEvent>, ApiError> {
        let url = format!("{}/{}", self.base_url, QUERY_URL);
        let body = serde_json::json!({
            "timeperiods": [format!("{}/{}", start.to_rfc3339(), end.to_rfc3339())],
            "query": statements,
        });

        let res = self.client.post(url).json(&body).send().await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let mut periods: Vec<Vec<AwEvent>> = res.json().await?;
        Ok(periods.pop().unwrap_or_default())
    }

    /// Lists the buckets known to the server, keyed by bucket id.
    pub async fn buckets(&self) -> Result<HashMap<String, Bucket>, ApiError> {
        let url = format!("{}/{}", self.base_url, BUCKETS_URL);

        let res = self.client.get(url).send().await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(res.json().await?)
    }

    /// Fetches the most recent event from the AFK watcher bucket.
    ///
    /// Returns `Ok(None)` when no AFK bucket exists or the bucket is empty;
    /// the caller maps both onto an unknown activity status.
    pub async fn latest_afk_event(&self) -> Result<Option<AwEvent>, ApiError> {
        let buckets = self.buckets().await?;
        let Some(bucket_id) = buckets
            .values()
            .find(|b| b.id.starts_with(AFK_BUCKET_PREFIX) || b.kind == "afkstatus")
            .map(|b| b.id.clone())
        else {
            return Ok(None);
        };

        let url = format!("{}/{}/{}/events?limit=1", self.base_url, BUCKETS_URL, bucket_id);
        let res = self.client.get(url).send().await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let events: Vec<AwEvent> = res.json().await?;
        Ok(events.into_iter().next())
    }
}
