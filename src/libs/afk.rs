//! Activity (AFK) status with staleness detection.
//!
//! The AFK watcher posts heartbeat events with a `status` of `"not-afk"` or
//! `"afk"`. A heartbeat that stopped arriving tells us nothing (the watcher
//! may have crashed or the machine slept), so an event whose end is older
//! than the staleness bound yields `Unknown` rather than `Inactive`.
//! Callers must treat `Unknown` as "do not act".

use crate::api::client::AwEvent;
use crate::api::AwClient;
use crate::libs::cache::TtlCache;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

/// Heartbeats older than this are considered stale.
const STALENESS_BOUND_MINUTES: i64 = 5;

/// Whether the user is at the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    Active,
    Inactive,
    /// No recent heartbeat; neither presence nor absence can be assumed.
    Unknown,
}

/// Classifies the most recent AFK heartbeat into an activity status.
pub fn classify(event: Option<&AwEvent>, now: DateTime<Utc>) -> ActivityStatus {
    let Some(event) = event else {
        return ActivityStatus::Unknown;
    };
    if now - event.end() > Duration::minutes(STALENESS_BOUND_MINUTES) {
        return ActivityStatus::Unknown;
    }
    match event.data.get("status").and_then(|s| s.as_str()) {
        Some("not-afk") => ActivityStatus::Active,
        Some(_) => ActivityStatus::Inactive,
        None => ActivityStatus::Unknown,
    }
}

/// Cached activity-status queries against the tracking server.
pub struct AfkChecker {
    client: AwClient,
    cache: TtlCache<(), ActivityStatus>,
}

impl AfkChecker {
    pub fn new(client: AwClient, cache_ttl: Duration) -> Self {
        Self {
            client,
            cache: TtlCache::new(cache_ttl),
        }
    }

    /// The current activity status, served from cache within the TTL.
    pub async fn status(&self) -> Result<ActivityStatus> {
        if let Some(status) = self.cache.get(&()) {
            return Ok(status);
        }

        let event = self.client.latest_afk_event().await?;
        let status = classify(event.as_ref(), Utc::now());
        self.cache.put((), status);
        Ok(status)
    }
}
