//! Cached per-category time-spent queries and logical-day arithmetic.
//!
//! A "logical day" is the calendar date of `now - day_offset`: with the
//! default 4-hour offset, activity at 2am still counts toward the previous
//! day, and the day rolls over at 4am local time. All query windows and
//! rollover decisions in the scheduler go through the helpers here so the
//! offset is applied in exactly one place.

use crate::api::query::canonical_events;
use crate::api::AwClient;
use crate::libs::cache::TtlCache;
use crate::libs::categories::Category;
use anyhow::Result;
use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::collections::HashMap;

/// Label of the synthesized total-across-categories pseudo-category.
pub const ALL_CATEGORY: &str = "All";

/// The logical day `now` belongs to.
pub fn logical_day(now: DateTime<Local>, day_offset: Duration) -> NaiveDate {
    (now - day_offset).date_naive()
}

/// Local wall-clock start of a logical day: midnight plus the offset.
pub fn day_start(date: NaiveDate, day_offset: Duration) -> DateTime<Local> {
    resolve_local(date.and_time(NaiveTime::MIN) + day_offset)
}

/// The next rollover boundary strictly after `now`.
pub fn next_boundary(now: DateTime<Local>, day_offset: Duration) -> DateTime<Local> {
    day_start(logical_day(now, day_offset), day_offset) + Duration::days(1)
}

fn resolve_local(naive: NaiveDateTime) -> DateTime<Local> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // DST gap: the wall-clock time does not exist, shift past it
        LocalResult::None => match Local.from_local_datetime(&(naive + Duration::hours(1))) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => naive.and_utc().with_timezone(&Local),
        },
    }
}

/// Cached category→duration queries against the tracking server.
///
/// Results are keyed by logical day and served from the TTL cache until the
/// freshness window (default 60s) lapses, bounding query frequency no
/// matter how many alerts or loops ask.
pub struct TimeSpent {
    client: AwClient,
    categories: Vec<Category>,
    cache: TtlCache<NaiveDate, HashMap<String, Duration>>,
    day_offset: Duration,
}

impl TimeSpent {
    pub fn new(client: AwClient, categories: Vec<Category>, cache_ttl: Duration, day_offset: Duration) -> Self {
        Self {
            client,
            categories,
            cache: TtlCache::new(cache_ttl),
            day_offset,
        }
    }

    pub fn day_offset(&self) -> Duration {
        self.day_offset
    }

    /// Today's logical day.
    pub fn today(&self) -> NaiveDate {
        logical_day(Local::now(), self.day_offset)
    }

    /// Returns the time spent per category label for one logical day
    /// (today when `date` is `None`), including the synthesized
    /// [`ALL_CATEGORY`] total.
    ///
    /// The query window is the 24 hours starting at the day's offset
    /// boundary. Events come back merged by `$category`; durations are
    /// accumulated per full path label here. Server errors propagate to the
    /// caller; the scheduler loops decide whether they are fatal.
    pub async fn get_time(&self, date: Option<NaiveDate>) -> Result<HashMap<String, Duration>> {
        let date = date.unwrap_or_else(|| self.today());

        if let Some(times) = self.cache.get(&date) {
            return Ok(times);
        }

        let start = day_start(date, self.day_offset);
        let end = start + Duration::days(1);
        let statements = canonical_events(&self.categories);
        let events = self.client.query(&statements, start, end).await?;

        let mut times: HashMap<String, Duration> = HashMap::new();
        let mut total = Duration::zero();
        for event in &events {
            let Some(label) = event.category_label() else {
                continue;
            };
            let duration = event.duration();
            let slot = times.entry(label).or_insert_with(Duration::zero);
            *slot = *slot + duration;
            total = total + duration;
        }
        times.insert(ALL_CATEGORY.to_string(), total);

        self.cache.put(date, times.clone());
        Ok(times)
    }
}
