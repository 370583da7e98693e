//! Per-category threshold alerts.
//!
//! A `CategoryAlert` owns an ordered ladder of daily time thresholds for one
//! category and guarantees each threshold notifies at most once per logical
//! day. It also computes how far away the next threshold can possibly be,
//! which the scheduler uses to skip server queries while nothing is
//! imminent.

use crate::libs::formatter::to_hms;
use crate::libs::time_spent::{next_boundary, TimeSpent};
use anyhow::Result;
use chrono::{DateTime, Duration, Local, Utc};

const TITLE_ALERT: &str = "Time alert";
const TITLE_GOAL: &str = "Goal reached";

/// A notification produced by a threshold crossing, ready for the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertNotification {
    pub title: String,
    pub body: String,
}

/// Threshold state machine for one category.
pub struct CategoryAlert {
    /// Full category label as the time-spent map keys it (e.g. `"Media>Games"`).
    category: String,
    /// Display label shown in notifications (last path segment).
    label: String,
    thresholds: Vec<Duration>,
    /// Highest threshold that has triggered today; zero means none.
    max_triggered: Duration,
    /// Last-known elapsed time, refreshed from the time-spent cache.
    time_spent: Duration,
    last_check: DateTime<Local>,
    day_offset: Duration,
    /// Positively-framed alerts word the notification as goal progress.
    positive: bool,
}

impl CategoryAlert {
    pub fn new(category: &str, thresholds: Vec<Duration>, day_offset: Duration) -> Self {
        let label = category.rsplit('>').next().unwrap_or(category).to_string();
        Self {
            category: category.to_string(),
            label,
            thresholds,
            max_triggered: Duration::zero(),
            time_spent: Duration::zero(),
            // epoch sentinel: the very first update always refreshes
            last_check: DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Local),
            day_offset,
            positive: false,
        }
    }

    /// Marks the alert as positively framed.
    pub fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn max_triggered(&self) -> Duration {
        self.max_triggered
    }

    pub fn time_spent(&self) -> Duration {
        self.time_spent
    }

    fn thresholds_untriggered(&self) -> impl Iterator<Item = Duration> + '_ {
        self.thresholds.iter().copied().filter(move |t| *t > self.max_triggered)
    }

    /// The earliest time from now at which the next threshold can be
    /// reached.
    ///
    /// Zero or negative means a threshold is due now. Once every threshold
    /// has triggered, the answer is the time until tomorrow's rollover
    /// boundary plus the smallest configured threshold: the earliest
    /// moment tomorrow's first alert could fire.
    pub fn time_to_next_threshold(&self, now: DateTime<Local>) -> Duration {
        match self.thresholds_untriggered().min() {
            Some(next) => next - self.time_spent,
            None => {
                let boundary = next_boundary(now, self.day_offset);
                let smallest = self.thresholds.iter().copied().min().unwrap_or_else(Duration::zero);
                (boundary - now) + smallest
            }
        }
    }

    /// Whether enough time has passed that the next threshold could have
    /// been crossed since the last refresh.
    pub fn due(&self, now: DateTime<Local>) -> bool {
        now > self.last_check + self.time_to_next_threshold(now)
    }

    /// Records a fresh time-spent reading.
    pub fn refresh(&mut self, now: DateTime<Local>, time_spent: Duration) {
        self.last_check = now;
        self.time_spent = time_spent;
    }

    /// Refreshes `time_spent` from the tracker, but only when due.
    ///
    /// This is the adaptive polling interval: an alert whose next threshold
    /// is an hour away will not touch the server for most of that hour, yet
    /// is guaranteed to re-check no later than the computed due time.
    pub async fn update(&mut self, tracker: &TimeSpent) -> Result<()> {
        let now = Local::now();
        if !self.due(now) {
            return Ok(());
        }
        let times = tracker.get_time(None).await?;
        let time_spent = times.get(&self.category).copied().unwrap_or_else(Duration::zero);
        self.refresh(now, time_spent);
        Ok(())
    }

    /// Checks the untriggered thresholds against the current time spent.
    ///
    /// At most one threshold fires per call: the largest satisfied one
    /// becomes `max_triggered`, which silently absorbs every smaller
    /// threshold as well. After a long gap this coalesces what would be a
    /// storm of catch-up notifications into a single one. With `silent`
    /// set, state advances but no notification is produced; used on the
    /// first pass after startup.
    pub fn check(&mut self, silent: bool) -> Option<AlertNotification> {
        let mut exceeded: Vec<Duration> = self.thresholds_untriggered().filter(|t| *t <= self.time_spent).collect();
        exceeded.sort_unstable();
        let threshold = exceeded.pop()?;

        self.max_triggered = threshold;
        if silent {
            return None;
        }

        let threshold_hms = to_hms(&threshold);
        let spent_hms = to_hms(&self.time_spent);
        let body = if spent_hms == threshold_hms {
            format!("{} for {}", self.label, threshold_hms)
        } else {
            format!("{} for {} ({})", self.label, threshold_hms, spent_hms)
        };
        let title = if self.positive { TITLE_GOAL } else { TITLE_ALERT };

        Some(AlertNotification {
            title: title.to_string(),
            body,
        })
    }

    /// One-line `"label: time"` status for change logging.
    pub fn status(&self) -> String {
        format!("{}: {}", self.label, to_hms(&self.time_spent))
    }

    /// Returns the alert to its launch state. Called at the logical-day
    /// boundary so every threshold can fire again for the new day.
    pub fn reset(&mut self) {
        self.max_triggered = Duration::zero();
        self.time_spent = Duration::zero();
        self.last_check = DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Local);
    }
}
