//! The periodic scheduler loops behind `nag start`.
//!
//! Four independent tokio tasks share a single context object constructed
//! at startup (no lazy globals): the threshold-polling loop, the hourly
//! check-in, new-day detection, and the one-shot startup summaries. Each
//! loop computes its own next wake time and isolates its own failures: a
//! query error is logged and the loop continues at its next cycle, never
//! taking sibling tasks down with it.

use crate::api::AwClient;
use crate::libs::afk::{ActivityStatus, AfkChecker};
use crate::libs::alert::CategoryAlert;
use crate::libs::categories::Category;
use crate::libs::config::Config;
use crate::libs::formatter::to_hms;
use crate::libs::messages::Message;
use crate::libs::notifier::Notifier;
use crate::libs::time_spent::{logical_day, next_boundary, TimeSpent, ALL_CATEGORY};
use crate::{msg_debug, msg_error, msg_info};
use anyhow::Result;
use chrono::{DateTime, Duration, Local, NaiveDate, Timelike};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration as StdDuration;

const TITLE_TIME_TODAY: &str = "Time today";
const TITLE_TIME_YESTERDAY: &str = "Time yesterday";
const TITLE_HOURLY: &str = "Hourly check-in";
const TITLE_NEW_DAY: &str = "New day";

/// Categories below this share of total tracked time are left out of
/// check-in summaries.
const SUMMARY_MIN_SHARE: f64 = 0.02;

/// Maximum number of categories listed in a check-in summary.
const SUMMARY_MAX_CATEGORIES: usize = 5;

/// Retry interval after a deferred new-day notification.
const NEW_DAY_RETRY: StdDuration = StdDuration::from_secs(60);

/// Longest the new-day loop sleeps between boundary checks.
const NEW_DAY_MAX_SLEEP: StdDuration = StdDuration::from_secs(600);

/// Shared state for the scheduler loops, owned by the process entry point
/// and passed explicitly instead of living in globals.
pub struct SchedulerContext {
    pub tracker: TimeSpent,
    pub afk: AfkChecker,
    pub notifier: Notifier,
    pub day_offset: Duration,
    pub poll_interval: StdDuration,
    pub hourly_checkin: bool,
}

pub struct Scheduler {
    ctx: Arc<SchedulerContext>,
    alerts: Vec<CategoryAlert>,
}

impl Scheduler {
    /// Builds the context and the static alert table from configuration.
    pub fn new(config: &Config, categories: Vec<Category>) -> Self {
        let server = config.server.clone().unwrap_or_default();
        let notify = config.notify.clone().unwrap_or_default();

        let day_offset = Duration::hours(notify.day_offset_hours as i64);
        let cache_ttl = Duration::seconds(notify.cache_ttl as i64);
        let client = AwClient::new(&server.url);
        let alerts = build_alerts(&categories, day_offset);

        let ctx = Arc::new(SchedulerContext {
            tracker: TimeSpent::new(client.clone(), categories, cache_ttl, day_offset),
            afk: AfkChecker::new(client, cache_ttl),
            notifier: Notifier::new(),
            day_offset,
            poll_interval: StdDuration::from_secs(notify.poll_interval),
            hourly_checkin: notify.hourly_checkin,
        });

        Self { ctx, alerts }
    }

    /// Sends a one-shot summary notification for one logical day.
    pub async fn checkin(&self, title: &str, date: Option<NaiveDate>) -> Result<()> {
        send_checkin(&self.ctx, title, date).await
    }

    /// Runs all scheduler loops until a shutdown signal arrives.
    pub async fn run(self) -> Result<()> {
        // Set up a channel to handle shutdown signals
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        #[cfg(unix)]
        {
            tokio::spawn(async move {
                use tokio::signal::unix::{signal, SignalKind};

                let mut sigterm = match signal(SignalKind::terminate()) {
                    Ok(sigterm) => sigterm,
                    Err(e) => {
                        msg_error!(Message::TaskPanicked(e.to_string()));
                        return;
                    }
                };
                let mut sigint = match signal(SignalKind::interrupt()) {
                    Ok(sigint) => sigint,
                    Err(e) => {
                        msg_error!(Message::TaskPanicked(e.to_string()));
                        return;
                    }
                };

                tokio::select! {
                    _ = sigterm.recv() => {
                        msg_info!(Message::ReceivedSigterm);
                    }
                    _ = sigint.recv() => {
                        msg_info!(Message::ReceivedSigint);
                    }
                }

                let _ = shutdown_tx.send(());
            });
        }

        #[cfg(windows)]
        {
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        msg_info!(Message::ReceivedCtrlC);
                    }
                    Err(e) => {
                        msg_error!(Message::TaskPanicked(e.to_string()));
                    }
                }

                let _ = shutdown_tx.send(());
            });
        }

        #[cfg(not(any(unix, windows)))]
        {
            let _ = shutdown_tx;
            crate::msg_warning!(Message::SignalHandlingNotSupported);
        }

        // Startup summaries: today so far, and yesterday's full window.
        if let Err(e) = send_checkin(&self.ctx, TITLE_TIME_TODAY, None).await {
            msg_error!(Message::CheckinFailed(e.to_string()));
        }
        let yesterday = self.ctx.tracker.today() - Duration::days(1);
        if let Err(e) = send_checkin(&self.ctx, TITLE_TIME_YESTERDAY, Some(yesterday)).await {
            msg_error!(Message::CheckinFailed(e.to_string()));
        }

        msg_info!(Message::SchedulerStarted(self.alerts.len()));

        let ctx = self.ctx.clone();
        let threshold_handle = tokio::spawn(threshold_loop(ctx.clone(), self.alerts));
        if ctx.hourly_checkin {
            tokio::spawn(hourly_loop(ctx.clone()));
        }
        tokio::spawn(new_day_loop(ctx.clone()));

        tokio::select! {
            result = threshold_handle => {
                if let Err(e) = result {
                    msg_error!(Message::TaskPanicked(e.to_string()));
                }
            }
            _ = shutdown_rx => {
                msg_info!(Message::SchedulerShuttingDown);
            }
        }

        Ok(())
    }
}

/// The static alert table.
///
/// "All" always gets the full ladder; per-category ladders are added only
/// when the loaded taxonomy actually defines the label.
fn build_alerts(categories: &[Category], day_offset: Duration) -> Vec<CategoryAlert> {
    let m15 = Duration::minutes(15);
    let m30 = Duration::minutes(30);
    let h1 = Duration::hours(1);
    let h2 = Duration::hours(2);
    let h4 = Duration::hours(4);
    let h6 = Duration::hours(6);
    let h8 = Duration::hours(8);

    let mut alerts = vec![CategoryAlert::new(ALL_CATEGORY, vec![m15, m30, h1, h2, h4, h6, h8], day_offset)];

    let labels: HashSet<String> = categories.iter().map(|c| c.label()).collect();
    if labels.contains("Work") {
        alerts.push(CategoryAlert::new("Work", vec![m15, m30, h1, h2, h4], day_offset).positive());
    }
    if labels.contains("Media>Social Media") {
        alerts.push(CategoryAlert::new("Media>Social Media", vec![m15, m30, h1], day_offset));
    }
    if labels.contains("Media>Games") {
        alerts.push(CategoryAlert::new("Media>Games", vec![m30, h1, h2], day_offset));
    }

    alerts
}

/// Polls every alert on a fixed cadence.
///
/// The first pass seeds `max_triggered` silently so a restart does not
/// flood the user with alerts for thresholds crossed while the process was
/// down. At the logical-day boundary every alert is reset before the cycle
/// runs.
async fn threshold_loop(ctx: Arc<SchedulerContext>, mut alerts: Vec<CategoryAlert>) {
    let mut first_pass = true;
    let mut day = logical_day(Local::now(), ctx.day_offset);
    let mut statuses: Vec<String> = alerts.iter().map(|a| a.status()).collect();

    loop {
        let today = logical_day(Local::now(), ctx.day_offset);
        if today != day {
            msg_info!(Message::DayRollover(today.to_string()));
            for alert in alerts.iter_mut() {
                alert.reset();
            }
            day = today;
        }

        for (i, alert) in alerts.iter_mut().enumerate() {
            if let Err(e) = alert.update(&ctx.tracker).await {
                msg_error!(Message::AlertRefreshFailed(alert.label().to_string(), e.to_string()));
                continue;
            }
            if let Some(notification) = alert.check(first_pass) {
                ctx.notifier.send(&notification.title, &notification.body);
            }
            let status = alert.status();
            if statuses[i] != status {
                msg_debug!(&status);
                statuses[i] = status;
            }
        }
        first_pass = false;

        tokio::time::sleep(ctx.poll_interval).await;
    }
}

/// Sends a summary at every wall-clock whole hour, but only while the user
/// is definitively active.
async fn hourly_loop(ctx: Arc<SchedulerContext>) {
    loop {
        tokio::time::sleep(duration_until_next_hour(Local::now())).await;

        match ctx.afk.status().await {
            Ok(ActivityStatus::Active) => {
                if let Err(e) = send_checkin(&ctx, TITLE_HOURLY, None).await {
                    msg_error!(Message::CheckinFailed(e.to_string()));
                }
            }
            Ok(_) => msg_debug!(Message::SkippingNotActive("hourly check-in".to_string())),
            Err(e) => msg_error!(Message::AfkStatusFailed(e.to_string())),
        }
    }
}

/// Watches for the logical-day rollover and greets the new day once the
/// user is back at the keyboard.
///
/// An `Unknown` activity status never advances the stored day; the check
/// simply retries on the next poll.
async fn new_day_loop(ctx: Arc<SchedulerContext>) {
    let mut day = logical_day(Local::now(), ctx.day_offset);

    loop {
        let now = Local::now();
        let today = logical_day(now, ctx.day_offset);

        if today == day {
            let until_boundary = (next_boundary(now, ctx.day_offset) - now).to_std().unwrap_or(NEW_DAY_RETRY);
            tokio::time::sleep(until_boundary.min(NEW_DAY_MAX_SLEEP)).await;
            continue;
        }

        match ctx.afk.status().await {
            Ok(ActivityStatus::Active) => {
                let body = Message::NewDayBody(today.format("%A, %-d %B").to_string()).to_string();
                ctx.notifier.send(TITLE_NEW_DAY, &body);
                day = today;
            }
            Ok(_) => msg_debug!(Message::SkippingNotActive("new-day notification".to_string())),
            Err(e) => msg_error!(Message::NewDayCheckFailed(e.to_string())),
        }

        tokio::time::sleep(NEW_DAY_RETRY).await;
    }
}

/// Builds and sends one summary notification: the day's total plus the top
/// categories above the minimum share, largest first.
async fn send_checkin(ctx: &SchedulerContext, title: &str, date: Option<NaiveDate>) -> Result<()> {
    let times = ctx.tracker.get_time(date).await?;
    let total = times.get(ALL_CATEGORY).copied().unwrap_or_else(Duration::zero);

    let mut categories: Vec<(&String, Duration)> = times
        .iter()
        .filter(|(label, _)| label.as_str() != ALL_CATEGORY)
        .map(|(label, duration)| (label, *duration))
        .filter(|(_, duration)| {
            total > Duration::zero() && duration.num_seconds() as f64 / total.num_seconds() as f64 > SUMMARY_MIN_SHARE
        })
        .collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1));
    categories.truncate(SUMMARY_MAX_CATEGORIES);

    let mut body = format!("Total: {}", to_hms(&total));
    for (label, duration) in categories {
        body.push_str(&format!("\n - {}: {}", label, to_hms(&duration)));
    }

    ctx.notifier.send(title, &body);
    Ok(())
}

fn duration_until_next_hour(now: DateTime<Local>) -> StdDuration {
    let next = now + Duration::hours(1);
    let next = next
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(next);
    (next - now).to_std().unwrap_or(StdDuration::from_secs(1))
}
