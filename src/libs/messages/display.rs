//! Display implementation for nag application messages.
//!
//! Converts structured `Message` variants into the human-readable text used
//! for terminal output and notification bodies. Keeping every user-facing
//! string in one place keeps wording consistent and makes the message
//! catalog easy to audit.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SCHEDULER MESSAGES ===
            Message::SchedulerStarted(count) => format!("Watching {} category alerts", count),
            Message::SchedulerShuttingDown => "Shutting down scheduler...".to_string(),
            Message::ReceivedCtrlC => "Received Ctrl+C, shutting down gracefully...".to_string(),
            Message::ReceivedSigterm => "Received SIGTERM, shutting down gracefully...".to_string(),
            Message::ReceivedSigint => "Received SIGINT, shutting down gracefully...".to_string(),
            Message::SignalHandlingNotSupported => "Warning: Signal handling not supported on this platform".to_string(),
            Message::TaskPanicked(error) => format!("Scheduler task panicked: {}", error),
            Message::DayRollover(day) => format!("Logical day changed to {}, rearming alerts", day),
            Message::NewDayBody(day) => format!("It is {}", day),
            Message::SkippingNotActive(task) => format!("User is not definitively active, skipping {}", task),

            // === ALERT MESSAGES ===
            Message::AlertRefreshFailed(label, error) => format!("[nag] Failed to refresh time spent for '{}': {}", label, error),
            Message::CheckinFailed(error) => format!("[nag] Failed to send check-in: {}", error),
            Message::NewDayCheckFailed(error) => format!("[nag] New-day check failed: {}", error),
            Message::AfkStatusFailed(error) => format!("[nag] Failed to query AFK status: {}", error),

            // === NOTIFIER MESSAGES ===
            Message::NotificationSent(title, body) => format!("{}: {}", title, body),
            Message::NotifySendFailed(error) => format!("Failed to deliver notification: {}", error),

            // === CATEGORY MESSAGES ===
            Message::CategoriesLoaded(path, count) => format!("Loaded {} categories from {}", count, path),
            Message::CategoriesDefault(count) => format!("Using built-in default taxonomy ({} categories)", count),
            Message::CategoriesInvalidNode(path) => {
                format!("Category '{}' must map to a regex string or a table of sub-categories", path)
            }
            Message::CategoriesReadFailed(path, error) => format!("Failed to read category file {}: {}", path, error),
            Message::CategoriesParseFailed(path, error) => format!("Failed to parse category file {}: {}", path, error),

            // === CHECK-IN MESSAGES ===
            Message::CheckinSent => "Check-in sent".to_string(),
        };

        write!(f, "{}", text)
    }
}
