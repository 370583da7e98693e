//! Duration formatting for notification and log text.
//!
//! All user-visible durations use the compact "Xd Xh Xm Xs" form: only the
//! nonzero components are shown, space-joined, with a `"0s"` fallback for a
//! zero (or negative) duration. The format favors notification bodies, where
//! "1h 5s" reads better than a zero-padded clock time.
//!
//! ## Examples
//!
//! ```rust
//! use nag::libs::formatter::to_hms;
//! use chrono::Duration;
//!
//! assert_eq!(to_hms(&Duration::zero()), "0s");
//! assert_eq!(to_hms(&Duration::seconds(90)), "1m 30s");
//! assert_eq!(to_hms(&Duration::seconds(3605)), "1h 5s");
//! ```

use chrono::Duration;

/// Formats a duration as the space-joined sequence of its nonzero
/// day/hour/minute/second components.
///
/// Negative durations are clamped to zero; a duration with no nonzero
/// components renders as `"0s"`. There are no error conditions.
pub fn to_hms(duration: &Duration) -> String {
    let total = duration.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let mut parts: Vec<String> = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 {
        parts.push(format!("{}s", seconds));
    }

    if parts.is_empty() {
        return "0s".to_string();
    }
    parts.join(" ")
}
