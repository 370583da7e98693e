//! Desktop notification sink.
//!
//! Wraps `notify-rust` behind a context-owned struct constructed once at
//! startup and shared by the scheduler loops. Delivery is fire-and-forget:
//! a failed send is logged and the caller's loop continues. Stacking of
//! concurrent notifications is the desktop notification server's job.

use crate::libs::data_storage::APP_NAME;
use crate::libs::messages::Message;
use crate::{msg_error, msg_info};
use notify_rust::Notification;

const ICON: &str = "appointment-soon";

pub struct Notifier;

impl Notifier {
    pub fn new() -> Self {
        Notifier
    }

    /// Displays a desktop notification and echoes it to the log.
    pub fn send(&self, title: &str, body: &str) {
        msg_info!(Message::NotificationSent(title.to_string(), body.to_string()));

        if let Err(e) = Notification::new().summary(title).body(body).appname(APP_NAME).icon(ICON).show() {
            msg_error!(Message::NotifySendFailed(e.to_string()));
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
