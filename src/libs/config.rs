//! Configuration management for the nag application.
//!
//! Settings live in a `config.json` under the platform data directory
//! (`libs/data_storage.rs` resolves it). Every section is optional: a
//! missing file or a missing section falls back to defaults, so the
//! application runs usefully with zero setup against a local tracking
//! server. A file that exists but does not parse is an error; silently
//! ignoring a user's half-written config hides real mistakes.
//!
//! ## Sections
//!
//! - **`server`**: where the ActivityWatch-compatible API lives
//! - **`notify`**: polling cadence, cache TTL, day offset, hourly check-in
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nag::libs::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::read()?;
//! let notify = config.notify.unwrap_or_default();
//! println!("polling every {}s", notify.poll_interval);
//! # Ok(())
//! # }
//! ```

use super::data_storage::DataStorage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Tracking-server connection settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the aw-server-compatible API.
    #[serde(default = "default_server_url")]
    pub url: String,
}

fn default_server_url() -> String {
    "http://localhost:5600".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { url: default_server_url() }
    }
}

/// Notification scheduler settings.
///
/// Timing values balance responsiveness against query load: the threshold
/// loop wakes every `poll_interval` seconds but individual alerts only
/// re-query the server when their next threshold is imminent, and the
/// shared cache bounds query frequency to one per `cache_ttl` per day key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NotifyConfig {
    /// Threshold loop poll interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Time-to-live in seconds for cached time-spent and AFK queries.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,

    /// Hours past local midnight at which the logical day rolls over.
    ///
    /// Late-night sessions before this boundary are attributed to the
    /// preceding day.
    #[serde(default = "default_day_offset_hours")]
    pub day_offset_hours: u8,

    /// Whether the hourly check-in notification is sent.
    #[serde(default = "default_hourly_checkin")]
    pub hourly_checkin: bool,
}

fn default_poll_interval() -> u64 {
    10
}

fn default_cache_ttl() -> u64 {
    60
}

fn default_day_offset_hours() -> u8 {
    4
}

fn default_hourly_checkin() -> bool {
    true
}

impl Default for NotifyConfig {
    fn default() -> Self {
        NotifyConfig {
            poll_interval: default_poll_interval(),
            cache_ttl: default_cache_ttl(),
            day_offset_hours: default_day_offset_hours(),
            hourly_checkin: default_hourly_checkin(),
        }
    }
}

/// Main configuration container for the entire application.
///
/// All sections are optional so unconfigured installs keep working and new
/// sections can be added without breaking existing files. Unset sections
/// are omitted from the serialized JSON.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    /// Tracking-server connection settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Notification scheduler settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<NotifyConfig>,
}

impl Config {
    /// Reads configuration from the filesystem.
    ///
    /// A missing file yields the default configuration; an existing file
    /// that cannot be read or parsed is an error.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the current configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }
}
