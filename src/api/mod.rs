//! Client for the ActivityWatch-compatible tracking server.
//!
//! All time-spent and activity data comes from an aw-server-style REST API:
//! the query endpoint aggregates categorized window events server-side, and
//! the bucket endpoints expose raw AFK heartbeat events. This module wraps
//! those endpoints behind a small typed client.
//!
//! ## Features
//!
//! - **Query**: POST a canonical category query for a time window
//! - **Buckets**: discover the AFK watcher bucket and read its latest event
//! - **Typed errors**: transport and HTTP-status failures as `ApiError`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nag::api::AwClient;
//! use nag::api::query::canonical_events;
//! use nag::libs::categories;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = AwClient::new("http://localhost:5600");
//! let query = canonical_events(&categories::default_taxonomy());
//! # Ok(())
//! # }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

// API client modules
pub mod client;
pub mod query;

// Re-export the client for easier access from other modules
pub use client::AwClient;

/// Errors returned by the tracking-server client.
///
/// Callers in the scheduler loops log these and continue; the `checkin`
/// command surfaces them to the terminal. Neither swallows them here.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout, or response-decoding failure.
    #[error("failed to reach the tracking server: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("tracking server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}
