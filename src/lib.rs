//! # Nag - Notification Alerts for tracked screen time
//!
//! A desktop notifier for ActivityWatch-style time tracking. Nag polls an
//! aw-server-compatible API for the time spent in user-defined activity
//! categories and sends a one-shot desktop notification the first time a
//! category crosses one of its daily thresholds.
//!
//! ## Features
//!
//! - **Threshold Alerts**: per-category ladders of daily time thresholds,
//!   each firing at most once per logical day
//! - **Adaptive Polling**: alerts compute their next significant wake time
//!   so the tracking server is only queried when a threshold is imminent
//! - **Check-ins**: hourly and on-demand summaries of the top categories
//! - **Day Awareness**: a configurable daily offset keeps late-night
//!   sessions attributed to the preceding day
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nag::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
