use crate::libs::categories;
use crate::libs::config::Config;
use crate::libs::scheduler::Scheduler;
use anyhow::Result;

/// Runs the scheduler loops until the process is terminated.
///
/// Configuration problems surface here, before any loop starts: a malformed
/// category document aborts startup since it defines all downstream
/// matching behavior.
pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let categories = categories::load()?;

    let scheduler = Scheduler::new(&config, categories);
    scheduler.run().await
}
