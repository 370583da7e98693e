use crate::libs::categories;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::scheduler::Scheduler;
use crate::msg_success;
use anyhow::Result;

const TITLE: &str = "Time today";

/// Sends a one-shot summary of today's tracked time and exits.
pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let categories = categories::load()?;

    let scheduler = Scheduler::new(&config, categories);
    scheduler.checkin(TITLE, None).await?;

    msg_success!(Message::CheckinSent);
    Ok(())
}
