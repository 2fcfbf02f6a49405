use anyhow::Result;
use tracing::debug;

use crate::args::Cli;
use crate::output;

/// Like `connect`, but a missing or refused wallet only changes the header.
pub async fn run(cli: &Cli) -> Result<()> {
    let session = super::open_session(cli)?;
    let report = session.on_load().await;

    match &report.connect {
        Err(e) if e.is_alert() => output::alert(&e.to_string()),
        Err(e) => debug!("continuing without wallet: {e}"),
        Ok(_) => {}
    }
    super::show(&session)?;

    report.feed?;
    Ok(())
}
