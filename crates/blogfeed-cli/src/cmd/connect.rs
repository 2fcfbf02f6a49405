use anyhow::Result;

use crate::args::Cli;
use crate::output;

pub async fn run(cli: &Cli) -> Result<()> {
    let session = super::open_session(cli)?;
    let report = session.on_load().await;

    if let Err(e) = &report.connect {
        if e.is_alert() {
            output::alert(&e.to_string());
        }
    }
    super::show(&session)?;

    report.connect?;
    report.feed?;
    Ok(())
}
