use std::path::Path;

use anyhow::Result;
use blogfeed_client::{ImageFile, PostReceipt, PostRecord};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::args::Cli;
use crate::output;

#[derive(Debug, Serialize)]
pub struct PostOut {
    pub receipt: PostReceipt,
    pub posts: Vec<PostRecord>,
}

pub async fn run(cli: &Cli, image: &Path, title: &str, description: &str) -> Result<()> {
    let session = super::open_session(cli)?;
    if let Err(e) = session.connect().await {
        if e.is_alert() {
            output::alert(&e.to_string());
        }
        return Err(e.into());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    pb.set_message("reading image");
    let file = ImageFile::read(image).await?;

    pb.set_message("uploading image and submitting post");
    let result = session.create_post(file, title, description).await;
    pb.finish_and_clear();
    let receipt = result?;

    if output::is_json() {
        return output::print(&PostOut { receipt, posts: session.posts() });
    }
    output::eprintln_line(&format!(
        "post created in {} (tx {})",
        receipt.post_account, receipt.signature
    ));
    super::show(&session)
}
