use std::path::Path;

use anyhow::Result;
use blogfeed_client::ImageFile;
use serde::Serialize;

use crate::args::Cli;
use crate::output;

#[derive(Debug, Serialize)]
pub struct UploadOut {
    pub file: String,
    pub secure_url: String,
}

pub async fn run(cli: &Cli, path: &Path) -> Result<()> {
    let session = super::open_session(cli)?;
    let file = ImageFile::read(path).await?;
    let name = file.file_name.clone();
    let secure_url = session.upload_image(file).await?;

    if output::is_json() {
        return output::print(&UploadOut { file: name, secure_url });
    }
    println!("{secure_url}");
    Ok(())
}
