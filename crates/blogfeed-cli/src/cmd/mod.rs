use std::sync::Arc;

use anyhow::Result;
use blogfeed_client::rpc::{rpc_client, RpcClient};
use blogfeed_client::{CloudinaryUploader, FeedSession, KeypairWallet, PostRecord};
use serde::Serialize;

use crate::args::{Cli, Command};
use crate::output;

mod connect;
mod doctor;
mod feed;
mod post;
mod upload;

pub type CliSession = FeedSession<RpcClient, KeypairWallet, CloudinaryUploader>;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Connect => connect::run(&cli).await,
        Command::Feed => feed::run(&cli).await,
        Command::Post { image, title, description } => post::run(&cli, image, title, description).await,
        Command::Upload { path } => upload::run(&cli, path).await,
        Command::Doctor => doctor::run(&cli).await,
    }
}

fn open_session(cli: &Cli) -> Result<CliSession> {
    let config = cli.client_config()?;
    let rpc = Arc::new(rpc_client(&config));
    let wallet = cli.wallet();
    let media = CloudinaryUploader::new(config.upload.clone())?;
    Ok(FeedSession::new(config, rpc, wallet, media)?)
}

#[derive(Debug, Serialize)]
pub struct FeedOut {
    pub program_id: String,
    pub button: String,
    pub address: Option<String>,
    pub posts: Vec<PostRecord>,
}

/// Render the header and the feed currently held by `session`.
fn show(session: &CliSession) -> Result<()> {
    let out = FeedOut {
        program_id: session.program_id().to_string(),
        button: session.connect_label(),
        address: session.address().map(|a| a.to_string()),
        posts: session.posts(),
    };
    if output::is_json() {
        return output::print(&out);
    }
    output::render_header(&out.button, out.address.is_some())?;
    output::render_feed(&out.posts)?;
    Ok(())
}
