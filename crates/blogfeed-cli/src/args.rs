use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use blogfeed_client::config::UploadConfig;
use blogfeed_client::constants::{DEFAULT_CLOUD_NAME, DEFAULT_COMMITMENT, DEFAULT_RPC_URL, DEFAULT_UPLOAD_PRESET};
use blogfeed_client::{ClientConfig, KeypairWallet};
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug, Clone)]
#[command(name = "blogfeed", version, about = "BlogDapp feed client")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Cluster RPC URL.
    #[arg(long, global = true, env = "BLOGFEED_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub url: String,

    /// Commitment level: processed|confirmed|finalized
    #[arg(long, global = true, default_value = DEFAULT_COMMITMENT)]
    pub commitment: String,

    /// Wallet keypair file (default: ~/.config/solana/id.json)
    #[arg(long, global = true, env = "BLOGFEED_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Program id (default: from the IDL metadata).
    #[arg(long, global = true)]
    pub program_id: Option<String>,

    /// IDL file (default: embedded feed_post_app IDL).
    #[arg(long, global = true)]
    pub idl: Option<PathBuf>,

    /// Seconds to wait for the wallet to answer.
    #[arg(long, global = true, default_value_t = 60)]
    pub connect_timeout_secs: u64,

    #[arg(long, global = true, env = "BLOGFEED_CLOUD_NAME", default_value = DEFAULT_CLOUD_NAME)]
    pub cloud_name: String,

    #[arg(long, global = true, env = "BLOGFEED_UPLOAD_PRESET", default_value = DEFAULT_UPLOAD_PRESET)]
    pub upload_preset: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Connect the wallet, then show the feed.
    Connect,

    /// Show every post recorded by the program.
    Feed,

    /// Upload an image and record a post.
    Post {
        /// Image file to upload.
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },

    /// Upload an image and print its URL.
    Upload { path: PathBuf },

    /// Check wallet, IDL and RPC.
    Doctor,
}

impl Cli {
    pub fn client_config(&self) -> Result<ClientConfig> {
        let program_id = match &self.program_id {
            Some(raw) => Some(raw.parse().map_err(|_| anyhow!("invalid program id: {raw}"))?),
            None => None,
        };
        let config = ClientConfig {
            rpc_url: self.url.clone(),
            commitment: ClientConfig::parse_commitment(&self.commitment)?,
            program_id,
            idl_path: self.idl.clone(),
            upload: UploadConfig {
                cloud_name: self.cloud_name.clone(),
                upload_preset: self.upload_preset.clone(),
                ..UploadConfig::default()
            },
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn keypair_path(&self) -> Result<PathBuf> {
        self.keypair
            .clone()
            .or_else(KeypairWallet::default_path)
            .ok_or_else(|| anyhow!("cannot locate a keypair; pass --keypair"))
    }

    /// Wallet for this invocation. Without a resolvable keypair path the
    /// wallet is simply unavailable, so commands can still show the feed.
    pub fn wallet(&self) -> KeypairWallet {
        wallet_from(self.keypair.clone(), KeypairWallet::default_path())
    }
}

fn wallet_from(explicit: Option<PathBuf>, fallback: Option<PathBuf>) -> KeypairWallet {
    match explicit.or(fallback) {
        Some(path) => KeypairWallet::new(path),
        None => {
            debug!("no keypair path; continuing without a wallet");
            KeypairWallet::new(PathBuf::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogfeed_client::WalletProvider;

    #[test]
    fn post_command_parses() {
        let cli = Cli::try_parse_from([
            "blogfeed", "post", "--image", "a.png", "--title", "t", "--description", "d",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Post { ref title, .. } if title == "t"));
    }

    #[test]
    fn global_flags_build_config() {
        let id = "G9XpmsmxpKuiyizNLPpseG7bzEUL8a2PZYjH3v5z9UuZ";
        let cli = Cli::try_parse_from([
            "blogfeed", "feed", "--url", "http://127.0.0.1:8899", "--commitment", "confirmed",
            "--program-id", id, "--connect-timeout-secs", "5",
        ])
        .unwrap();
        let cfg = cli.client_config().unwrap();
        assert_eq!(cfg.rpc_url, "http://127.0.0.1:8899");
        assert_eq!(cfg.program_id.unwrap().to_string(), id);
        assert_eq!(cfg.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_program_id_is_reported() {
        let cli = Cli::try_parse_from(["blogfeed", "feed", "--program-id", "nope"]).unwrap();
        assert!(cli.client_config().is_err());
    }

    #[test]
    fn missing_keypair_location_gives_an_unavailable_wallet() {
        let wallet = wallet_from(None, None);
        assert!(!wallet.is_available());

        let wallet = wallet_from(Some(PathBuf::from("/tmp/a.json")), Some(PathBuf::from("/tmp/b.json")));
        assert_eq!(wallet.path(), PathBuf::from("/tmp/a.json").as_path());
    }

    #[test]
    fn explicit_keypair_wins() {
        let cli = Cli::try_parse_from(["blogfeed", "connect", "--keypair", "/tmp/k.json"]).unwrap();
        assert_eq!(cli.keypair_path().unwrap(), PathBuf::from("/tmp/k.json"));
    }
}
