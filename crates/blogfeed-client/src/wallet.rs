//! Wallet connector.
//!
//! A `WalletProvider` stands in for a browser-injected wallet: it may be
//! absent, it may refuse to connect, and it signs transactions it is asked to
//! sign. `connect_wallet` bounds the connection request with a timeout since a
//! provider prompt can be left unanswered.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use solana_program::hash::Hash;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair, Keypair, Signer};
use solana_sdk::transaction::Transaction;
use tracing::{info, warn};

use crate::errors::{FeedError, FeedResult};

pub trait WalletProvider: Send + Sync {
    /// Whether a provider is present at all.
    fn is_available(&self) -> bool;

    /// Request a connection. May wait on the user.
    fn connect(&self) -> impl Future<Output = FeedResult<Pubkey>> + Send;

    /// Add the wallet's signature to `tx`.
    fn sign_transaction(&self, tx: &mut Transaction, blockhash: Hash) -> FeedResult<()>;
}

/// Connect through `wallet`, giving up after `timeout`.
pub async fn connect_wallet<W: WalletProvider>(wallet: &W, timeout: Duration) -> FeedResult<Pubkey> {
    if !wallet.is_available() {
        let err = FeedError::WalletUnavailable("get a Solana wallet".to_string());
        warn!("{err}");
        return Err(err);
    }

    match tokio::time::timeout(timeout, wallet.connect()).await {
        Ok(Ok(pubkey)) => {
            info!(%pubkey, "wallet connected");
            Ok(pubkey)
        }
        Ok(Err(e)) => {
            warn!("wallet connect failed: {e}");
            Err(e)
        }
        Err(_) => {
            let err = FeedError::WalletTimeout(timeout);
            warn!("{err}");
            Err(err)
        }
    }
}

/// Wallet backed by a Solana CLI keypair file.
#[derive(Debug)]
pub struct KeypairWallet {
    path: PathBuf,
    keypair: OnceLock<Keypair>,
}

impl KeypairWallet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), keypair: OnceLock::new() }
    }

    /// `~/.config/solana/id.json`, the Solana CLI default.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
        Some(Path::new(&home).join(".config").join("solana").join("id.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> FeedResult<&Keypair> {
        if let Some(kp) = self.keypair.get() {
            return Ok(kp);
        }
        let reject = |e: String| {
            FeedError::WalletRejected(format!("cannot read keypair {}: {e}", self.path.display()))
        };
        let raw = tokio::fs::read(&self.path).await.map_err(|e| reject(e.to_string()))?;
        let kp = read_keypair(&mut raw.as_slice()).map_err(|e| reject(e.to_string()))?;
        Ok(self.keypair.get_or_init(|| kp))
    }
}

impl WalletProvider for KeypairWallet {
    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    async fn connect(&self) -> FeedResult<Pubkey> {
        self.load().await.map(|kp| kp.pubkey())
    }

    fn sign_transaction(&self, tx: &mut Transaction, blockhash: Hash) -> FeedResult<()> {
        let kp = self.keypair.get().ok_or(FeedError::WalletNotConnected)?;
        tx.try_partial_sign(&[kp], blockhash)
            .map_err(|e| FeedError::Submission(format!("wallet signature: {e}")))
    }
}
