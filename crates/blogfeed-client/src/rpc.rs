//! RPC seam between the adapters and the cluster.
//!
//! The adapters only need a handful of calls. Keeping them behind a trait lets tests
//! count calls and inject failures without a validator.

use std::future::Future;

pub use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::hash::Hash;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use crate::config::ClientConfig;
use crate::errors::{FeedError, FeedResult};

pub trait ChainRpc: Send + Sync + 'static {
    fn latest_blockhash(&self) -> impl Future<Output = FeedResult<Hash>> + Send;

    fn send_and_confirm(&self, tx: &Transaction) -> impl Future<Output = FeedResult<Signature>> + Send;

    /// Addresses of every account owned by `program_id`, in node order.
    fn program_accounts(&self, program_id: &Pubkey) -> impl Future<Output = FeedResult<Vec<Pubkey>>> + Send;

    fn account_data(&self, key: &Pubkey) -> impl Future<Output = FeedResult<Vec<u8>>> + Send;

    fn health(&self) -> impl Future<Output = FeedResult<String>> + Send;
}

impl ChainRpc for RpcClient {
    async fn latest_blockhash(&self) -> FeedResult<Hash> {
        self.get_latest_blockhash()
            .await
            .map_err(|e| FeedError::Submission(format!("latest blockhash: {e}")))
    }

    async fn send_and_confirm(&self, tx: &Transaction) -> FeedResult<Signature> {
        self.send_and_confirm_transaction(tx)
            .await
            .map_err(|e| FeedError::Submission(e.to_string()))
    }

    async fn program_accounts(&self, program_id: &Pubkey) -> FeedResult<Vec<Pubkey>> {
        let accounts = self
            .get_program_accounts(program_id)
            .await
            .map_err(|e| FeedError::FeedLoad(e.to_string()))?;
        Ok(accounts.into_iter().map(|(key, _)| key).collect())
    }

    async fn account_data(&self, key: &Pubkey) -> FeedResult<Vec<u8>> {
        self.get_account_data(key).await.map_err(|e| FeedError::Decode {
            account: key.to_string(),
            reason: e.to_string(),
        })
    }

    async fn health(&self) -> FeedResult<String> {
        let version = self
            .get_version()
            .await
            .map_err(|e| FeedError::FeedLoad(format!("rpc unreachable: {e}")))?;
        Ok(version.solana_core)
    }
}

/// Nonblocking RPC client for `config`'s cluster and commitment.
pub fn rpc_client(config: &ClientConfig) -> RpcClient {
    RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment)
}
