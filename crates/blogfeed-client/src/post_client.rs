//! Post submission adapter.
//!
//! Builds and submits the `createPost` instruction of the blog program.
//! Each submission creates a new post account from a keypair supplied by the
//! caller; the program allocates that account, so the keypair signs alongside
//! the wallet.

use borsh::BorshSerialize;
use serde::{Deserialize, Serialize};
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::Transaction;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::constants::CREATE_POST_IX;
use crate::discriminator::instruction_discriminator;
use crate::errors::{FeedError, FeedResult};
use crate::idl::Idl;
use crate::rpc::ChainRpc;
use crate::wallet::WalletProvider;

/// Arguments of `createPost`, in IDL order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize)]
pub struct CreatePostArgs {
    pub img: String,
    pub title: String,
    pub desc: String,
    pub address: String,
}

impl CreatePostArgs {
    pub fn new(
        img: impl Into<String>,
        title: impl Into<String>,
        desc: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self { img: img.into(), title: title.into(), desc: desc.into(), address: address.into() }
    }

    /// All four fields must be non-empty. Reports the first empty one.
    pub fn validate(&self) -> FeedResult<()> {
        let fields = [
            ("image url", &self.img),
            ("title", &self.title),
            ("description", &self.desc),
            ("author address", &self.address),
        ];
        match fields.iter().find(|(_, v)| v.is_empty()) {
            Some((name, _)) => Err(FeedError::Validation(*name)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReceipt {
    pub signature: String,
    /// Address of the account that now holds the post.
    pub post_account: String,
}

#[derive(Debug, Clone)]
pub struct PostClient {
    pub program_id: Pubkey,
    pub idl: Idl,
}

impl PostClient {
    pub fn new(program_id: Pubkey, idl: Idl) -> Self {
        Self { program_id, idl }
    }

    /// Load the IDL named by `config` (or the embedded one) and resolve the
    /// program id, preferring the explicit override.
    pub fn from_config(config: &ClientConfig) -> FeedResult<Self> {
        let idl = match &config.idl_path {
            Some(path) => Idl::from_file(path)?,
            None => Idl::embedded()?,
        };
        let program_id = match config.program_id {
            Some(id) => id,
            None => idl.program_id()?,
        };
        Ok(Self::new(program_id, idl))
    }

    /// Build the `createPost` instruction.
    pub fn ix_create_post(
        &self,
        post_account: Pubkey,
        user: Pubkey,
        args: &CreatePostArgs,
    ) -> FeedResult<Instruction> {
        let ix_def = self
            .idl
            .instruction(CREATE_POST_IX)
            .ok_or_else(|| FeedError::Idl(format!("instruction {CREATE_POST_IX} not found")))?;

        let mut data = instruction_discriminator(&ix_def.name).to_vec();
        let payload = borsh::to_vec(args).map_err(|e| FeedError::Submission(format!("serialize: {e}")))?;
        data.extend_from_slice(&payload);

        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(post_account, true),
                AccountMeta::new(user, true),
                AccountMeta::new_readonly(solana_program::system_program::id(), false),
            ],
            data,
        })
    }

    /// Validate, sign and send one `createPost` transaction.
    ///
    /// Nothing touches the network when validation fails.
    pub async fn submit<R, W>(
        &self,
        rpc: &R,
        wallet: &W,
        user: Pubkey,
        post_account: &Keypair,
        args: &CreatePostArgs,
    ) -> FeedResult<PostReceipt>
    where
        R: ChainRpc,
        W: WalletProvider,
    {
        if let Err(e) = args.validate() {
            warn!("{e}");
            return Err(e);
        }

        let ix = self.ix_create_post(post_account.pubkey(), user, args)?;
        let blockhash = rpc.latest_blockhash().await?;

        let mut tx = Transaction::new_with_payer(&[ix], Some(&user));
        tx.try_partial_sign(&[post_account], blockhash)
            .map_err(|e| FeedError::Submission(format!("post account signature: {e}")))?;
        wallet.sign_transaction(&mut tx, blockhash)?;
        if !tx.is_signed() {
            return Err(FeedError::Submission("transaction is missing signatures".to_string()));
        }

        let signature = rpc.send_and_confirm(&tx).await?;
        let receipt = PostReceipt {
            signature: signature.to_string(),
            post_account: post_account.pubkey().to_string(),
        };
        info!(signature = %receipt.signature, account = %receipt.post_account, "post created");
        Ok(receipt)
    }
}
