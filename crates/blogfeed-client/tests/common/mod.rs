//! In-memory stand-ins for the cluster, the wallet and the media host.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use blogfeed_client::errors::{FeedError, FeedResult};
use blogfeed_client::post::{PostAccountData, PostRecord};
use blogfeed_client::{ChainRpc, ClientConfig, FeedSession, ImageFile, MediaHost, WalletProvider};
use borsh::BorshDeserialize;
use solana_program::hash::Hash;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;

/// Accounts owned by the program, in listing order.
#[derive(Default)]
pub struct FakeChain {
    pub accounts: Mutex<Vec<(Pubkey, Vec<u8>)>>,
    pub broken: Mutex<HashSet<Pubkey>>,
    pub fail_listing: Mutex<bool>,
    pub fail_send: Mutex<bool>,
    pub sends: AtomicUsize,
    pub calls: AtomicUsize,
}

impl FakeChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, title: &str) -> Pubkey {
        let key = Pubkey::new_unique();
        let body = PostAccountData {
            img: format!("https://res.cloudinary.com/demo/{title}.png"),
            title: title.to_string(),
            desc: format!("about {title}"),
            address: Pubkey::new_unique().to_string(),
        };
        let data = PostRecord::encode_account(&body).unwrap();
        self.accounts.lock().unwrap().push((key, data));
        key
    }

    pub fn break_account(&self, key: Pubkey) {
        self.broken.lock().unwrap().insert(key);
    }

    pub fn network_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

impl ChainRpc for FakeChain {
    async fn latest_blockhash(&self) -> FeedResult<Hash> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Hash::new_unique())
    }

    async fn send_and_confirm(&self, tx: &Transaction) -> FeedResult<Signature> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sends.fetch_add(1, Ordering::SeqCst);
        if *self.fail_send.lock().unwrap() {
            return Err(FeedError::Submission("custom program error: 0x0".to_string()));
        }
        tx.verify().map_err(|e| FeedError::Submission(e.to_string()))?;

        // Play the program: the first account of the instruction becomes the post.
        let ix = &tx.message.instructions[0];
        let post_key = tx.message.account_keys[ix.accounts[0] as usize];
        let body = PostAccountData::try_from_slice(&ix.data[8..])
            .map_err(|e| FeedError::Submission(e.to_string()))?;
        let data = PostRecord::encode_account(&body)?;

        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|(k, _)| *k == post_key) {
            Some(slot) => slot.1 = data,
            None => accounts.push((post_key, data)),
        }
        Ok(tx.signatures[0])
    }

    async fn program_accounts(&self, _program_id: &Pubkey) -> FeedResult<Vec<Pubkey>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_listing.lock().unwrap() {
            return Err(FeedError::FeedLoad("node unavailable".to_string()));
        }
        Ok(self.accounts.lock().unwrap().iter().map(|(k, _)| *k).collect())
    }

    async fn account_data(&self, key: &Pubkey) -> FeedResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken.lock().unwrap().contains(key) {
            return Ok(vec![0u8; 3]);
        }
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, d)| d.clone())
            .ok_or_else(|| FeedError::Decode { account: key.to_string(), reason: "not found".into() })
    }

    async fn health(&self) -> FeedResult<String> {
        Ok("fake".to_string())
    }
}

pub struct FakeWallet {
    pub present: bool,
    pub accept: bool,
    pub keypair: Keypair,
}

impl FakeWallet {
    pub fn accepting() -> Self {
        Self { present: true, accept: true, keypair: Keypair::new() }
    }

    pub fn absent() -> Self {
        Self { present: false, accept: false, keypair: Keypair::new() }
    }

    pub fn rejecting() -> Self {
        Self { present: true, accept: false, keypair: Keypair::new() }
    }
}

impl WalletProvider for FakeWallet {
    fn is_available(&self) -> bool {
        self.present
    }

    async fn connect(&self) -> FeedResult<Pubkey> {
        if self.accept {
            Ok(self.keypair.pubkey())
        } else {
            Err(FeedError::WalletRejected("User rejected the request.".to_string()))
        }
    }

    fn sign_transaction(&self, tx: &mut Transaction, blockhash: Hash) -> FeedResult<()> {
        tx.try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| FeedError::Submission(e.to_string()))
    }
}

#[derive(Default)]
pub struct FakeMedia {
    pub uploads: AtomicUsize,
    pub fail: bool,
}

impl MediaHost for FakeMedia {
    async fn upload(&self, file: ImageFile) -> FeedResult<String> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FeedError::Upload("http error: 500 Internal Server Error".to_string()));
        }
        Ok(format!("https://res.cloudinary.com/demo/image/upload/{}", file.file_name))
    }
}

pub fn session(
    chain: &Arc<FakeChain>,
    wallet: FakeWallet,
    media: FakeMedia,
) -> FeedSession<FakeChain, FakeWallet, FakeMedia> {
    FeedSession::new(ClientConfig::default(), Arc::clone(chain), wallet, media).unwrap()
}

pub fn image() -> ImageFile {
    ImageFile::new("sunset.png", vec![0x89, b'P', b'N', b'G'])
}
