//! Feed loader behaviour against an in-memory cluster.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use blogfeed_client::constants::default_program_id;
use blogfeed_client::errors::FeedResult;
use blogfeed_client::feed::load_feed;
use blogfeed_client::{ChainRpc, ClientConfig, FeedError, FeedSession};
use solana_program::hash::Hash;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use tokio::sync::Notify;

use common::{image, session, FakeChain, FakeMedia, FakeWallet};

#[tokio::test]
async fn zero_accounts_is_an_empty_feed() {
    let chain = FakeChain::new();
    let posts = load_feed(Arc::clone(&chain), default_program_id()).await.unwrap();
    assert!(posts.is_empty());

    let s = session(&chain, FakeWallet::accepting(), FakeMedia::default());
    assert_eq!(s.load_feed().await.unwrap(), 0);
    assert!(s.posts().is_empty());
}

#[tokio::test]
async fn keeps_node_order_and_attaches_account_address() {
    let chain = FakeChain::new();
    let keys: Vec<_> = ["one", "two", "three", "four", "five"]
        .iter()
        .map(|t| chain.seed(t))
        .collect();

    let posts = load_feed(Arc::clone(&chain), default_program_id()).await.unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["one", "two", "three", "four", "five"]);
    let got: Vec<_> = posts.iter().map(|p| p.pubkey).collect();
    assert_eq!(got, keys);
    assert_eq!(posts[1].desc, "about two");
}

#[tokio::test]
async fn one_bad_account_fails_the_batch_and_keeps_the_old_feed() {
    let chain = FakeChain::new();
    chain.seed("kept-1");
    chain.seed("kept-2");

    let s = session(&chain, FakeWallet::accepting(), FakeMedia::default());
    assert_eq!(s.load_feed().await.unwrap(), 2);

    chain.seed("new-ok");
    let bad = chain.seed("new-bad");
    chain.break_account(bad);

    let err = s.load_feed().await.unwrap_err();
    assert!(matches!(err, FeedError::Decode { .. }));

    let titles: Vec<String> = s.posts().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, ["kept-1", "kept-2"]);
}

#[tokio::test]
async fn listing_failure_keeps_the_old_feed() {
    let chain = FakeChain::new();
    chain.seed("only");
    let s = session(&chain, FakeWallet::accepting(), FakeMedia::default());
    s.load_feed().await.unwrap();

    *chain.fail_listing.lock().unwrap() = true;
    assert!(matches!(s.load_feed().await, Err(FeedError::FeedLoad(_))));
    assert_eq!(s.posts().len(), 1);
}

/// Cluster whose first account listing is taken immediately but only handed
/// back once `release` fires.
struct SlowFirstListing {
    inner: Arc<FakeChain>,
    release: Arc<Notify>,
    stalled: AtomicBool,
}

impl ChainRpc for SlowFirstListing {
    async fn latest_blockhash(&self) -> FeedResult<Hash> {
        self.inner.latest_blockhash().await
    }

    async fn send_and_confirm(&self, tx: &Transaction) -> FeedResult<Signature> {
        self.inner.send_and_confirm(tx).await
    }

    async fn program_accounts(&self, program_id: &Pubkey) -> FeedResult<Vec<Pubkey>> {
        let keys = self.inner.program_accounts(program_id).await?;
        if !self.stalled.swap(true, Ordering::SeqCst) {
            self.release.notified().await;
        }
        Ok(keys)
    }

    async fn account_data(&self, key: &Pubkey) -> FeedResult<Vec<u8>> {
        self.inner.account_data(key).await
    }

    async fn health(&self) -> FeedResult<String> {
        self.inner.health().await
    }
}

#[tokio::test]
async fn slow_older_scan_does_not_replace_newer_feed() {
    let chain = FakeChain::new();
    chain.seed("old");
    let release = Arc::new(Notify::new());
    let rpc = Arc::new(SlowFirstListing {
        inner: Arc::clone(&chain),
        release: Arc::clone(&release),
        stalled: AtomicBool::new(false),
    });
    let s = FeedSession::new(ClientConfig::default(), rpc, FakeWallet::accepting(), FakeMedia::default())
        .unwrap();
    s.connect().await.unwrap();

    let (slow, posted) = tokio::join!(s.load_feed(), async {
        let receipt = s.create_post(image(), "new", "fresh").await;
        release.notify_one();
        receipt
    });

    assert_eq!(slow.unwrap(), 1);
    posted.unwrap();
    let titles: Vec<String> = s.posts().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, ["old", "new"]);
}
