//! A client session: one wallet, one RPC connection, one media host, and the
//! feed currently on display.
//!
//! Everything a front-end needs is reached through `FeedSession`. Failures
//! are logged here and returned; the displayed feed is only ever replaced as
//! a whole after a successful load.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::errors::{FeedError, FeedResult};
use crate::feed;
use crate::format::connect_label;
use crate::post::PostRecord;
use crate::post_client::{CreatePostArgs, PostClient, PostReceipt};
use crate::rpc::ChainRpc;
use crate::upload::{ImageFile, MediaHost};
use crate::wallet::{connect_wallet, WalletProvider};

/// Outcome of the connect-then-load sequence.
#[derive(Debug)]
pub struct LoadReport {
    pub connect: FeedResult<Pubkey>,
    pub feed: FeedResult<usize>,
}

/// The feed on display and the scan that produced it.
#[derive(Debug, Default)]
struct DisplayedFeed {
    scan: u64,
    posts: Vec<PostRecord>,
}

pub struct FeedSession<R, W, M> {
    config: ClientConfig,
    rpc: Arc<R>,
    wallet: W,
    media: M,
    client: PostClient,
    address: RwLock<Option<Pubkey>>,
    posts: RwLock<DisplayedFeed>,
    next_scan: AtomicU64,
    submit_gate: Mutex<()>,
}

impl<R, W, M> FeedSession<R, W, M>
where
    R: ChainRpc,
    W: WalletProvider,
    M: MediaHost,
{
    pub fn new(config: ClientConfig, rpc: Arc<R>, wallet: W, media: M) -> FeedResult<Self> {
        config.validate()?;
        let client = PostClient::from_config(&config)?;
        Ok(Self {
            config,
            rpc,
            wallet,
            media,
            client,
            address: RwLock::new(None),
            posts: RwLock::new(DisplayedFeed::default()),
            next_scan: AtomicU64::new(1),
            submit_gate: Mutex::new(()),
        })
    }

    pub fn program_id(&self) -> Pubkey {
        self.client.program_id
    }

    pub fn address(&self) -> Option<Pubkey> {
        *self.address.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Text of the header button.
    pub fn connect_label(&self) -> String {
        connect_label(self.address().map(|a| a.to_string()).as_deref())
    }

    /// Snapshot of the displayed feed.
    pub fn posts(&self) -> Vec<PostRecord> {
        self.posts.read().unwrap_or_else(|e| e.into_inner()).posts.clone()
    }

    /// Connect the wallet and remember its address.
    pub async fn connect(&self) -> FeedResult<Pubkey> {
        let pubkey = connect_wallet(&self.wallet, self.config.connect_timeout).await?;
        *self.address.write().unwrap_or_else(|e| e.into_inner()) = Some(pubkey);
        Ok(pubkey)
    }

    /// Re-scan the program's accounts and replace the displayed feed.
    ///
    /// On failure the previous feed stays in place. A scan that finishes
    /// after a later-started scan has already been displayed is dropped.
    pub async fn load_feed(&self) -> FeedResult<usize> {
        let scan = self.next_scan.fetch_add(1, Ordering::SeqCst);
        match feed::load_feed(Arc::clone(&self.rpc), self.client.program_id).await {
            Ok(posts) => {
                let count = posts.len();
                {
                    let mut shown = self.posts.write().unwrap_or_else(|e| e.into_inner());
                    if scan > shown.scan {
                        *shown = DisplayedFeed { scan, posts };
                        info!(count, "feed loaded");
                    } else {
                        debug!(scan, newer = shown.scan, "discarding stale feed scan");
                    }
                }
                Ok(count)
            }
            Err(e) => {
                error!("{e}");
                Err(e)
            }
        }
    }

    /// Connect, then load the feed whether or not the connection succeeded.
    pub async fn on_load(&self) -> LoadReport {
        let connect = self.connect().await;
        let feed = self.load_feed().await;
        LoadReport { connect, feed }
    }

    /// Submit a post whose image is already hosted at `img`.
    pub async fn submit_post(&self, img: &str, title: &str, desc: &str) -> FeedResult<PostReceipt> {
        let _gate = self.submit_gate.try_lock().map_err(|_| FeedError::SubmitInProgress)?;
        self.submit_locked(img, title, desc).await
    }

    /// Upload `file`, submit the post, then reload the feed.
    ///
    /// Title, description and wallet are checked before the upload so an
    /// incomplete form never reaches the network.
    pub async fn create_post(&self, file: ImageFile, title: &str, desc: &str) -> FeedResult<PostReceipt> {
        let _gate = self.submit_gate.try_lock().map_err(|_| FeedError::SubmitInProgress)?;

        let precheck = CreatePostArgs::new(
            file.file_name.clone(),
            title,
            desc,
            self.author_address(),
        );
        let precheck = if file.is_empty() {
            Err(FeedError::Validation("image"))
        } else {
            precheck.validate()
        };
        if let Err(e) = precheck {
            warn!("{e}");
            return Err(e);
        }

        let img = self.media.upload(file).await.map_err(|e| {
            error!("{e}");
            e
        })?;
        self.submit_locked(&img, title, desc).await
    }

    /// Upload an image on its own.
    pub async fn upload_image(&self, file: ImageFile) -> FeedResult<String> {
        self.media.upload(file).await.map_err(|e| {
            error!("{e}");
            e
        })
    }

    fn author_address(&self) -> String {
        self.address().map(|a| a.to_string()).unwrap_or_default()
    }

    async fn submit_locked(&self, img: &str, title: &str, desc: &str) -> FeedResult<PostReceipt> {
        let args = CreatePostArgs::new(img, title, desc, self.author_address());
        if let Err(e) = args.validate() {
            warn!("{e}");
            return Err(e);
        }
        let user = self.address().ok_or(FeedError::WalletNotConnected)?;

        // A fresh account per post; reusing one would overwrite earlier posts.
        let post_account = Keypair::new();
        let receipt = self
            .client
            .submit(&*self.rpc, &self.wallet, user, &post_account, &args)
            .await
            .map_err(|e| {
                error!("{e}");
                e
            })?;

        // The post is on chain; a failed reload only leaves the old list up.
        let _ = self.load_feed().await;
        Ok(receipt)
    }
}
