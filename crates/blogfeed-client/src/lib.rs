//! blogfeed-client
//!
//! Off-chain client for the `feed_post_app` blog program.
//!
//! It includes:
//! - constants and session configuration (cluster, commitment, program id)
//! - interface description (IDL) loading and validation
//! - the post account codec and Anchor discriminators
//! - a wallet connector, a media upload adapter, a post submission adapter
//!   and a feed loader
//! - `FeedSession`, which wires those together the way a front-end uses them
//!
//! The on-chain program is not part of this crate. Its account layout is
//! mirrored here only to decode posts.

pub mod config;
pub mod constants;
pub mod discriminator;
pub mod errors;
pub mod feed;
pub mod format;
pub mod idl;
pub mod post;
pub mod post_client;
pub mod rpc;
pub mod session;
pub mod upload;
pub mod wallet;

pub use crate::config::ClientConfig;
pub use crate::errors::{FeedError, FeedResult};
pub use crate::format::shorten_address;
pub use crate::idl::Idl;
pub use crate::post::PostRecord;
pub use crate::post_client::{CreatePostArgs, PostClient, PostReceipt};
pub use crate::rpc::ChainRpc;
pub use crate::session::FeedSession;
pub use crate::upload::{CloudinaryUploader, ImageFile, MediaHost};
pub use crate::wallet::{KeypairWallet, WalletProvider};
