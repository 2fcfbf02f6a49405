//! Constants shared with the deployed program and the media host.
//!
//! The program-side names affect instruction and account discriminators, so
//! keep them in sync with the deployed IDL.

use solana_program::pubkey::Pubkey;

/// Default cluster (devnet).
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Commitment used for reads and for preflight.
pub const DEFAULT_COMMITMENT: &str = "processed";

/// Program id of the deployed `feed_post_app` program.
///
/// The embedded IDL carries the same address in `metadata.address`.
pub const DEFAULT_PROGRAM_ID: &str = "G9XpmsmxpKuiyizNLPpseG7bzEUL8a2PZYjH3v5z9UuZ";

pub fn default_program_id() -> Pubkey {
    DEFAULT_PROGRAM_ID.parse().unwrap_or_else(|_| Pubkey::default())
}

/// IDL name of the instruction that records a post.
pub const CREATE_POST_IX: &str = "createPost";

/// IDL name of the post account type.
pub const POST_ACCOUNT: &str = "FeedPostApp";

/// Argument order required by `createPost`.
pub const CREATE_POST_ARGS: [&str; 4] = ["imageUrl", "title", "description", "authorAddress"];

/// Account roles required by `createPost`, in order.
pub const CREATE_POST_ACCOUNTS: [&str; 3] = ["feedPostApp", "user", "systemProgram"];

/// Cloudinary API host.
pub const UPLOAD_HOST: &str = "https://api.cloudinary.com";

/// Default Cloudinary upload preset.
pub const DEFAULT_UPLOAD_PRESET: &str = "event_nft";

/// Default Cloudinary cloud name.
pub const DEFAULT_CLOUD_NAME: &str = "darrqmepw";

/// Header text shown before a wallet is connected.
pub const CONNECT_LABEL: &str = "Connect";

/// Head/tail lengths for the connect button.
pub const BUTTON_SHORTEN: (usize, usize) = (5, 3);

/// Head/tail lengths for the author line on post cards.
pub const CARD_SHORTEN: (usize, usize) = (6, 6);
