//! Error types for blogfeed-client.
//!
//! Every failure a front-end can observe maps to one variant. None of them is
//! retried by this crate; callers surface the message and let the user act.

use std::time::Duration;

use thiserror::Error;

pub type FeedResult<T> = Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    /// No wallet provider is present in the environment.
    #[error("no wallet available: {0}")]
    WalletUnavailable(String),

    /// The provider refused the connection or failed while connecting.
    #[error("wallet connection rejected: {0}")]
    WalletRejected(String),

    #[error("wallet did not answer within {0:?}")]
    WalletTimeout(Duration),

    /// An operation needs a connected wallet.
    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("image upload failed: {0}")]
    Upload(String),

    /// Incomplete form; raised before any network call.
    #[error("enter all data: {0} is empty")]
    Validation(&'static str),

    #[error("post submission failed: {0}")]
    Submission(String),

    #[error("a post submission is already in progress")]
    SubmitInProgress,

    #[error("feed load failed: {0}")]
    FeedLoad(String),

    #[error("cannot decode post account {account}: {reason}")]
    Decode { account: String, reason: String },

    #[error("invalid interface description: {0}")]
    Idl(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FeedError {
    /// Whether the error should be shown to the user as an alert rather than
    /// only logged.
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::WalletUnavailable(_))
    }
}
