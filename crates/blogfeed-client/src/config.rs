//! Session configuration.
//!
//! This crate does not read environment variables. The front-end builds a
//! `ClientConfig` from its own flags and passes it into `FeedSession`, so two
//! sessions in one process never share state.

use std::path::PathBuf;
use std::time::Duration;

use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;

use crate::constants::{
    DEFAULT_CLOUD_NAME, DEFAULT_COMMITMENT, DEFAULT_RPC_URL, DEFAULT_UPLOAD_PRESET, UPLOAD_HOST,
};
use crate::errors::{FeedError, FeedResult};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    /// Overrides the program id carried by the IDL.
    pub program_id: Option<Pubkey>,
    /// External IDL file. The embedded document is used when unset.
    pub idl_path: Option<PathBuf>,
    pub upload: UploadConfig,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: CommitmentConfig::processed(),
            program_id: None,
            idl_path: None,
            upload: UploadConfig::default(),
            connect_timeout: Duration::from_secs(60),
        }
    }
}

impl ClientConfig {
    /// Parse a commitment name (`processed`, `confirmed`, `finalized`).
    pub fn parse_commitment(name: &str) -> FeedResult<CommitmentConfig> {
        match name.trim() {
            "" => Self::parse_commitment(DEFAULT_COMMITMENT),
            "processed" => Ok(CommitmentConfig::processed()),
            "confirmed" => Ok(CommitmentConfig::confirmed()),
            "finalized" => Ok(CommitmentConfig::finalized()),
            other => Err(FeedError::Config(format!("unknown commitment level: {other}"))),
        }
    }

    pub fn validate(&self) -> FeedResult<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(FeedError::Config("rpc url must not be empty".to_string()));
        }
        if self.connect_timeout.is_zero() {
            return Err(FeedError::Config("connect timeout must be positive".to_string()));
        }
        self.upload.validate()
    }
}

/// Media host parameters.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub host: String,
    pub cloud_name: String,
    pub upload_preset: String,
    pub timeout: Duration,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            host: UPLOAD_HOST.to_string(),
            cloud_name: DEFAULT_CLOUD_NAME.to_string(),
            upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl UploadConfig {
    /// `POST` target for image uploads.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.host.trim_end_matches('/'),
            self.cloud_name
        )
    }

    pub fn validate(&self) -> FeedResult<()> {
        if self.cloud_name.trim().is_empty() || self.upload_preset.trim().is_empty() {
            return Err(FeedError::Config(
                "cloud name and upload preset must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
