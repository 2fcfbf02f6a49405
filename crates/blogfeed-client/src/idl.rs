//! Interface description (Anchor IDL) for the blog program.
//!
//! The document is loaded once per session. Loading validates that the
//! `createPost` instruction takes its arguments and accounts in the order the
//! submission adapter encodes them, so a drifted IDL fails at startup instead
//! of producing a transaction the program rejects.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::constants::{CREATE_POST_ACCOUNTS, CREATE_POST_ARGS, CREATE_POST_IX, POST_ACCOUNT};
use crate::errors::{FeedError, FeedResult};

/// IDL shipped with the crate.
pub const EMBEDDED_IDL: &str = include_str!("../idl/feed_post_app.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idl {
    pub version: String,
    pub name: String,
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub accounts: Vec<IdlTypeDef>,
    #[serde(default)]
    pub metadata: Option<IdlMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    pub accounts: Vec<IdlAccountItem>,
    pub args: Vec<IdlField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlAccountItem {
    pub name: String,
    pub is_mut: bool,
    pub is_signer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlTypeDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IdlTypeDefTy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlTypeDefTy {
    pub kind: String,
    #[serde(default)]
    pub fields: Vec<IdlField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlMetadata {
    pub address: String,
}

impl Idl {
    pub fn embedded() -> FeedResult<Self> {
        Self::from_json(EMBEDDED_IDL)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> FeedResult<Self> {
        let raw = fs::read_to_string(path.as_ref()).map_err(|e| {
            FeedError::Idl(format!("cannot read {}: {e}", path.as_ref().display()))
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate an IDL document.
    pub fn from_json(raw: &str) -> FeedResult<Self> {
        let idl: Idl =
            serde_json::from_str(raw).map_err(|e| FeedError::Idl(format!("invalid json: {e}")))?;
        idl.validate()?;
        Ok(idl)
    }

    pub fn instruction(&self, name: &str) -> Option<&IdlInstruction> {
        self.instructions.iter().find(|ix| ix.name == name)
    }

    pub fn account_type(&self, name: &str) -> Option<&IdlTypeDef> {
        self.accounts.iter().find(|a| a.name == name)
    }

    /// Program address from `metadata.address`.
    pub fn program_id(&self) -> FeedResult<Pubkey> {
        let meta = self
            .metadata
            .as_ref()
            .ok_or_else(|| FeedError::Idl("metadata.address is missing".to_string()))?;
        meta.address
            .parse()
            .map_err(|_| FeedError::Idl(format!("invalid program address: {}", meta.address)))
    }

    fn validate(&self) -> FeedResult<()> {
        let ix = self
            .instruction(CREATE_POST_IX)
            .ok_or_else(|| FeedError::Idl(format!("instruction {CREATE_POST_IX} not found")))?;

        let args: Vec<&str> = ix.args.iter().map(|a| a.name.as_str()).collect();
        if args != CREATE_POST_ARGS {
            return Err(FeedError::Idl(format!(
                "{CREATE_POST_IX} args must be {CREATE_POST_ARGS:?}, found {args:?}"
            )));
        }
        if let Some(bad) = ix.args.iter().find(|a| a.ty != serde_json::json!("string")) {
            return Err(FeedError::Idl(format!("arg {} must be a string", bad.name)));
        }

        let accounts: Vec<&str> = ix.accounts.iter().map(|a| a.name.as_str()).collect();
        if accounts != CREATE_POST_ACCOUNTS {
            return Err(FeedError::Idl(format!(
                "{CREATE_POST_IX} accounts must be {CREATE_POST_ACCOUNTS:?}, found {accounts:?}"
            )));
        }
        let roles_ok = ix.accounts[0].is_mut
            && ix.accounts[0].is_signer
            && ix.accounts[1].is_mut
            && ix.accounts[1].is_signer
            && !ix.accounts[2].is_mut
            && !ix.accounts[2].is_signer;
        if !roles_ok {
            return Err(FeedError::Idl(format!("{CREATE_POST_IX} account roles do not match")));
        }

        if self.account_type(POST_ACCOUNT).is_none() {
            return Err(FeedError::Idl(format!("account type {POST_ACCOUNT} not found")));
        }
        Ok(())
    }
}
