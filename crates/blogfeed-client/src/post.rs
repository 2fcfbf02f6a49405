//! Post record and the `FeedPostApp` account codec.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::constants::POST_ACCOUNT;
use crate::discriminator::account_discriminator;
use crate::errors::{FeedError, FeedResult};

/// Account data after the discriminator, in on-chain field order.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PostAccountData {
    pub img: String,
    pub title: String,
    pub desc: String,
    pub address: String,
}

/// A post as shown in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub img: String,
    pub title: String,
    pub desc: String,
    pub address: String,
    /// Address of the account holding the post.
    #[serde(with = "pubkey_string")]
    pub pubkey: Pubkey,
}

impl PostRecord {
    /// Decode raw account data. Trailing bytes are ignored because accounts
    /// are allocated with spare space.
    pub fn decode(pubkey: Pubkey, data: &[u8]) -> FeedResult<Self> {
        let decode_err = |reason: String| FeedError::Decode { account: pubkey.to_string(), reason };

        if data.len() < 8 {
            return Err(decode_err(format!("account data too short ({} bytes)", data.len())));
        }
        if data[..8] != account_discriminator(POST_ACCOUNT) {
            return Err(decode_err("not a post account".to_string()));
        }

        let mut rest = &data[8..];
        let body = PostAccountData::deserialize(&mut rest).map_err(|e| decode_err(e.to_string()))?;

        Ok(Self {
            img: body.img,
            title: body.title,
            desc: body.desc,
            address: body.address,
            pubkey,
        })
    }

    /// Encode as account data (discriminator plus body). Used by fakes and
    /// by tooling that seeds local validators.
    pub fn encode_account(body: &PostAccountData) -> FeedResult<Vec<u8>> {
        let mut out = account_discriminator(POST_ACCOUNT).to_vec();
        let payload = borsh::to_vec(body).map_err(|e| FeedError::Decode {
            account: "<new>".to_string(),
            reason: e.to_string(),
        })?;
        out.extend_from_slice(&payload);
        Ok(out)
    }
}

mod pubkey_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use solana_program::pubkey::Pubkey;

    pub fn serialize<S: Serializer>(key: &Pubkey, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&key.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Pubkey, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> PostAccountData {
        PostAccountData {
            img: "https://res.cloudinary.com/x/image/upload/a.png".into(),
            title: "hello".into(),
            desc: "first post".into(),
            address: "Ak7xQmJ9pVd3eR2tLwYz8bNcF5gH6jK4sUuA1oPq9f9f".into(),
        }
    }

    #[test]
    fn decodes_with_spare_space() {
        let key = Pubkey::new_unique();
        let mut data = PostRecord::encode_account(&body()).unwrap();
        data.extend_from_slice(&[0u8; 64]);

        let post = PostRecord::decode(key, &data).unwrap();
        assert_eq!(post.title, "hello");
        assert_eq!(post.desc, "first post");
        assert_eq!(post.pubkey, key);
    }

    #[test]
    fn layout_is_length_prefixed_strings() {
        let data = PostRecord::encode_account(&body()).unwrap();
        let img_len = u32::from_le_bytes(data[8..12].try_into().unwrap()) as usize;
        assert_eq!(img_len, body().img.len());
        assert_eq!(&data[12..12 + img_len], body().img.as_bytes());
    }

    #[test]
    fn wrong_discriminator_is_rejected() {
        let mut data = PostRecord::encode_account(&body()).unwrap();
        data[0] ^= 0xff;
        let err = PostRecord::decode(Pubkey::new_unique(), &data).unwrap_err();
        assert!(matches!(err, FeedError::Decode { .. }));
    }

    #[test]
    fn truncated_data_is_rejected() {
        let data = PostRecord::encode_account(&body()).unwrap();
        assert!(PostRecord::decode(Pubkey::new_unique(), &data[..4]).is_err());
        assert!(PostRecord::decode(Pubkey::new_unique(), &data[..20]).is_err());
    }

    #[test]
    fn serializes_pubkey_as_base58() {
        let key = Pubkey::new_unique();
        let post = PostRecord::decode(key, &PostRecord::encode_account(&body()).unwrap()).unwrap();
        let v = serde_json::to_value(&post).unwrap();
        assert_eq!(v["pubkey"], key.to_string());
    }
}
