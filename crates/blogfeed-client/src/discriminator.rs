//! Anchor discriminators.
//!
//! Anchor prefixes instruction data with `sha256("global:<snake_name>")[..8]`
//! and account data with `sha256("account:<TypeName>")[..8]`.

use sha2::{Digest, Sha256};

pub fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{namespace}:{name}");
    let digest = Sha256::digest(preimage.as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

/// Discriminator of an instruction given its IDL (camelCase) name.
pub fn instruction_discriminator(idl_name: &str) -> [u8; 8] {
    sighash("global", &to_snake_case(idl_name))
}

/// Discriminator of an account type given its IDL (PascalCase) name.
pub fn account_discriminator(type_name: &str) -> [u8; 8] {
    sighash("account", type_name)
}

pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
