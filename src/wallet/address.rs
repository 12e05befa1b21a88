use super::{hash160, PrivateKey};
use crate::error::{KeygenError, KeygenResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bech32::{ToBase32, Variant};

/// Longest human-readable part BIP-173 allows.
const MAX_PREFIX_LEN: usize = 83;

/// Account derived from a private key under the Cosmos SDK convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    /// bech32 address, e.g. `cosmos1...`
    pub address: String,
    /// Compressed secp256k1 public key (33 bytes).
    pub pubkey: Vec<u8>,
    /// RIPEMD160(SHA256(pubkey)), the bech32 payload.
    pub key_hash: [u8; 20],
}

impl AccountIdentity {
    pub fn pubkey_base64(&self) -> String {
        BASE64.encode(&self.pubkey)
    }
}

/// Derive the bech32 account address and compressed public key of `key`.
pub fn encode_account(key: &PrivateKey, prefix: &str) -> KeygenResult<AccountIdentity> {
    let prefix = normalize_prefix(prefix)?;
    let pubkey = key.signing_key()?.public_key().to_bytes();
    let key_hash = hash160(&pubkey);

    let address = bech32::encode(&prefix, key_hash.to_base32(), Variant::Bech32)
        .map_err(|e| KeygenError::invalid_prefix(format!("`{}`: {}", prefix, e)))?;

    Ok(AccountIdentity {
        address,
        pubkey,
        key_hash,
    })
}

/// Apply the BIP-173 rules for a human-readable part and lowercase it.
fn normalize_prefix(prefix: &str) -> KeygenResult<String> {
    if prefix.is_empty() {
        return Err(KeygenError::invalid_prefix("prefix is empty"));
    }
    if prefix.len() > MAX_PREFIX_LEN {
        return Err(KeygenError::invalid_prefix(format!(
            "prefix is longer than {} characters",
            MAX_PREFIX_LEN
        )));
    }
    if let Some(c) = prefix.chars().find(|c| !matches!(*c as u32, 33..=126)) {
        return Err(KeygenError::invalid_prefix(format!(
            "`{}` contains invalid character {:?}",
            prefix, c
        )));
    }

    let has_lower = prefix.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = prefix.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(KeygenError::invalid_prefix(format!(
            "`{}` mixes upper and lower case",
            prefix
        )));
    }

    Ok(prefix.to_ascii_lowercase())
}
