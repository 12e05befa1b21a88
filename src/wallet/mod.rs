pub mod address;
pub mod hd;
pub mod seed;
pub mod signer;

pub use address::{encode_account, AccountIdentity};
pub use hd::{derive_key, ExtendedKey, HdPath};
pub use seed::{derive_seed, Seed};
pub use signer::{sign, Signature};

use crate::error::{KeygenError, KeygenResult};
use cosmrs::crypto::secp256k1::SigningKey;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw 32-byte secp256k1 scalar at the end of an HD path walk.
///
/// The bytes are not range-checked on construction; consumers that turn
/// them into a curve key reject zero and values at or above the group order.
/// Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Reconstruct the cosmrs SigningKey from raw bytes.
    pub(crate) fn signing_key(&self) -> KeygenResult<SigningKey> {
        SigningKey::from_slice(&self.0)
            .map_err(|e| KeygenError::Signing(format!("invalid private key: {}", e)))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// RIPEMD160(SHA256(data)), the Cosmos SDK account hash of a compressed pubkey.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let digest = Ripemd160::digest(Sha256::digest(data));
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest);
    out
}
