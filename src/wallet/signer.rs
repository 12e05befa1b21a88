use super::PrivateKey;
use crate::error::{KeygenError, KeygenResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Compact (r || s) secp256k1 ECDSA signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; 64]);

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }
}

/// Sign SHA-256(`message`) with `key`.
///
/// The nonce comes from RFC 6979 and `s` is normalized to the low half of the
/// curve order, so equal inputs always give equal signatures. A zero key or
/// one at or above the curve order fails with `SigningError`.
pub fn sign(key: &PrivateKey, message: &[u8]) -> KeygenResult<Signature> {
    let signing_key = key.signing_key()?;
    let signature = signing_key
        .sign(message)
        .map_err(|e| KeygenError::Signing(format!("signing failed: {}", e)))?;

    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&signature.to_bytes());
    Ok(Signature(bytes))
}
