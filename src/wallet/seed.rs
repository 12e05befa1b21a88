use crate::error::KeygenResult;
use bip39::{Language, Mnemonic};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 64-byte BIP-39 seed. Lives for one derivation and is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

/// Derive the BIP-39 seed of an English mnemonic with an empty passphrase.
///
/// The phrase is NFKD-normalized and its words and checksum are validated
/// before any PBKDF2 work is done, so a mistyped mnemonic fails with
/// `InvalidMnemonic` instead of yielding a different wallet.
pub fn derive_seed(mnemonic: &str) -> KeygenResult<Seed> {
    let parsed = Mnemonic::parse_in(Language::English, mnemonic)?;
    Ok(Seed(parsed.to_seed("")))
}
