use crate::config::KeygenConfig;
use crate::error::KeygenResult;
use crate::wallet::{derive_key, derive_seed, encode_account, sign, HdPath};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// Public result of one run: the account and its signature over the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInfo {
    pub address: String,
    /// Compressed public key, base64
    pub pubkey: String,
    pub message: String,
    /// Compact signature, base64
    pub signature: String,
}

impl fmt::Display for KeyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== Cosmos Key Info ==========")?;
        writeln!(f, "Address:              {}", self.address)?;
        writeln!(f, "Public Key (Base64):  {}", self.pubkey)?;
        writeln!(f, "Signed Message:       {}", self.message)?;
        writeln!(f, "Signature (Base64):   {}", self.signature)?;
        write!(f, "=====================================")
    }
}

/// Derive the account at `hd_path` from `mnemonic` and sign `external_identifier` with it.
///
/// The key is derived once and the same key produces both the address and
/// the signature. The first failing step aborts the run.
#[instrument(skip(mnemonic, external_identifier))]
pub fn run_pipeline(
    mnemonic: &str,
    external_identifier: &str,
    hd_path: &str,
    prefix: &str,
) -> KeygenResult<KeyInfo> {
    let path: HdPath = hd_path.parse()?;
    let seed = derive_seed(mnemonic)?;
    let private_key = derive_key(&seed, &path)?;
    drop(seed);

    let account = encode_account(&private_key, prefix)?;
    debug!(address = %account.address, "derived account");

    let signature = sign(&private_key, external_identifier.as_bytes())?;
    debug!(message_len = external_identifier.len(), "signed external identifier");

    Ok(KeyInfo {
        pubkey: account.pubkey_base64(),
        address: account.address,
        message: external_identifier.to_string(),
        signature: signature.to_base64(),
    })
}

/// [`run_pipeline`] with path and prefix taken from `config`.
pub fn run_with_config(
    mnemonic: &str,
    external_identifier: &str,
    config: &KeygenConfig,
) -> KeygenResult<KeyInfo> {
    run_pipeline(mnemonic, external_identifier, &config.hd_path, &config.prefix)
}
