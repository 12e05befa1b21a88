use crate::error::KeygenResult;
use crate::wallet::HdPath;
use serde::Deserialize;

/// Cosmos SDK HD derivation path (coin type 118).
pub const DEFAULT_HD_PATH: &str = "m/44'/118'/0'/0/0";
pub const DEFAULT_PREFIX: &str = "nimble";

/// Derivation settings for one run.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct KeygenConfig {
    /// HD derivation path, e.g. `m/44'/118'/0'/0/0`
    #[serde(default = "default_hd_path")]
    pub hd_path: String,
    /// bech32 human-readable prefix for the derived address
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_hd_path() -> String {
    DEFAULT_HD_PATH.to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self {
            hd_path: default_hd_path(),
            prefix: default_prefix(),
        }
    }
}

impl KeygenConfig {
    pub fn new(hd_path: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            hd_path: hd_path.into(),
            prefix: prefix.into(),
        }
    }

    pub fn parsed_path(&self) -> KeygenResult<HdPath> {
        self.hd_path.parse()
    }
}
