use crate::config::{KeygenConfig, DEFAULT_HD_PATH, DEFAULT_PREFIX};
use crate::error::{KeygenError, KeygenResult};
use crate::pipeline::KeyInfo;
use clap::{Parser, ValueEnum};
use zeroize::Zeroizing;

const EXAMPLE: &str = "Example:
  nimble-keygen \\
    --mnemonic \"involve cool habit wish ...\" \\
    --solana \"6hKV...\" \\
    --path \"m/44'/118'/0'/0/0\" \\
    --prefix nimble";

#[derive(Parser, Debug)]
#[command(name = "nimble-keygen", version)]
#[command(about = "Derive a Cosmos account from a BIP-39 mnemonic and sign a Solana address with it")]
#[command(after_help = EXAMPLE)]
pub struct Cli {
    /// (required) BIP-39 mnemonic phrase
    #[arg(long)]
    pub mnemonic: Option<String>,

    /// (required) Solana address to bind
    #[arg(long)]
    pub solana: Option<String>,

    /// HD derivation path
    #[arg(long, default_value = DEFAULT_HD_PATH)]
    pub path: String,

    /// bech32 address prefix
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validated inputs for one run.
pub struct KeygenRequest {
    pub mnemonic: Zeroizing<String>,
    pub external_identifier: String,
    pub config: KeygenConfig,
    pub output: OutputFormat,
}

impl Cli {
    /// Check that both required inputs are present and non-empty.
    pub fn into_request(self) -> KeygenResult<KeygenRequest> {
        let mnemonic = self.mnemonic.filter(|m| !m.trim().is_empty());
        let solana = self.solana.filter(|s| !s.is_empty());

        match (mnemonic, solana) {
            (Some(mnemonic), Some(external_identifier)) => Ok(KeygenRequest {
                mnemonic: Zeroizing::new(mnemonic),
                external_identifier,
                config: KeygenConfig::new(self.path, self.prefix),
                output: self.output,
            }),
            _ => Err(KeygenError::InvalidArguments(
                "--mnemonic and --solana are required arguments".to_string(),
            )),
        }
    }
}

/// Render a result in the requested format.
pub fn render(info: &KeyInfo, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(info.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(info),
    }
}
