use thiserror::Error;

/// Failures of a single key-binding run.
///
/// Messages never carry the mnemonic, seed or private key bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeygenError {
    #[error("{0}")]
    InvalidArguments(String),

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Invalid HD path: {0}")]
    InvalidPath(String),

    #[error("Key derivation failed: {0}")]
    InvalidDerivation(String),

    #[error("Invalid address prefix: {0}")]
    InvalidPrefix(String),

    #[error("Signing failed: {0}")]
    Signing(String),
}

impl KeygenError {
    pub fn invalid_path<S: Into<String>>(msg: S) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_prefix<S: Into<String>>(msg: S) -> Self {
        Self::InvalidPrefix(msg.into())
    }

    pub fn derivation<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDerivation(msg.into())
    }

    /// Stable name of the error kind, as shown to the user.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArguments(_) => "InvalidArguments",
            Self::InvalidMnemonic(_) => "InvalidMnemonic",
            Self::InvalidPath(_) => "InvalidPath",
            Self::InvalidDerivation(_) => "InvalidDerivation",
            Self::InvalidPrefix(_) => "InvalidPrefix",
            Self::Signing(_) => "SigningError",
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArguments(_) => 2,
            Self::InvalidMnemonic(_)
            | Self::InvalidPath(_)
            | Self::InvalidDerivation(_)
            | Self::InvalidPrefix(_)
            | Self::Signing(_) => 1,
        }
    }

    /// Whether usage help should be printed alongside the error.
    pub fn shows_usage(&self) -> bool {
        matches!(self, Self::InvalidArguments(_))
    }
}

impl From<bip39::Error> for KeygenError {
    fn from(err: bip39::Error) -> Self {
        Self::InvalidMnemonic(err.to_string())
    }
}

/// Result type alias using KeygenError
pub type KeygenResult<T> = Result<T, KeygenError>;
