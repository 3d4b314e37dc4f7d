use thiserror::Error;

/// Everything that can go wrong inside the kit. All variants are recoverable
/// at the caller; none abort the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("block operation invoked before set_key")]
    CipherNotKeyed,

    #[error("invalid block size: expected {expected} bytes, got {actual}")]
    InvalidBlockSize { expected: usize, actual: usize },

    #[error("bad padding: {0}")]
    BadPadding(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
