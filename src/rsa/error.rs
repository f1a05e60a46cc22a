// RSA Error Types
// Errors raised while loading keys and running the padding transforms

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::keyload::KeyFormat;

/// Errors that can occur while loading a key or en/decrypting with it
#[derive(Debug, Error)]
pub enum RsaError {
    #[error("unable to read key file {}: {source}", .path.display())]
    KeyFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid private key data: {0}")]
    PemDecode(String),
    #[error("invalid private key type: {0}")]
    UnsupportedKeyType(String),
    #[error("not RSA private key: algorithm {0}")]
    NotRsaKey(String),
    #[error("unable to parse {format} private key: {reason}")]
    KeyParse { format: KeyFormat, reason: String },
    #[error("private key failed validation: {0}")]
    KeyValidation(String),
    #[error("invalid ciphertext encoding: {0}")]
    CiphertextEncoding(String),
    #[error("invalid ciphertext length: expected {expected} bytes, got {actual}")]
    CiphertextLength { expected: usize, actual: usize },
    #[error("OAEP label is not valid UTF-8")]
    Label,
    #[error("message too long: max {max} bytes, got {len}")]
    MessageTooLong { max: usize, len: usize },
    #[error("error from encryption: {0}")]
    Encryption(String),
    #[error("error from decryption: {0}")]
    Decryption(String),
}

/// Result type for RSA operations
pub type RsaResult<T> = Result<T, RsaError>;
