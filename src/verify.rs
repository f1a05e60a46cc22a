// Fixed-Vector Verification
// Decrypts recorded ciphertexts and compares them with the expected plaintext

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::rsa::{decrypt_bytes, encrypt_bytes, load_key_file, PaddingScheme, PrivateKey, RsaError};
use crate::util::config::VerifierConfig;
use crate::util::encoding::{decode_ciphertext, CiphertextEncoding};

/// Why a vector failed: the cryptography, or the comparison
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Crypto(#[from] RsaError),
    #[error("expect {expected:?}, but {actual:?}")]
    PlaintextMismatch { expected: String, actual: String },
}

/// A recorded ciphertext and the plaintext it must decrypt to
#[derive(Debug, Clone)]
pub struct Vector<'a> {
    pub name: &'a str,
    pub ciphertext: &'a str,
    pub encoding: CiphertextEncoding,
    pub padding: PaddingScheme,
    pub expected: &'a str,
}

impl<'a> Vector<'a> {
    pub fn base64(name: &'a str, ciphertext: &'a str, padding: PaddingScheme, expected: &'a str) -> Self {
        Self {
            name,
            ciphertext,
            encoding: CiphertextEncoding::Base64,
            padding,
            expected,
        }
    }

    pub fn hex(name: &'a str, ciphertext: &'a str, padding: PaddingScheme, expected: &'a str) -> Self {
        Self {
            name,
            ciphertext,
            encoding: CiphertextEncoding::Hex,
            padding,
            expected,
        }
    }
}

pub struct Verifier {
    key: PrivateKey,
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(key: PrivateKey, config: VerifierConfig) -> Self {
        Self { key, config }
    }

    /// Load the key named by `config.key_path`
    pub fn from_config(config: VerifierConfig) -> Result<Self, VerifyError> {
        let key = load_key_file(&config.key_path)?;
        Ok(Self::new(key, config))
    }

    pub fn key(&self) -> &PrivateKey {
        &self.key
    }

    /// Decrypt `vector` and compare it byte for byte with its expected
    /// plaintext. Returns the recovered plaintext.
    pub fn verify(&self, vector: &Vector<'_>) -> Result<Vec<u8>, VerifyError> {
        let ciphertext = decode_ciphertext(vector.ciphertext, vector.encoding)?;
        debug!(name = vector.name, padding = %vector.padding, len = ciphertext.len(), "decrypting vector");

        let plaintext = decrypt_bytes(&ciphertext, &self.key, &vector.padding)?;
        self.compare(vector.name, vector.expected.as_bytes(), plaintext)
    }

    /// Decrypt ciphertext text in the configured encoding
    pub fn decrypt_text(&self, text: &str, padding: &PaddingScheme) -> Result<Vec<u8>, VerifyError> {
        let ciphertext = decode_ciphertext(text, self.config.encoding)?;
        let plaintext = decrypt_bytes(&ciphertext, &self.key, padding)?;
        self.log_plaintext("ciphertext", &plaintext);
        Ok(plaintext)
    }

    /// Encrypt with the public half of the key, decrypt again and compare
    pub fn round_trip(&self, plaintext: &[u8], padding: &PaddingScheme) -> Result<Vec<u8>, VerifyError> {
        let ciphertext = encrypt_bytes(plaintext, &self.key.public_key(), padding)?;
        debug!(padding = %padding, len = ciphertext.len(), "encrypted round-trip message");

        let recovered = decrypt_bytes(&ciphertext, &self.key, padding)?;
        self.compare("round trip", plaintext, recovered)?;
        Ok(ciphertext)
    }

    fn compare(&self, name: &str, expected: &[u8], actual: Vec<u8>) -> Result<Vec<u8>, VerifyError> {
        self.log_plaintext(name, &actual);
        if actual != expected {
            warn!(name, "plaintext mismatch");
            return Err(VerifyError::PlaintextMismatch {
                expected: String::from_utf8_lossy(expected).into_owned(),
                actual: String::from_utf8_lossy(&actual).into_owned(),
            });
        }
        Ok(actual)
    }

    fn log_plaintext(&self, name: &str, plaintext: &[u8]) {
        if self.config.log_plaintext {
            info!(name, plaintext = %String::from_utf8_lossy(plaintext), "Plaintext");
        }
    }
}
