// Verifier Configuration

use std::path::PathBuf;

use super::encoding::CiphertextEncoding;

/// Key file the original harness reads when no path is given
pub const DEFAULT_KEY_PATH: &str = "private_key.pem";

/// Configuration for loading the key and checking ciphertexts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifierConfig {
    pub key_path: PathBuf,
    pub encoding: CiphertextEncoding,
    /// Emit recovered plaintext to the diagnostic log
    pub log_plaintext: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            key_path: PathBuf::from(DEFAULT_KEY_PATH),
            encoding: CiphertextEncoding::Base64,
            log_plaintext: true,
        }
    }
}

impl VerifierConfig {
    pub fn with_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_path = path.into();
        self
    }

    pub fn with_encoding(mut self, encoding: CiphertextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_log_plaintext(mut self, enabled: bool) -> Self {
        self.log_plaintext = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = VerifierConfig::default()
            .with_key_path("keys/test.pem")
            .with_encoding(CiphertextEncoding::Hex)
            .with_log_plaintext(false);

        assert_eq!(config.key_path, PathBuf::from("keys/test.pem"));
        assert_eq!(config.encoding, CiphertextEncoding::Hex);
        assert!(!config.log_plaintext);
        assert_eq!(VerifierConfig::default().key_path, PathBuf::from(DEFAULT_KEY_PATH));
    }
}
