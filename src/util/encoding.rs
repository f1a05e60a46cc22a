// Ciphertext Text Encodings
// Ciphertexts travel as base64 (mobile clients) or hex (debug dumps)

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::rsa::error::{RsaError, RsaResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CiphertextEncoding {
    #[default]
    Base64,
    Hex,
}

impl fmt::Display for CiphertextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CiphertextEncoding::Base64 => f.write_str("base64"),
            CiphertextEncoding::Hex => f.write_str("hex"),
        }
    }
}

impl FromStr for CiphertextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base64" | "b64" => Ok(CiphertextEncoding::Base64),
            "hex" => Ok(CiphertextEncoding::Hex),
            other => Err(format!("unsupported ciphertext encoding: {}", other)),
        }
    }
}

/// Decode ciphertext text. Whitespace (line wrapping from logs or source
/// literals) is ignored.
pub fn decode_ciphertext(text: &str, encoding: CiphertextEncoding) -> RsaResult<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let decoded = match encoding {
        CiphertextEncoding::Base64 => STANDARD.decode(compact.as_bytes()).map_err(|e| e.to_string()),
        CiphertextEncoding::Hex => hex::decode(&compact).map_err(|e| e.to_string()),
    };
    decoded.map_err(|reason| RsaError::CiphertextEncoding(format!("{}: {}", encoding, reason)))
}

pub fn encode_ciphertext(bytes: &[u8], encoding: CiphertextEncoding) -> String {
    match encoding {
        CiphertextEncoding::Base64 => STANDARD.encode(bytes),
        CiphertextEncoding::Hex => hex::encode(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_with_line_breaks() {
        let bytes = decode_ciphertext("aGVsbG8g\n  cnNh\r\n", CiphertextEncoding::Base64).unwrap();
        assert_eq!(bytes, b"hello rsa");
    }

    #[test]
    fn test_hex() {
        let bytes = decode_ciphertext("68656c6c6f20727361", CiphertextEncoding::Hex).unwrap();
        assert_eq!(bytes, b"hello rsa");
        assert_eq!(encode_ciphertext(&bytes, CiphertextEncoding::Hex), "68656c6c6f20727361");
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            decode_ciphertext("not*base64", CiphertextEncoding::Base64),
            Err(RsaError::CiphertextEncoding(_))
        ));
        assert!(matches!(
            decode_ciphertext("abc", CiphertextEncoding::Hex),
            Err(RsaError::CiphertextEncoding(_))
        ));
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("HEX".parse::<CiphertextEncoding>().unwrap(), CiphertextEncoding::Hex);
        assert_eq!("base64".parse::<CiphertextEncoding>().unwrap(), CiphertextEncoding::Base64);
        assert!("base32".parse::<CiphertextEncoding>().is_err());
    }
}
