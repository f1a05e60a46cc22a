// RSA Encryption
// Public-key encryption used by the round-trip checks

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};

use super::error::{RsaError, RsaResult};
use super::padding::PaddingScheme;

/// Encrypt bytes using RSA public key
/// Returns ciphertext exactly as long as the modulus
pub fn encrypt_bytes(
    plaintext: &[u8],
    public_key: &RsaPublicKey,
    padding: &PaddingScheme,
) -> RsaResult<Vec<u8>> {
    let max = padding.max_message_len(public_key.size());
    if plaintext.len() > max {
        return Err(RsaError::MessageTooLong {
            max,
            len: plaintext.len(),
        });
    }

    let mut rng = OsRng;
    let result = match padding.to_oaep()? {
        Some(oaep) => public_key.encrypt(&mut rng, oaep, plaintext),
        None => public_key.encrypt(&mut rng, Pkcs1v15Encrypt, plaintext),
    };

    result.map_err(|e| RsaError::Encryption(e.to_string()))
}

/// Encrypt a string using RSA public key
pub fn encrypt_string(
    plaintext: &str,
    public_key: &RsaPublicKey,
    padding: &PaddingScheme,
) -> RsaResult<Vec<u8>> {
    encrypt_bytes(plaintext.as_bytes(), public_key, padding)
}
