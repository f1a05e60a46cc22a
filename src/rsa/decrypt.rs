// RSA Decryption
// PKCS#1 v1.5 and OAEP decryption with blinding; the rsa crate uses the
// precomputed CRT values of the key

use rand::rngs::OsRng;
use rsa::Pkcs1v15Encrypt;

use super::error::{RsaError, RsaResult};
use super::keyload::PrivateKey;
use super::padding::PaddingScheme;

/// Decrypt ciphertext bytes using RSA private key
/// Returns plaintext with the padding stripped
pub fn decrypt_bytes(
    ciphertext: &[u8],
    private_key: &PrivateKey,
    padding: &PaddingScheme,
) -> RsaResult<Vec<u8>> {
    // Validate ciphertext size
    let key_bytes = private_key.modulus_len();
    if ciphertext.len() != key_bytes {
        return Err(RsaError::CiphertextLength {
            expected: key_bytes,
            actual: ciphertext.len(),
        });
    }

    // The RNG only blinds the private-key operation
    let mut rng = OsRng;
    let key = private_key.as_rsa();
    let result = match padding.to_oaep()? {
        Some(oaep) => key.decrypt_blinded(&mut rng, oaep, ciphertext),
        None => key.decrypt_blinded(&mut rng, Pkcs1v15Encrypt, ciphertext),
    };

    result.map_err(|e| RsaError::Decryption(e.to_string()))
}

/// Decrypt ciphertext to a string
pub fn decrypt_to_string(
    ciphertext: &[u8],
    private_key: &PrivateKey,
    padding: &PaddingScheme,
) -> RsaResult<String> {
    let plaintext = decrypt_bytes(ciphertext, private_key, padding)?;
    String::from_utf8(plaintext).map_err(|e| RsaError::Decryption(format!("invalid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::keyload::load_key_pem;
    use crate::rsa::padding::HashAlg;
    use crate::util::encoding::{decode_ciphertext, CiphertextEncoding};

    const PKCS1_PEM: &str = include_str!("../../tests/data/private_key.pem");

    // "hello ios rsa", OAEP/SHA-256, label "label"
    const OAEP_SHA256_LABEL: &str = "UYA7AyfT+T50yrpmzBOYW87zpvIFtlx+o/Mq6iQM5+gilWKDjUccwEBfnxReS3jbSgyyJkeVyCGkIbTGHjzqWO96cJxr6115ZtMG1IcWgqEF4kgLani5hE1KGcLkTDQxk1XDQ4z7fSX2liAEe+leAdtoBDERgzAv9FWAv03qG/kIImhdEIYB+Uy1A3xaVoJIWSABE0gR20AR/lXs6Rc6Dr/GD3XRDXIBI9zuqzPXOZKj2rxS53rXom3eAmum1D1zXzM5DAb++1wEVdbRiNvh9fPZoHA6vHaIzpNPEDUqO9MN33H4w8nfu0/qeVnLAQ0m2qD9thHEOUv0gzgezsB4xQ==";

    // "hello rsa", PKCS#1 v1.5
    const PKCS1_V15: &str = "axQFs9nRAchMykrdeGnF8FmNeq7nArGsNu9Sp2PKlHpJ+aAw1QW1y2rgz3zKDWgjHD/yRU7Xj9bxP1dRqYZntHx7n+pDcEIpbVBoh6Dfj2Ird714IpJWlvwggbVFu/hfjMpULc4ZW875nOD0i3QDVL5XCxj1HXV5N2HkhVPPDOKXUuS9Jy9kWHCvovG8/JdRqrkORE9RyXqaypFGeVJO7SGinnkim7BB062eTnTz6M3jKN+V0BWd5o0JZ0qb2BCy4Ntg0KQ2nh8MWZRkRho7tUxEokEhvrVsYzsiAjtXNG6UoE8+4QZ7is2LIDzMuBRrTr0M2NHXVumlh74TPE+smQ==";

    fn ciphertext(b64: &str) -> Vec<u8> {
        decode_ciphertext(b64, CiphertextEncoding::Base64).unwrap()
    }

    #[test]
    fn test_decrypt_oaep_with_label() {
        let key = load_key_pem(PKCS1_PEM).unwrap();
        let padding = PaddingScheme::oaep_with_label(HashAlg::Sha256, "label");

        let plaintext = decrypt_to_string(&ciphertext(OAEP_SHA256_LABEL), &key, &padding).unwrap();
        assert_eq!(plaintext, "hello ios rsa");
    }

    #[test]
    fn test_decrypt_pkcs1_v15() {
        let key = load_key_pem(PKCS1_PEM).unwrap();

        let plaintext =
            decrypt_to_string(&ciphertext(PKCS1_V15), &key, &PaddingScheme::Pkcs1v15).unwrap();
        assert_eq!(plaintext, "hello rsa");
    }

    #[test]
    fn test_decrypt_is_deterministic() {
        let key = load_key_pem(PKCS1_PEM).unwrap();
        let padding = PaddingScheme::oaep_with_label(HashAlg::Sha256, "label");
        let ct = ciphertext(OAEP_SHA256_LABEL);

        let first = decrypt_bytes(&ct, &key, &padding).unwrap();
        let second = decrypt_bytes(&ct, &key, &padding).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decrypt_wrong_label() {
        let key = load_key_pem(PKCS1_PEM).unwrap();
        let ct = ciphertext(OAEP_SHA256_LABEL);

        for padding in [
            PaddingScheme::oaep(HashAlg::Sha256),
            PaddingScheme::oaep_with_label(HashAlg::Sha256, ""),
            PaddingScheme::oaep_with_label(HashAlg::Sha256, "labels"),
        ] {
            let result = decrypt_bytes(&ct, &key, &padding);
            assert!(matches!(result, Err(RsaError::Decryption(_))), "{}", padding);
        }
    }

    #[test]
    fn test_decrypt_wrong_scheme() {
        let key = load_key_pem(PKCS1_PEM).unwrap();

        let result = decrypt_bytes(&ciphertext(PKCS1_V15), &key, &PaddingScheme::oaep(HashAlg::Sha256));
        assert!(matches!(result, Err(RsaError::Decryption(_))));

        let result = decrypt_bytes(
            &ciphertext(OAEP_SHA256_LABEL),
            &key,
            &PaddingScheme::oaep_with_label(HashAlg::Sha1, "label"),
        );
        assert!(matches!(result, Err(RsaError::Decryption(_))));
    }

    #[test]
    fn test_decrypt_invalid_size() {
        let key = load_key_pem(PKCS1_PEM).unwrap();
        let result = decrypt_bytes(&[0u8; 10], &key, &PaddingScheme::Pkcs1v15);
        assert!(matches!(
            result,
            Err(RsaError::CiphertextLength {
                expected: 256,
                actual: 10
            })
        ));
    }
}
