//! Interoperability checks between server-side RSA decryption and
//! ciphertexts produced by mobile-client RSA libraries.
//!
//! Keys are loaded from PKCS#1 or PKCS#8 PEM, validated and precomputed;
//! recorded ciphertexts are then decrypted with PKCS#1 v1.5 or OAEP and
//! compared byte for byte with the plaintext they should carry.

pub mod rsa;
pub mod util;
pub mod verify;
