// RSA Module - Main module file
// Key loading plus padding-aware encryption and decryption

pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod keyload;
pub mod padding;

pub use decrypt::{decrypt_bytes, decrypt_to_string};
pub use encrypt::{encrypt_bytes, encrypt_string};
pub use error::{RsaError, RsaResult};
pub use keyload::{load_key_components, load_key_file, load_key_pem, KeyFormat, PrivateKey};
pub use padding::{HashAlg, PaddingScheme};
