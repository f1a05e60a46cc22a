// RSA Key Loading
// Parses PKCS#1 / PKCS#8 PEM private keys, precomputes CRT values and
// validates the key material

use std::fmt;
use std::io::BufReader;
use std::path::Path;

use num_traits::{Num, One};
use pkcs8::PrivateKeyInfo;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use rustls_pemfile::Item;
use tracing::debug;

use super::error::{RsaError, RsaResult};
use crate::util::file_ops::read_file;

const PKCS1_LABEL: &str = "RSA PRIVATE KEY";
const PKCS8_LABEL: &str = "PRIVATE KEY";

/// Encoding the key material was loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    Pkcs1,
    Pkcs8,
    Components,
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFormat::Pkcs1 => write!(f, "PKCS#1"),
            KeyFormat::Pkcs8 => write!(f, "PKCS#8"),
            KeyFormat::Components => write!(f, "component"),
        }
    }
}

/// RSA private key, validated and with CRT values precomputed
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateKey {
    inner: RsaPrivateKey,
    format: KeyFormat,
}

impl PrivateKey {
    /// Modulus length in bytes; every ciphertext has exactly this length
    pub fn modulus_len(&self) -> usize {
        self.inner.size()
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> usize {
        self.inner.n().bits()
    }

    pub fn format(&self) -> KeyFormat {
        self.format
    }

    pub fn public_key(&self) -> RsaPublicKey {
        self.inner.to_public_key()
    }

    pub fn modulus(&self) -> &BigUint {
        self.inner.n()
    }

    pub fn primes(&self) -> &[BigUint] {
        self.inner.primes()
    }

    /// Product of all prime factors; equals the modulus for a valid key
    pub fn primes_product(&self) -> BigUint {
        self.inner
            .primes()
            .iter()
            .fold(BigUint::one(), |acc, prime| acc * prime)
    }

    /// Whether dP, dQ and qInv are available for CRT decryption
    pub fn is_precomputed(&self) -> bool {
        self.inner.dp().is_some() && self.inner.dq().is_some() && self.inner.qinv().is_some()
    }

    pub(crate) fn as_rsa(&self) -> &RsaPrivateKey {
        &self.inner
    }
}

/// Load a private key from a PEM file such as `private_key.pem`
pub fn load_key_file(path: impl AsRef<Path>) -> RsaResult<PrivateKey> {
    let path = path.as_ref();
    let bytes = read_file(path).map_err(|source| RsaError::KeyFile {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes)
        .map_err(|e| RsaError::PemDecode(format!("{} is not text: {}", path.display(), e)))?;
    debug!(path = %path.display(), "loading private key file");
    load_key_pem(&text)
}

/// Load a private key from PEM text holding an `RSA PRIVATE KEY` (PKCS#1)
/// or `PRIVATE KEY` (PKCS#8) block. Only the first block is considered.
pub fn load_key_pem(pem: &str) -> RsaResult<PrivateKey> {
    let label = first_label(pem)
        .ok_or_else(|| RsaError::PemDecode("no PEM block found".to_string()))?;
    if label != PKCS1_LABEL && label != PKCS8_LABEL {
        return Err(RsaError::UnsupportedKeyType(label.to_string()));
    }

    let mut reader = BufReader::new(pem.as_bytes());
    let item = rustls_pemfile::read_one(&mut reader)
        .map_err(|e| RsaError::PemDecode(e.to_string()))?;

    let (key, format) = match item {
        Some(Item::Pkcs1Key(der)) => (parse_pkcs1(der.secret_pkcs1_der())?, KeyFormat::Pkcs1),
        Some(Item::Pkcs8Key(der)) => (parse_pkcs8(der.secret_pkcs8_der())?, KeyFormat::Pkcs8),
        _ => {
            return Err(RsaError::PemDecode(format!(
                "unable to decode {} block",
                label
            )))
        }
    };

    finish(key, format)
}

/// Build a private key from decimal components, the way hard-coded test keys
/// are usually written down. `primes` needs at least two entries.
pub fn load_key_components(n: &str, e: u64, d: &str, primes: &[&str]) -> RsaResult<PrivateKey> {
    let n = parse_decimal("modulus", n)?;
    let d = parse_decimal("private exponent", d)?;
    let primes = primes
        .iter()
        .map(|p| parse_decimal("prime", p))
        .collect::<RsaResult<Vec<_>>>()?;

    let key = RsaPrivateKey::from_components(n, BigUint::from(e), d, primes)
        .map_err(|e| RsaError::KeyValidation(e.to_string()))?;
    finish(key, KeyFormat::Components)
}

fn parse_pkcs1(der: &[u8]) -> RsaResult<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs1_der(der).map_err(|e| RsaError::KeyParse {
        format: KeyFormat::Pkcs1,
        reason: e.to_string(),
    })
}

fn parse_pkcs8(der: &[u8]) -> RsaResult<RsaPrivateKey> {
    let parse_err = |reason: String| RsaError::KeyParse {
        format: KeyFormat::Pkcs8,
        reason,
    };

    let info = PrivateKeyInfo::try_from(der).map_err(|e| parse_err(e.to_string()))?;
    if info.algorithm.oid != rsa::pkcs1::ALGORITHM_OID {
        return Err(RsaError::NotRsaKey(info.algorithm.oid.to_string()));
    }
    RsaPrivateKey::try_from(info).map_err(|e| parse_err(e.to_string()))
}

fn parse_decimal(what: &str, digits: &str) -> RsaResult<BigUint> {
    BigUint::from_str_radix(digits.trim(), 10)
        .map_err(|_| RsaError::KeyValidation(format!("bad {} number: {}", what, digits)))
}

/// Precompute CRT values, then run the consistency checks
fn finish(mut key: RsaPrivateKey, format: KeyFormat) -> RsaResult<PrivateKey> {
    key.precompute()
        .map_err(|e| RsaError::KeyValidation(e.to_string()))?;
    key.validate()
        .map_err(|e| RsaError::KeyValidation(e.to_string()))?;

    debug!(
        %format,
        bits = key.n().bits(),
        primes = key.primes().len(),
        "loaded RSA private key"
    );
    Ok(PrivateKey { inner: key, format })
}

/// Label of the first PEM block, e.g. `RSA PRIVATE KEY`. The boundary
/// must start the line; indented headers are not PEM.
fn first_label(pem: &str) -> Option<&str> {
    pem.lines().find_map(|line| {
        line.trim_end()
            .strip_prefix("-----BEGIN ")
            .and_then(|rest| rest.strip_suffix("-----"))
    })
}
