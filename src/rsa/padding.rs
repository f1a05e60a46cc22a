// RSA Padding Schemes
// Selects PKCS#1 v1.5 or OAEP (with digest and label) for the rsa crate

use std::fmt;
use std::str::FromStr;

use rsa::Oaep;
use sha1::Sha1;
use sha2::digest::{Digest, DynDigest};
use sha2::{Sha256, Sha384, Sha512};

use super::error::{RsaError, RsaResult};

/// PKCS#1 v1.5 overhead: 0x00 || 0x02 || PS (at least 8 bytes) || 0x00
const PKCS1_V15_OVERHEAD: usize = 11;

/// Digest used by OAEP for both the label hash and MGF1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlg {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlg {
    /// Digest output length in bytes
    pub fn output_len(self) -> usize {
        match self {
            HashAlg::Sha1 => 20,
            HashAlg::Sha256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
        }
    }

    fn oaep(self, label: Option<String>) -> Oaep {
        match self {
            HashAlg::Sha1 => oaep_with::<Sha1>(label),
            HashAlg::Sha256 => oaep_with::<Sha256>(label),
            HashAlg::Sha384 => oaep_with::<Sha384>(label),
            HashAlg::Sha512 => oaep_with::<Sha512>(label),
        }
    }
}

fn oaep_with<D>(label: Option<String>) -> Oaep
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    match label {
        Some(label) => Oaep::new_with_label::<D, _>(label),
        None => Oaep::new::<D>(),
    }
}

impl fmt::Display for HashAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlg::Sha1 => "sha1",
            HashAlg::Sha256 => "sha256",
            HashAlg::Sha384 => "sha384",
            HashAlg::Sha512 => "sha512",
        };
        f.write_str(name)
    }
}

impl FromStr for HashAlg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(HashAlg::Sha1),
            "sha256" => Ok(HashAlg::Sha256),
            "sha384" => Ok(HashAlg::Sha384),
            "sha512" => Ok(HashAlg::Sha512),
            other => Err(format!("unsupported hash function: {}", other)),
        }
    }
}

/// Encryption padding applied before/after the raw RSA operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaddingScheme {
    Pkcs1v15,
    /// The label is kept as bytes but must be valid UTF-8: the rsa crate
    /// only accepts text labels, so any other label fails with
    /// `RsaError::Label` when the scheme is used.
    Oaep {
        hash: HashAlg,
        label: Option<Vec<u8>>,
    },
}

impl PaddingScheme {
    /// OAEP without a label
    pub fn oaep(hash: HashAlg) -> Self {
        PaddingScheme::Oaep { hash, label: None }
    }

    /// OAEP bound to `label`; decryption must use the same label
    pub fn oaep_with_label(hash: HashAlg, label: impl Into<Vec<u8>>) -> Self {
        PaddingScheme::Oaep {
            hash,
            label: Some(label.into()),
        }
    }

    /// Largest plaintext this scheme can carry under a modulus of
    /// `modulus_len` bytes
    pub fn max_message_len(&self, modulus_len: usize) -> usize {
        match self {
            PaddingScheme::Pkcs1v15 => modulus_len.saturating_sub(PKCS1_V15_OVERHEAD),
            PaddingScheme::Oaep { hash, .. } => {
                modulus_len.saturating_sub(2 * hash.output_len() + 2)
            }
        }
    }

    /// Builds the OAEP parameters for the rsa crate, which only takes
    /// text labels.
    pub(crate) fn to_oaep(&self) -> RsaResult<Option<Oaep>> {
        match self {
            PaddingScheme::Pkcs1v15 => Ok(None),
            PaddingScheme::Oaep { hash, label } => {
                let label = match label {
                    Some(bytes) => Some(
                        String::from_utf8(bytes.clone()).map_err(|_| RsaError::Label)?,
                    ),
                    None => None,
                };
                Ok(Some(hash.oaep(label)))
            }
        }
    }
}

impl fmt::Display for PaddingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddingScheme::Pkcs1v15 => write!(f, "PKCS#1 v1.5"),
            PaddingScheme::Oaep { hash, label: None } => write!(f, "OAEP/{}", hash),
            PaddingScheme::Oaep {
                hash,
                label: Some(label),
            } => write!(f, "OAEP/{} label={:?}", hash, String::from_utf8_lossy(label)),
        }
    }
}
