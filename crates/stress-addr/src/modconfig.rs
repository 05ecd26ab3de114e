use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigAddress;
use crate::error::{AddressError, Result};
use crate::{decode_u64_hex, seed_from_digest};

/// Identifies one mutation step applied to a generated configuration.
///
/// A `ModConfigAddress` binds generator-chosen entropy to the digest of the
/// [`ConfigAddress`] it modifies, so the same entropy applied to two
/// different configurations yields two different random streams.
///
/// The standalone text form is `m<64 hex parent digest>:<16 hex entropy>`.
/// Inside a [`ConfigAddress`] only the entropy is written, because the
/// parent digest is implied by its position in the chain.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ModConfigAddress {
    parent: [u8; 32],
    entropy: u64,
}

impl ModConfigAddress {
    /// Derive a mutation step for `parent` from the given entropy.
    pub fn derive(parent: &ConfigAddress, entropy: u64) -> Self {
        Self {
            parent: parent.digest(),
            entropy,
        }
    }

    /// Derive a mutation step for `parent` with entropy drawn from `rng`.
    pub fn random<R: Rng + ?Sized>(parent: &ConfigAddress, rng: &mut R) -> Self {
        Self::derive(parent, rng.gen())
    }

    /// Digest of the address this step modifies.
    pub fn parent(&self) -> &[u8; 32] {
        &self.parent
    }

    /// The generator-chosen entropy for this step.
    pub fn entropy(&self) -> u64 {
        self.entropy
    }

    /// Seed for the random stream that drives this mutation step.
    pub fn random_seed(&self) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"stressaddr-mod-v1:");
        hasher.update(&self.parent);
        hasher.update(b":");
        hasher.update(&self.entropy.to_le_bytes());
        seed_from_digest(hasher.finalize().as_bytes())
    }
}

impl fmt::Debug for ModConfigAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ModConfigAddress({}:{:016x})",
            hex::encode(&self.parent[..4]),
            self.entropy
        )
    }
}

impl fmt::Display for ModConfigAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}:{:016x}", hex::encode(self.parent), self.entropy)
    }
}

impl FromStr for ModConfigAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(AddressError::Empty);
        }
        let body = s.strip_prefix('m').ok_or_else(|| AddressError::InvalidPrefix {
            segment: s.to_string(),
            expected: 'm',
        })?;
        let (parent_hex, entropy_hex) =
            body.split_once(':').ok_or_else(|| AddressError::InvalidPrefix {
                segment: body.to_string(),
                expected: ':',
            })?;

        let bytes = hex::decode(parent_hex).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(AddressError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut parent = [0u8; 32];
        parent.copy_from_slice(&bytes);

        Ok(Self {
            parent,
            entropy: decode_u64_hex(entropy_hex)?,
        })
    }
}

impl From<ModConfigAddress> for String {
    fn from(addr: ModConfigAddress) -> Self {
        addr.to_string()
    }
}

impl TryFrom<String> for ModConfigAddress {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
