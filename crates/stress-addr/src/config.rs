use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AddressError, Result};
use crate::modconfig::ModConfigAddress;
use crate::{decode_u64_hex, seed_from_digest};

/// Identifies one complete generated configuration.
///
/// A `ConfigAddress` is a root seed plus the ordered chain of mutation steps
/// that were applied to the configuration generated from that seed. Replaying
/// the root seed and then each mutation step in order rebuilds the same
/// configuration.
///
/// The text form is `c` followed by sixteen hex digits for the root seed,
/// then `.m` plus sixteen hex digits of entropy for each mutation step, e.g.
/// `c000000000000002a.m00000000000000ff`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ConfigAddress {
    root_seed: u64,
    mods: Vec<ModConfigAddress>,
}

impl ConfigAddress {
    /// An address for a freshly generated configuration with no mutations.
    pub fn root(root_seed: u64) -> Self {
        Self {
            root_seed,
            mods: Vec::new(),
        }
    }

    /// A root address whose seed is drawn from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::root(rng.gen())
    }

    /// The seed the whole chain starts from.
    pub fn root_seed(&self) -> u64 {
        self.root_seed
    }

    /// The mutation steps applied to the root, oldest first.
    pub fn mods(&self) -> &[ModConfigAddress] {
        &self.mods
    }

    /// Returns `true` if no mutation has been applied.
    pub fn is_root(&self) -> bool {
        self.mods.is_empty()
    }

    /// The address with every mutation step stripped.
    pub fn root_address(&self) -> Self {
        Self::root(self.root_seed)
    }

    /// The address this one was derived from, or `None` for a root address.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.mods.split_last()?;
        Some(Self {
            root_seed: self.root_seed,
            mods: rest.to_vec(),
        })
    }

    /// Seed for the random stream that generates the root configuration.
    ///
    /// This depends on the root seed only: mutation steps have seeds of
    /// their own, see [`ModConfigAddress::random_seed`].
    pub fn random_seed(&self) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"stressaddr-config-v1:");
        hasher.update(&self.root_seed.to_le_bytes());
        seed_from_digest(hasher.finalize().as_bytes())
    }

    /// Digest identifying this exact position in a mutation chain.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"stressaddr-chain-v1:");
        hasher.update(&self.root_seed.to_le_bytes());
        for m in &self.mods {
            hasher.update(b":mod:");
            hasher.update(&m.entropy().to_le_bytes());
        }
        *hasher.finalize().as_bytes()
    }

    /// The address of the configuration produced by applying `m` to the
    /// configuration at this address.
    ///
    /// Fails if `m` was derived from some other address, because replaying
    /// the resulting chain would not reproduce the same configuration.
    pub fn new_mod(&self, m: &ModConfigAddress) -> Result<Self> {
        let digest = self.digest();
        if m.parent() != &digest {
            return Err(AddressError::ParentMismatch {
                expected: hex::encode(&digest[..4]),
                actual: hex::encode(&m.parent()[..4]),
            });
        }
        let mut mods = self.mods.clone();
        mods.push(m.clone());
        Ok(Self {
            root_seed: self.root_seed,
            mods,
        })
    }
}

impl fmt::Debug for ConfigAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigAddress({self})")
    }
}

impl fmt::Display for ConfigAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{:016x}", self.root_seed)?;
        for m in &self.mods {
            write!(f, ".m{:016x}", m.entropy())?;
        }
        Ok(())
    }
}

impl FromStr for ConfigAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        let mut segments = s.split('.');
        let first = segments
            .next()
            .filter(|seg| !seg.is_empty())
            .ok_or(AddressError::Empty)?;
        let root_hex = first
            .strip_prefix('c')
            .ok_or_else(|| AddressError::InvalidPrefix {
                segment: first.to_string(),
                expected: 'c',
            })?;

        let mut addr = Self::root(decode_u64_hex(root_hex)?);
        for segment in segments {
            let entropy_hex = segment
                .strip_prefix('m')
                .ok_or_else(|| AddressError::InvalidPrefix {
                    segment: segment.to_string(),
                    expected: 'm',
                })?;
            let m = ModConfigAddress::derive(&addr, decode_u64_hex(entropy_hex)?);
            addr = addr.new_mod(&m)?;
        }
        Ok(addr)
    }
}

impl From<ConfigAddress> for String {
    fn from(addr: ConfigAddress) -> Self {
        addr.to_string()
    }
}

impl TryFrom<String> for ConfigAddress {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
