//! Reproducibility addresses for generated stress-test configurations.
//!
//! Every generated configuration is identified by an address that is enough
//! to rebuild it exactly, as long as the generator code hasn't changed in
//! the meantime.
//!
//! # Key Types
//!
//! - [`ConfigAddress`] — A root seed plus the ordered chain of mutation steps
//!   applied to it
//! - [`ModConfigAddress`] — One mutation step, bound to the address it modifies
//! - [`AddressError`] — Decode and chain-consistency failures
//!
//! Both address types derive numeric seeds with domain-separated BLAKE3, so
//! identical addresses always yield identical random streams.

pub mod config;
pub mod error;
pub mod modconfig;

pub use config::ConfigAddress;
pub use error::{AddressError, Result};
pub use modconfig::ModConfigAddress;

/// Take the first eight bytes of a digest as a little-endian seed.
pub(crate) fn seed_from_digest(digest: &[u8; 32]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(buf)
}

/// Decode exactly sixteen hex digits into a `u64`.
pub(crate) fn decode_u64_hex(s: &str) -> Result<u64> {
    let bytes = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
    if bytes.len() != 8 {
        return Err(AddressError::InvalidLength {
            expected: 8,
            actual: bytes.len(),
        });
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes);
    Ok(u64::from_be_bytes(buf))
}
