use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::PUBLIC_IDENTITY_LEN;
use crate::error::TypeError;

/// A 32-byte public identity.
///
/// Identities name league members and the score oracle. The ledger core
/// only stores and compares the raw bytes; the transport authenticates the
/// caller before an operation is applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicIdentity([u8; PUBLIC_IDENTITY_LEN]);

impl PublicIdentity {
    /// Wrap raw identity bytes.
    pub const fn new(bytes: [u8; PUBLIC_IDENTITY_LEN]) -> Self {
        Self(bytes)
    }

    /// The zero identity (all zeros). Marks an unoccupied slot.
    pub const fn zero() -> Self {
        Self([0u8; PUBLIC_IDENTITY_LEN])
    }

    /// Returns `true` if this is the zero identity.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; PUBLIC_IDENTITY_LEN]
    }

    /// The raw identity bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_IDENTITY_LEN] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != PUBLIC_IDENTITY_LEN {
            return Err(TypeError::InvalidLength {
                expected: PUBLIC_IDENTITY_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; PUBLIC_IDENTITY_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl Default for PublicIdentity {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for PublicIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicIdentity({})", self.short_hex())
    }
}

impl fmt::Display for PublicIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; PUBLIC_IDENTITY_LEN]> for PublicIdentity {
    fn from(bytes: [u8; PUBLIC_IDENTITY_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<PublicIdentity> for [u8; PUBLIC_IDENTITY_LEN] {
    fn from(id: PublicIdentity) -> Self {
        id.0
    }
}
