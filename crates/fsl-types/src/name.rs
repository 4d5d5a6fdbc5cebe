use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_NAME_SYMBOLS;
use crate::error::TypeError;

/// A bounded name stored as UTF-16 code units.
///
/// The wire format reserves [`MAX_NAME_SYMBOLS`] 16-bit code units per name
/// and pads the tail with nulls. Keeping the decoded value as code units
/// (rather than a `String`) makes encode and decode exact inverses even for
/// content that is not valid UTF-16.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedName {
    units: Vec<u16>,
}

impl FixedName {
    /// Build a name from a string.
    ///
    /// Fails with [`TypeError::StringTooLong`] when the string needs more
    /// than [`MAX_NAME_SYMBOLS`] code units, and with
    /// [`TypeError::EmbeddedNul`] when it contains U+0000 — a null could not
    /// be told apart from the wire padding and would not survive a round
    /// trip.
    pub fn new(s: &str) -> Result<Self, TypeError> {
        let units: Vec<u16> = s.encode_utf16().collect();
        if units.contains(&0) {
            return Err(TypeError::EmbeddedNul);
        }
        if units.len() > MAX_NAME_SYMBOLS {
            return Err(TypeError::StringTooLong {
                max: MAX_NAME_SYMBOLS,
                actual: units.len(),
            });
        }
        Ok(Self { units })
    }

    /// The empty name.
    pub const fn empty() -> Self {
        Self { units: Vec::new() }
    }

    /// Build from raw code units as read off the wire, stripping trailing
    /// null padding. Total: any unit sequence of at most the reserved width
    /// is representable.
    pub fn from_units(units: &[u16]) -> Self {
        let end = units
            .iter()
            .rposition(|&u| u != 0)
            .map(|i| i + 1)
            .unwrap_or(0);
        Self {
            units: units[..end].to_vec(),
        }
    }

    /// The stored code units, without padding.
    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    /// Number of stored code units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if no code units are stored.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Render as a `String`, replacing unpaired surrogates.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}

impl fmt::Debug for FixedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedName({:?})", self.to_string_lossy())
    }
}

impl fmt::Display for FixedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}
