//! Station identity types.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use super::Coordinate;

/// Longest station abbreviation we accept.
const MAX_ID_LEN: usize = 8;

/// Error returned when parsing an invalid station id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A station abbreviation from the BART catalog (e.g. `POWL`, `16TH`).
///
/// Ids are 1 to 8 uppercase ASCII letters or digits. Any `StationId`
/// value is valid by construction, so it can be dropped into a request URL
/// without escaping.
///
/// # Examples
///
/// ```
/// use departure_board::domain::StationId;
///
/// let powl = StationId::parse("POWL").unwrap();
/// assert_eq!(powl.as_str(), "POWL");
///
/// // Digits are fine, lowercase is not
/// assert!(StationId::parse("16TH").is_ok());
/// assert!(StationId::parse("powl").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationId {
    bytes: [u8; MAX_ID_LEN],
    len: u8,
}

impl StationId {
    /// Parse a station id. The input must already be uppercase.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let raw = s.as_bytes();

        if raw.is_empty() || raw.len() > MAX_ID_LEN {
            return Err(InvalidStationId {
                reason: "must be between 1 and 8 characters",
            });
        }

        if !raw
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(InvalidStationId {
                reason: "must be uppercase ASCII letters or digits",
            });
        }

        let mut bytes = [0u8; MAX_ID_LEN];
        bytes[..raw.len()].copy_from_slice(raw);

        Ok(StationId {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Parse after trimming and uppercasing (the catalog sends `abbr` in
    /// uppercase, user input may not be).
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationId> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.as_str())
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A station from the catalog.
///
/// Two `StationInfo` values are the same station when their ids match,
/// regardless of name or position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationInfo {
    pub id: StationId,
    pub name: String,
    pub coordinate: Coordinate,
}

impl StationInfo {
    pub fn new(id: StationId, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
        }
    }
}

impl PartialEq for StationInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StationInfo {}

impl Hash for StationInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Z0-9]{1,8}") {
            let id = StationId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Lowercase letters are always rejected
        #[test]
        fn lowercase_rejected(s in "[a-z]{1,8}") {
            prop_assert!(StationId::parse(&s).is_err());
        }

        /// Too-long strings are always rejected
        #[test]
        fn too_long_rejected(s in "[A-Z]{9,16}") {
            prop_assert!(StationId::parse(&s).is_err());
        }
    }
}
