//! Station identifier and record types.

use std::fmt;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A VBB station identifier.
///
/// Station ids are non-empty strings of ASCII digits, e.g. `900023201` for
/// S+U Zoologischer Garten. This type guarantees that any `StationId` value is
/// well-formed by construction.
///
/// # Examples
///
/// ```
/// use vbb_departures::domain::StationId;
///
/// let zoo = StationId::parse("900023201").unwrap();
/// assert_eq!(zoo.as_str(), "900023201");
///
/// // Names are not ids
/// assert!(StationId::parse("Zoo").is_err());
/// assert!(StationId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    /// Parse a station id from a string.
    ///
    /// Surrounding whitespace is ignored; the rest must be ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStationId {
                reason: "must be ASCII digits 0-9",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved station: id plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
