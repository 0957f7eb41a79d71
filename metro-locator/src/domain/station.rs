//! Station code and station types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Coordinates;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid WMATA rail station code.
///
/// Station codes are one uppercase ASCII letter (the line segment)
/// followed by two ASCII digits. Any `StationCode` value is valid by
/// construction.
///
/// # Examples
///
/// ```
/// use metro_locator::domain::StationCode;
///
/// let metro_center = StationCode::parse("A01").unwrap();
/// assert_eq!(metro_center.as_str(), "A01");
///
/// // Lowercase is rejected
/// assert!(StationCode::parse("a01").is_err());
///
/// // Wrong shape is rejected
/// assert!(StationCode::parse("AB1").is_err());
/// assert!(StationCode::parse("A011").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationCode([u8; 3]);

impl StationCode {
    /// Parse a station code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidStationCode {
                reason: "must be exactly 3 characters",
            });
        }

        if !bytes[0].is_ascii_uppercase() {
            return Err(InvalidStationCode {
                reason: "must start with an uppercase ASCII letter",
            });
        }

        if !bytes[1..].iter().all(u8::is_ascii_digit) {
            return Err(InvalidStationCode {
                reason: "must end with two ASCII digits",
            });
        }

        Ok(StationCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII letters and digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StationCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A rail station from the station directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Human-readable station name, e.g. "Union Station".
    pub name: String,
    /// Station code used for live predictions.
    pub code: StationCode,
    /// Platform location.
    pub coordinates: Coordinates,
}

impl Station {
    pub fn new(name: impl Into<String>, code: StationCode, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            code,
            coordinates,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any letter-digit-digit string parses and round-trips through as_str
        #[test]
        fn valid_always_parses(s in "[A-Z][0-9]{2}") {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Wrong-length strings are always rejected
        #[test]
        fn wrong_length_rejected(s in "[A-Z0-9]{0,2}|[A-Z0-9]{4,8}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }

        /// A leading digit is always rejected
        #[test]
        fn leading_digit_rejected(s in "[0-9][0-9]{2}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }
    }
}
