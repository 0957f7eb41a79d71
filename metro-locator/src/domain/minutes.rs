//! Minutes-to-arrival values from live predictions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker written for arrivals whose time is not known.
const UNKNOWN_MARKER: &str = "N";

/// Minutes until a train arrives.
///
/// The live feed reports arrivals as free text: a number of minutes,
/// `ARR`/`BRD` for trains arriving or boarding now, or anything else
/// (`---`, `DLY`, blanks) when no estimate exists. Unknown arrivals are
/// kept rather than dropped, and order after every known value.
///
/// # Examples
///
/// ```
/// use metro_locator::domain::Minutes;
///
/// assert_eq!(Minutes::parse("ARR"), Minutes::Known(0));
/// assert_eq!(Minutes::parse("12"), Minutes::Known(12));
/// assert_eq!(Minutes::parse("Delayed"), Minutes::Unknown);
/// assert!(Minutes::Known(99) < Minutes::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "MinutesRepr", from = "MinutesRepr")]
pub enum Minutes {
    /// Estimated whole minutes until arrival.
    Known(u32),
    /// No usable estimate.
    Unknown,
}

impl Minutes {
    /// Normalise a raw arrival field from the live feed.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if raw.eq_ignore_ascii_case("ARR") || raw.eq_ignore_ascii_case("BRD") {
            return Minutes::Known(0);
        }

        raw.parse::<u32>()
            .map(Minutes::Known)
            .unwrap_or(Minutes::Unknown)
    }

    /// Returns the number of minutes, if known.
    pub fn known(&self) -> Option<u32> {
        match self {
            Minutes::Known(m) => Some(*m),
            Minutes::Unknown => None,
        }
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Minutes::Known(m) => write!(f, "{m}"),
            Minutes::Unknown => f.write_str(UNKNOWN_MARKER),
        }
    }
}

/// Wire form: a JSON integer, or a string marker for unknown arrivals.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MinutesRepr {
    Known(u32),
    Marker(String),
}

impl From<Minutes> for MinutesRepr {
    fn from(minutes: Minutes) -> Self {
        match minutes {
            Minutes::Known(m) => MinutesRepr::Known(m),
            Minutes::Unknown => MinutesRepr::Marker(UNKNOWN_MARKER.to_string()),
        }
    }
}

impl From<MinutesRepr> for Minutes {
    fn from(repr: MinutesRepr) -> Self {
        match repr {
            MinutesRepr::Known(m) => Minutes::Known(m),
            MinutesRepr::Marker(_) => Minutes::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arriving_and_boarding_are_zero() {
        assert_eq!(Minutes::parse("ARR"), Minutes::Known(0));
        assert_eq!(Minutes::parse("arr"), Minutes::Known(0));
        assert_eq!(Minutes::parse("BRD"), Minutes::Known(0));
    }

    #[test]
    fn integers_parse() {
        assert_eq!(Minutes::parse("12"), Minutes::Known(12));
        assert_eq!(Minutes::parse(" 3 "), Minutes::Known(3));
        assert_eq!(Minutes::parse("0"), Minutes::Known(0));
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(Minutes::parse("Delayed"), Minutes::Unknown);
        assert_eq!(Minutes::parse("---"), Minutes::Unknown);
        assert_eq!(Minutes::parse(""), Minutes::Unknown);
        assert_eq!(Minutes::parse("DLY"), Minutes::Unknown);
    }

    #[test]
    fn unknown_sorts_last() {
        let mut values = vec![
            Minutes::Unknown,
            Minutes::Known(7),
            Minutes::Known(0),
            Minutes::Unknown,
            Minutes::Known(3),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Minutes::Known(0),
                Minutes::Known(3),
                Minutes::Known(7),
                Minutes::Unknown,
                Minutes::Unknown,
            ]
        );
    }

    #[test]
    fn display() {
        assert_eq!(Minutes::Known(5).to_string(), "5");
        assert_eq!(Minutes::Unknown.to_string(), "N");
    }

    #[test]
    fn json_form() {
        assert_eq!(serde_json::to_string(&Minutes::Known(4)).unwrap(), "4");
        assert_eq!(serde_json::to_string(&Minutes::Unknown).unwrap(), "\"N\"");

        let values: Vec<Minutes> = serde_json::from_str(r#"[1, "N", 2]"#).unwrap();
        assert_eq!(
            values,
            vec![Minutes::Known(1), Minutes::Unknown, Minutes::Known(2)]
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every non-negative integer string parses to itself
        #[test]
        fn integer_strings_parse(n in 0u32..100_000) {
            prop_assert_eq!(Minutes::parse(&n.to_string()), Minutes::Known(n));
        }

        /// Alphabetic text other than ARR/BRD is always unknown
        #[test]
        fn text_is_unknown(s in "[A-Za-z]{4,10}") {
            prop_assert_eq!(Minutes::parse(&s), Minutes::Unknown);
        }

        /// Unknown orders after every known value
        #[test]
        fn unknown_after_known(n in any::<u32>()) {
            prop_assert!(Minutes::Known(n) < Minutes::Unknown);
        }
    }
}
