//! Opaque feed record identifier.
//!
//! [`EventId`] is a 9-character lowercase base-36 token. It is generated
//! once when a record is synthesized and keys the record's enter/exit
//! transition in the feed renderer, so it must stay stable for as long as
//! the record is present in the log.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of base-36 digits in a rendered [`EventId`].
pub const EVENT_ID_LEN: usize = 9;

/// Exclusive upper bound of the raw identifier value (`36^9`).
pub const EVENT_ID_SPACE: u64 = 101_559_956_668_416;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier of one synthesized feed record.
///
/// Stored as an integer below [`EVENT_ID_SPACE`] and displayed as a
/// zero-padded base-36 token, e.g. `"0k3x9a2bq"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(u64);

/// Error returned when parsing an [`EventId`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid event id {0:?}: expected {EVENT_ID_LEN} base-36 characters")]
pub struct ParseEventIdError(String);

impl EventId {
    /// Creates an `EventId` from a raw value, reducing it into the id space.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw % EVENT_ID_SPACE)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = [b'0'; EVENT_ID_LEN];
        let mut value = self.0;
        for slot in digits.iter_mut().rev() {
            let digit = usize::try_from(value % 36).unwrap_or_default();
            *slot = ALPHABET.get(digit).copied().unwrap_or(b'0');
            value /= 36;
        }
        for byte in digits {
            write!(f, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl FromStr for EventId {
    type Err = ParseEventIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != EVENT_ID_LEN {
            return Err(ParseEventIdError(s.to_string()));
        }
        let mut value: u64 = 0;
        for c in s.chars() {
            let digit = c
                .to_digit(36)
                .filter(|_| !c.is_ascii_uppercase())
                .ok_or_else(|| ParseEventIdError(s.to_string()))?;
            value = value * 36 + u64::from(digit);
        }
        Ok(Self(value))
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
