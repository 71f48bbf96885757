//! Simulated customer identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest customer number the simulator produces.
pub const MAX_CUSTOMER_NUMBER: u16 = 999;

/// Customer identifier rendered as `USER-<n>` with `n` in `0..=999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomerId(u16);

/// Error returned when a string is not a valid `USER-<n>` identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid customer id {0:?}: expected USER-<0..999>")]
pub struct ParseCustomerIdError(String);

impl CustomerId {
    /// `USER-0`.
    pub const MIN: Self = Self(0);

    /// Creates a customer id, returning `None` when `number` exceeds
    /// [`MAX_CUSTOMER_NUMBER`].
    #[must_use]
    pub const fn new(number: u16) -> Option<Self> {
        if number > MAX_CUSTOMER_NUMBER {
            None
        } else {
            Some(Self(number))
        }
    }

    /// Returns the numeric part.
    #[must_use]
    pub const fn number(self) -> u16 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "USER-{}", self.0)
    }
}

impl FromStr for CustomerId {
    type Err = ParseCustomerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCustomerIdError(s.to_string());
        let digits = s.strip_prefix("USER-").ok_or_else(err)?;
        // Reject "+1", "007" and friends so the rendered form is canonical.
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || (digits.len() > 1 && digits.starts_with('0'))
        {
            return Err(err());
        }
        let number: u16 = digits.parse().map_err(|_| err())?;
        Self::new(number).ok_or_else(err)
    }
}

impl Serialize for CustomerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CustomerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
