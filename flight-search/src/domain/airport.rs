//! Airport code types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InvalidAirportCode {
    message: String,
}

impl InvalidAirportCode {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A valid 3-letter IATA airport code.
///
/// Codes are trimmed and uppercased on construction, so `" lhr "` and
/// `"LHR"` produce the same value. Any `AirportCode` is valid by
/// construction.
///
/// # Examples
///
/// ```
/// use flight_search::domain::AirportCode;
///
/// let lhr = AirportCode::create(" lhr ").unwrap();
/// assert_eq!(lhr.as_str(), "LHR");
///
/// // Wrong length is rejected
/// assert!(AirportCode::create("LH").is_err());
///
/// // Digits are rejected
/// assert!(AirportCode::create("L1R").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    /// Validate and normalize a raw airport code.
    ///
    /// The trimmed input must be exactly 3 ASCII letters.
    pub fn create(raw: &str) -> Result<Self, InvalidAirportCode> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(InvalidAirportCode::new("Airport code cannot be blank"));
        }

        if trimmed.chars().count() != 3 {
            return Err(InvalidAirportCode::new(format!(
                "Airport code must be exactly 3 characters, got: {trimmed}"
            )));
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidAirportCode::new(format!(
                "Airport code must contain only letters, got: {trimmed}"
            )));
        }

        Ok(AirportCode(trimmed.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AirportCode {
    type Error = InvalidAirportCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AirportCode::create(&value)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.0
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.0)
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
