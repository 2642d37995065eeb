//! Canonical flight offers.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::airport::AirportCode;

/// Number of fraction digits every fare carries.
const FARE_SCALE: u32 = 2;

/// Error returned when an amount cannot be held as a fare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InvalidFare {
    message: String,
}

impl InvalidFare {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A fare amount, always held at exactly two decimal places.
///
/// Rounding is half-up (midpoint away from zero) and is applied once, on
/// construction, after any supplier-side arithmetic. Serializes as a JSON
/// number that keeps both fraction digits (`95.50`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Fare(#[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal);

impl Fare {
    /// Round an amount to a fare.
    ///
    /// Fails for amounts too large to carry two fraction digits.
    pub fn new(amount: Decimal) -> Result<Self, InvalidFare> {
        let mut rounded =
            amount.round_dp_with_strategy(FARE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        // round_dp never increases the scale, so pad shorter amounts.
        rounded.rescale(FARE_SCALE);

        // rescale leaves the scale short when the mantissa would overflow
        if rounded.scale() != FARE_SCALE {
            return Err(InvalidFare::new(format!("Fare out of range: {amount}")));
        }

        Ok(Fare(rounded))
    }

    /// The rounded amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A supplier-agnostic flight offer.
///
/// Only a supplier client's normalization step builds these; past that
/// boundary nothing knows which wire format the offer came from, except
/// the `supplier` name carried for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    /// Operating airline name.
    pub airline: String,

    /// Name of the supplier that returned this offer.
    pub supplier: String,

    /// Total fare.
    pub fare: Fare,

    pub departure_airport: AirportCode,

    pub destination_airport: AirportCode,

    /// Departure time as local wall-clock time.
    pub departure: NaiveDateTime,

    /// Arrival time as local wall-clock time.
    pub arrival: NaiveDateTime,
}
