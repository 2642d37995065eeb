//! Flight search criteria.

use chrono::NaiveDate;

use super::airport::AirportCode;
use super::error::InvalidSearchCriteria;

/// The parameters of a single flight search.
///
/// Origin and destination always differ once constructed. The passenger
/// count is not range-checked here; the aggregator enforces its limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    origin: AirportCode,
    destination: AirportCode,
    departure_date: NaiveDate,
    return_date: Option<NaiveDate>,
    passengers: u32,
}

impl SearchCriteria {
    /// Create search criteria, rejecting identical origin and destination.
    pub fn new(
        origin: AirportCode,
        destination: AirportCode,
        departure_date: NaiveDate,
        return_date: Option<NaiveDate>,
        passengers: u32,
    ) -> Result<Self, InvalidSearchCriteria> {
        if origin == destination {
            return Err(InvalidSearchCriteria::new(
                "Origin and destination cannot be the same",
            ));
        }

        Ok(Self::new_unchecked(
            origin,
            destination,
            departure_date,
            return_date,
            passengers,
        ))
    }

    /// Build criteria without the origin/destination check.
    pub(crate) fn new_unchecked(
        origin: AirportCode,
        destination: AirportCode,
        departure_date: NaiveDate,
        return_date: Option<NaiveDate>,
        passengers: u32,
    ) -> Self {
        Self {
            origin,
            destination,
            departure_date,
            return_date,
            passengers,
        }
    }

    pub fn origin(&self) -> &AirportCode {
        &self.origin
    }

    pub fn destination(&self) -> &AirportCode {
        &self.destination
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    pub fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }

    /// Number of passengers travelling.
    pub fn passengers(&self) -> u32 {
        self.passengers
    }
}
