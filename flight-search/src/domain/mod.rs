//! Domain types for the flight search aggregator.
//!
//! This module contains the canonical, supplier-agnostic model. All types
//! enforce their invariants at construction time, so code that receives
//! these types can trust their validity.

mod airport;
mod criteria;
mod error;
mod flight;

pub use airport::{AirportCode, InvalidAirportCode};
pub use criteria::SearchCriteria;
pub use error::InvalidSearchCriteria;
pub use flight::{Fare, Flight, InvalidFare};
