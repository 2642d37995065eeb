//! Flight search aggregation.
//!
//! This module implements the core use case: validate a search, fan it out
//! to every registered supplier concurrently, tolerate any subset of them
//! failing, and merge the results into one fare-ordered list.

mod config;
mod service;

pub use config::AggregatorConfig;
pub use service::{AggregationService, SearchError};
