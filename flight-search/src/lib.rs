//! Flight search aggregator.
//!
//! A web service that answers: "which flights match this search, across
//! every supplier, cheapest first?"

pub mod aggregator;
pub mod config;
pub mod domain;
pub mod supplier;
pub mod telemetry;
pub mod web;
