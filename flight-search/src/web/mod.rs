//! Web layer for the flight search aggregator.
//!
//! Provides the HTTP endpoint for searching flights. Requests are checked
//! for structure here; business rules live in the domain and aggregator.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
