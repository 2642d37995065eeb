//! Supplier client error types.

use crate::domain::{InvalidAirportCode, InvalidFare};

/// Errors from fetching or normalizing one supplier's offers.
///
/// These never reach the caller of a search: a supplier client logs them
/// and contributes no flights instead.
#[derive(Debug, thiserror::Error)]
pub enum SupplierError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Supplier returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response carried a malformed airport code
    #[error("invalid airport code: {0}")]
    InvalidAirportCode(#[from] InvalidAirportCode),

    /// Response carried a price that cannot be turned into a fare
    #[error("invalid fare: {0}")]
    InvalidFare(#[from] InvalidFare),

    /// Response carried a timestamp in an unexpected format
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Client could not be configured
    #[error("not configured: {0}")]
    NotConfigured(String),
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
