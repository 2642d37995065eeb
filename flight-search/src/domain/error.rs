//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from supplier/IO errors, which never leave the supplier layer.

/// A search request that business rules reject.
///
/// Raised by [`SearchCriteria::new`](super::SearchCriteria::new) when origin
/// equals destination, and by the aggregator for out-of-range passenger
/// counts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidSearchCriteria(pub String);

impl InvalidSearchCriteria {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The human-readable reason.
    pub fn message(&self) -> &str {
        &self.0
    }
}
