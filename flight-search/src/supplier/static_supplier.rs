//! In-process supplier for running without supplier APIs.
//!
//! Serves a fixed list of flights as if it were a live supplier. Used for
//! offline development (`FLIGHT_SEARCH_MOCK=1`) and in tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Flight, SearchCriteria};

use super::error::SupplierError;
use super::{SupplierClient, flights_or_empty};

/// Supplier that answers from memory.
#[derive(Debug, Clone)]
pub struct StaticSupplier {
    name: String,
    /// Offers to serve; `None` makes every search fail.
    flights: Option<Arc<Vec<Flight>>>,
    /// Artificial latency before answering.
    delay: Option<Duration>,
}

impl StaticSupplier {
    /// Create a supplier serving `flights`.
    ///
    /// Only flights matching the searched origin and destination are
    /// returned.
    pub fn new(name: impl Into<String>, flights: Vec<Flight>) -> Self {
        Self {
            name: name.into(),
            flights: Some(Arc::new(flights)),
            delay: None,
        }
    }

    /// Create a supplier whose every search fails.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flights: None,
            delay: None,
        }
    }

    /// Wait this long before answering each search.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer a search, surfacing the configured failure.
    pub async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<Flight>, SupplierError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let flights = self.flights.as_ref().ok_or_else(|| SupplierError::Api {
            status: 503,
            message: format!("{} is unavailable", self.name),
        })?;

        Ok(flights
            .iter()
            .filter(|f| {
                &f.departure_airport == criteria.origin()
                    && &f.destination_airport == criteria.destination()
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SupplierClient for StaticSupplier {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, criteria: &SearchCriteria) -> Vec<Flight> {
        flights_or_empty(&self.name, self.fetch(criteria).await)
    }
}
