//! Flight search across all registered suppliers.
//!
//! A search validates its criteria, queries every supplier concurrently,
//! waits for all of them, and returns the merged offers cheapest first.

use std::sync::Arc;

use futures::future::join_all;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::domain::{Flight, InvalidSearchCriteria, SearchCriteria};
use crate::supplier::SupplierClient;

use super::config::AggregatorConfig;

/// Error from an aggregated search.
///
/// Supplier failures never appear here; only the request itself can be
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The criteria break a business rule
    #[error("{0}")]
    InvalidCriteria(#[from] InvalidSearchCriteria),
}

/// Aggregates flight offers from a fixed set of suppliers.
///
/// The supplier list is read-only after construction and shared by every
/// search. No search carries state into the next.
pub struct AggregationService {
    suppliers: Vec<Arc<dyn SupplierClient>>,
    config: AggregatorConfig,
}

impl AggregationService {
    /// Create a service over the given suppliers.
    ///
    /// Supplier order decides the order of equally priced offers.
    pub fn new(suppliers: Vec<Arc<dyn SupplierClient>>, config: AggregatorConfig) -> Self {
        Self { suppliers, config }
    }

    /// Names of the registered suppliers, in registration order.
    pub fn supplier_names(&self) -> Vec<&str> {
        self.suppliers.iter().map(|s| s.name()).collect()
    }

    /// Search all suppliers and return their offers sorted by fare.
    ///
    /// Fails only when `criteria` is rejected. If every supplier fails the
    /// result is an empty list.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Flight>, SearchError> {
        if let Err(e) = self.validate(criteria) {
            warn!(error = %e, "Rejected search criteria");
            return Err(e.into());
        }

        info!(
            origin = %criteria.origin(),
            destination = %criteria.destination(),
            departure_date = %criteria.departure_date(),
            passengers = criteria.passengers(),
            suppliers = self.suppliers.len(),
            "Searching flights"
        );

        let mut flights = self.collect_from_suppliers(criteria).await;
        sort_by_fare(&mut flights);

        info!(flights = flights.len(), "Flight search complete");

        Ok(flights)
    }

    /// Check the business rules a search must satisfy.
    pub fn validate(&self, criteria: &SearchCriteria) -> Result<(), InvalidSearchCriteria> {
        let passengers = criteria.passengers();
        let (min, max) = (self.config.min_passengers, self.config.max_passengers);

        if passengers < min || passengers > max {
            return Err(InvalidSearchCriteria::new(format!(
                "Number of passengers must be between {min} and {max}"
            )));
        }

        if criteria.origin().as_str().trim().is_empty() {
            return Err(InvalidSearchCriteria::new(
                "Origin airport code cannot be empty",
            ));
        }

        if criteria.destination().as_str().trim().is_empty() {
            return Err(InvalidSearchCriteria::new(
                "Destination airport code cannot be empty",
            ));
        }

        if criteria.origin() == criteria.destination() {
            return Err(InvalidSearchCriteria::new(
                "Origin and destination cannot be the same",
            ));
        }

        Ok(())
    }

    /// Query every supplier concurrently and concatenate their offers in
    /// registration order.
    ///
    /// Each supplier runs in its own task under its own timeout. A timeout
    /// or a panicking task contributes nothing.
    async fn collect_from_suppliers(&self, criteria: &SearchCriteria) -> Vec<Flight> {
        let criteria = Arc::new(criteria.clone());
        let per_supplier_timeout = self.config.per_supplier_timeout;

        let tasks = self.suppliers.iter().map(|supplier| {
            let name = supplier.name().to_string();
            let supplier = Arc::clone(supplier);
            let criteria = Arc::clone(&criteria);

            let handle = tokio::spawn(async move {
                timeout(per_supplier_timeout, supplier.search(&criteria)).await
            });

            async move {
                match handle.await {
                    Ok(Ok(flights)) => {
                        debug!(supplier = %name, flights = flights.len(), "Supplier answered");
                        flights
                    }
                    Ok(Err(_)) => {
                        error!(
                            supplier = %name,
                            timeout = ?per_supplier_timeout,
                            "Supplier timed out, using no flights"
                        );
                        Vec::new()
                    }
                    Err(e) => {
                        error!(supplier = %name, error = %e, "Supplier task failed, using no flights");
                        Vec::new()
                    }
                }
            }
        });

        join_all(tasks).await.into_iter().flatten().collect()
    }
}

/// Sort ascending by fare, keeping the merge order of equal fares.
fn sort_by_fare(flights: &mut [Flight]) {
    flights.sort_by_key(|f| f.fare);
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
