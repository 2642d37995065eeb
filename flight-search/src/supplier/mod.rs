//! Flight supplier clients.
//!
//! Each supplier exposes its own HTTP API with its own request and response
//! shape. A [`SupplierClient`] hides that behind one contract: take
//! [`SearchCriteria`], return canonical [`Flight`]s.
//!
//! Key characteristics:
//! - Wire records are private to each supplier's module; only canonical
//!   flights leave it
//! - `search` never fails. Transport, status, parse and validation errors
//!   are logged with the supplier name and produce an empty result, so one
//!   broken supplier cannot hide another's offers
//! - A malformed record fails its whole supplier batch, not just itself

mod crazy_air;
mod error;
mod http;
mod static_supplier;
mod tough_jet;

use async_trait::async_trait;
use tracing::error;

use crate::domain::{Flight, SearchCriteria};

pub use crazy_air::CrazyAirClient;
pub use error::SupplierError;
pub use http::{JsonTransport, SupplierConfig};
pub use static_supplier::StaticSupplier;
pub use tough_jet::ToughJetClient;

/// Calendar date format used in supplier request bodies.
pub(crate) const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// A source of flight offers.
///
/// Implementations must be cheap to share across tasks; the aggregator
/// holds them as `Arc<dyn SupplierClient>` and calls them concurrently.
#[async_trait]
pub trait SupplierClient: Send + Sync {
    /// Supplier name, attached to every flight it returns.
    fn name(&self) -> &str;

    /// Search this supplier for flights matching `criteria`.
    ///
    /// Returns an empty vector on any failure.
    async fn search(&self, criteria: &SearchCriteria) -> Vec<Flight>;
}

/// Collapse a supplier result into flights, logging the failure case.
pub(crate) fn flights_or_empty(
    supplier: &str,
    result: Result<Vec<Flight>, SupplierError>,
) -> Vec<Flight> {
    match result {
        Ok(flights) => flights,
        Err(e) => {
            error!(supplier = %supplier, error = %e, "Supplier search failed, returning no flights");
            Vec::new()
        }
    }
}
