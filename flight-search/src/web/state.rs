//! Application state for the web layer.

use std::sync::Arc;

use crate::aggregator::AggregationService;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Flight search across all configured suppliers
    pub aggregator: Arc<AggregationService>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(aggregator: AggregationService) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}
