//! Aggregator configuration.

use std::time::Duration;

/// Configuration parameters for flight aggregation.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Fewest passengers a search may request.
    pub min_passengers: u32,

    /// Most passengers a search may request.
    pub max_passengers: u32,

    /// How long a single supplier may take before its contribution is
    /// dropped. Applies on top of the supplier's own HTTP timeout.
    pub per_supplier_timeout: Duration,
}

impl AggregatorConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(min_passengers: u32, max_passengers: u32, per_supplier_timeout: Duration) -> Self {
        Self {
            min_passengers,
            max_passengers,
            per_supplier_timeout,
        }
    }

    /// Set the per-supplier timeout.
    pub fn with_per_supplier_timeout(mut self, timeout: Duration) -> Self {
        self.per_supplier_timeout = timeout;
        self
    }

    /// Set the allowed passenger range.
    pub fn with_passenger_range(mut self, min: u32, max: u32) -> Self {
        self.min_passengers = min;
        self.max_passengers = max;
        self
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            min_passengers: 1,
            max_passengers: 4,
            per_supplier_timeout: Duration::from_secs(10),
        }
    }
}
