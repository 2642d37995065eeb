//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;

use crate::aggregator::AggregatorConfig;
use crate::supplier::SupplierConfig;

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Default CrazyAir base URL (local stub).
const DEFAULT_CRAZYAIR_URL: &str = "http://localhost:8090/crazyair";

/// Default ToughJet base URL (local stub).
const DEFAULT_TOUGHJET_URL: &str = "http://localhost:8090/toughjet";

/// Default flight search endpoint path for both suppliers.
const DEFAULT_FLIGHTS_ENDPOINT: &str = "/flights";

/// Default per-supplier timeout in seconds.
const DEFAULT_SUPPLIER_TIMEOUT_SECS: u64 = 10;

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on (`FLIGHT_SEARCH_ADDR`)
    pub addr: SocketAddr,

    /// CrazyAir endpoint (`CRAZYAIR_URL`, `CRAZYAIR_FLIGHTS_ENDPOINT`)
    pub crazy_air: SupplierConfig,

    /// ToughJet endpoint (`TOUGHJET_URL`, `TOUGHJET_FLIGHTS_ENDPOINT`)
    pub tough_jet: SupplierConfig,

    /// Aggregation rules (`SUPPLIER_TIMEOUT_SECS`)
    pub aggregator: AggregatorConfig,

    /// Serve built-in sample flights instead of calling suppliers
    /// (`FLIGHT_SEARCH_MOCK`)
    pub mock: bool,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_raw = lookup("FLIGHT_SEARCH_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError {
            key: "FLIGHT_SEARCH_ADDR",
            value: addr_raw.clone(),
            reason: e.to_string(),
        })?;

        let timeout_secs = match lookup("SUPPLIER_TIMEOUT_SECS") {
            None => DEFAULT_SUPPLIER_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError {
                        key: "SUPPLIER_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be positive".to_string(),
                    });
                }
                Ok(secs) => secs,
                Err(e) => {
                    return Err(ConfigError {
                        key: "SUPPLIER_TIMEOUT_SECS",
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            },
        };

        let supplier = |url_key: &str, endpoint_key: &str, default_url: &str| {
            let base_url = lookup(url_key).unwrap_or_else(|| {
                warn!(key = url_key, default = default_url, "Supplier URL not set, using default");
                default_url.to_string()
            });
            let endpoint =
                lookup(endpoint_key).unwrap_or_else(|| DEFAULT_FLIGHTS_ENDPOINT.to_string());
            SupplierConfig::new(base_url)
                .with_endpoint(endpoint)
                .with_timeout(timeout_secs)
        };

        let crazy_air = supplier("CRAZYAIR_URL", "CRAZYAIR_FLIGHTS_ENDPOINT", DEFAULT_CRAZYAIR_URL);
        let tough_jet = supplier("TOUGHJET_URL", "TOUGHJET_FLIGHTS_ENDPOINT", DEFAULT_TOUGHJET_URL);

        let mock = lookup("FLIGHT_SEARCH_MOCK")
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        Ok(Self {
            addr,
            crazy_air,
            tough_jet,
            aggregator: AggregatorConfig::default()
                .with_per_supplier_timeout(Duration::from_secs(timeout_secs)),
            mock,
        })
    }
}
