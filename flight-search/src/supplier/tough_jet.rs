//! ToughJet supplier client.
//!
//! ToughJet differs from the canonical model in three ways:
//! - The fare is split into base price, tax and a whole-number discount
//!   percentage that applies to the base price only
//! - Times are UTC instants (`...Z`), converted to UTC wall-clock time
//! - Field names follow its own vocabulary (`from`/`to`, `carrier`, ...)

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{AirportCode, Fare, Flight, InvalidFare, SearchCriteria};

use super::error::SupplierError;
use super::http::{JsonTransport, SupplierConfig};
use super::{REQUEST_DATE_FORMAT, SupplierClient, flights_or_empty};

/// Supplier name reported on ToughJet flights.
const SUPPLIER_NAME: &str = "ToughJet";

/// Request body for the ToughJet flight search endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToughJetRequest {
    from: String,
    to: String,
    outbound_date: String,
    inbound_date: Option<String>,
    number_of_adults: u32,
}

/// One offer in a ToughJet response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToughJetFlight {
    carrier: String,
    base_price: Decimal,
    tax: Decimal,
    /// Percentage off the base price, e.g. `5` for 5%.
    discount: Decimal,
    departure_airport_name: String,
    arrival_airport_name: String,
    /// UTC instant, `yyyy-MM-ddTHH:mm:ssZ`.
    outbound_date_time: String,
    /// UTC instant, `yyyy-MM-ddTHH:mm:ssZ`.
    inbound_date_time: String,
}

/// Client for the ToughJet flight search API.
#[derive(Debug, Clone)]
pub struct ToughJetClient {
    transport: JsonTransport,
}

impl ToughJetClient {
    /// Create a new ToughJet client with the given configuration.
    pub fn new(config: &SupplierConfig) -> Result<Self, SupplierError> {
        Ok(Self {
            transport: JsonTransport::new(config)?,
        })
    }

    /// Fetch and normalize offers, surfacing any failure.
    pub async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<Flight>, SupplierError> {
        let request = build_request(criteria);
        let response: Vec<ToughJetFlight> = self.transport.post_json(&request).await?;

        response.into_iter().map(convert_flight).collect()
    }
}

#[async_trait]
impl SupplierClient for ToughJetClient {
    fn name(&self) -> &str {
        SUPPLIER_NAME
    }

    async fn search(&self, criteria: &SearchCriteria) -> Vec<Flight> {
        info!(
            supplier = SUPPLIER_NAME,
            origin = %criteria.origin(),
            destination = %criteria.destination(),
            departure_date = %criteria.departure_date(),
            passengers = criteria.passengers(),
            "Searching flights"
        );

        flights_or_empty(SUPPLIER_NAME, self.fetch(criteria).await)
    }
}

fn build_request(criteria: &SearchCriteria) -> ToughJetRequest {
    ToughJetRequest {
        from: criteria.origin().to_string(),
        to: criteria.destination().to_string(),
        outbound_date: criteria
            .departure_date()
            .format(REQUEST_DATE_FORMAT)
            .to_string(),
        inbound_date: criteria
            .return_date()
            .map(|d| d.format(REQUEST_DATE_FORMAT).to_string()),
        number_of_adults: criteria.passengers(),
    }
}

/// Total fare: base price plus tax, less the discount on the base price.
fn total_fare(
    base_price: Decimal,
    tax: Decimal,
    discount_percent: Decimal,
) -> Result<Fare, SupplierError> {
    let total = base_price
        .checked_mul(discount_percent)
        .and_then(|d| d.checked_div(Decimal::ONE_HUNDRED))
        .and_then(|discount| base_price.checked_add(tax)?.checked_sub(discount))
        .ok_or_else(|| {
            InvalidFare::new(format!(
                "Fare overflows: base price {base_price}, tax {tax}, discount {discount_percent}%"
            ))
        })?;

    Ok(Fare::new(total)?)
}

fn convert_flight(raw: ToughJetFlight) -> Result<Flight, SupplierError> {
    Ok(Flight {
        airline: raw.carrier,
        supplier: SUPPLIER_NAME.to_string(),
        fare: total_fare(raw.base_price, raw.tax, raw.discount)?,
        departure_airport: AirportCode::create(&raw.departure_airport_name)?,
        destination_airport: AirportCode::create(&raw.arrival_airport_name)?,
        departure: parse_utc(&raw.outbound_date_time)?,
        arrival: parse_utc(&raw.inbound_date_time)?,
    })
}

/// Parse a UTC instant into UTC wall-clock time.
fn parse_utc(s: &str) -> Result<NaiveDateTime, SupplierError> {
    s.parse::<DateTime<Utc>>()
        .map(|instant| instant.naive_utc())
        .map_err(|e| SupplierError::InvalidTimestamp(format!("{s}: {e}")))
}
