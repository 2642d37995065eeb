//! CrazyAir supplier client.
//!
//! CrazyAir quotes a final price and reports local date-times without an
//! offset, so its records map onto [`Flight`] almost field for field.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{AirportCode, Fare, Flight, SearchCriteria};

use super::error::SupplierError;
use super::http::{JsonTransport, SupplierConfig};
use super::{REQUEST_DATE_FORMAT, SupplierClient, flights_or_empty};

/// Supplier name reported on CrazyAir flights.
const SUPPLIER_NAME: &str = "CrazyAir";

/// Date-time format of CrazyAir responses.
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Request body for the CrazyAir flight search endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CrazyAirRequest {
    origin: String,
    destination: String,
    departure_date: String,
    return_date: Option<String>,
    passenger_count: u32,
}

/// One offer in a CrazyAir response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrazyAirFlight {
    airline: String,
    /// Final price, already including tax.
    price: Decimal,
    departure_airport_code: String,
    destination_airport_code: String,
    /// Local time, `yyyy-MM-ddTHH:mm:ss`.
    departure_date: String,
    /// Local time, `yyyy-MM-ddTHH:mm:ss`.
    arrival_date: String,
}

/// Client for the CrazyAir flight search API.
#[derive(Debug, Clone)]
pub struct CrazyAirClient {
    transport: JsonTransport,
}

impl CrazyAirClient {
    /// Create a new CrazyAir client with the given configuration.
    pub fn new(config: &SupplierConfig) -> Result<Self, SupplierError> {
        Ok(Self {
            transport: JsonTransport::new(config)?,
        })
    }

    /// Fetch and normalize offers, surfacing any failure.
    pub async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<Flight>, SupplierError> {
        let request = build_request(criteria);
        let response: Vec<CrazyAirFlight> = self.transport.post_json(&request).await?;

        response.into_iter().map(convert_flight).collect()
    }
}

#[async_trait]
impl SupplierClient for CrazyAirClient {
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

fn build_request(criteria: &SearchCriteria) -> CrazyAirRequest {
    CrazyAirRequest {
        origin: criteria.origin().to_string(),
        destination: criteria.destination().to_string(),
        departure_date: criteria
            .departure_date()
            .format(REQUEST_DATE_FORMAT)
            .to_string(),
        return_date: criteria
            .return_date()
            .map(|d| d.format(REQUEST_DATE_FORMAT).to_string()),
        passenger_count: criteria.passengers(),
    }
}

fn convert_flight(raw: CrazyAirFlight) -> Result<Flight, SupplierError> {
    Ok(Flight {
        airline: raw.airline,
        supplier: SUPPLIER_NAME.to_string(),
        fare: Fare::new(raw.price)?,
        departure_airport: AirportCode::create(&raw.departure_airport_code)?,
        destination_airport: AirportCode::create(&raw.destination_airport_code)?,
        departure: parse_local(&raw.departure_date)?,
        arrival: parse_local(&raw.arrival_date)?,
    })
}

fn parse_local(s: &str) -> Result<NaiveDateTime, SupplierError> {
    NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .map_err(|e| SupplierError::InvalidTimestamp(format!("{s}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn criteria(return_date: Option<NaiveDate>) -> SearchCriteria {
        SearchCriteria::new(
            AirportCode::create("LHR").unwrap(),
            AirportCode::create("AMS").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            return_date,
            2,
        )
        .unwrap()
    }

    fn offer(price: serde_json::Value, from: &str) -> serde_json::Value {
        json!({
            "airline": "British Airways",
            "price": price,
            "cabinclass": "E",
            "departureAirportCode": from,
            "destinationAirportCode": "AMS",
            "departureDate": "2023-01-01T10:00:00",
            "arrivalDate": "2023-01-01T12:00:00"
        })
    }

    fn client_for(server: &MockServer) -> CrazyAirClient {
        CrazyAirClient::new(&SupplierConfig::new(format!("{}/crazyair", server.uri()))).unwrap()
    }

    #[test]
    fn request_uses_crazy_air_field_names() {
        let request = build_request(&criteria(NaiveDate::from_ymd_opt(2023, 1, 2)));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "origin": "LHR",
                "destination": "AMS",
                "departureDate": "2023-01-01",
                "returnDate": "2023-01-02",
                "passengerCount": 2
            })
        );
    }

    #[test]
    fn one_way_request_sends_null_return_date() {
        let value = serde_json::to_value(build_request(&criteria(None))).unwrap();
        assert_eq!(value["returnDate"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn normalizes_offers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/crazyair/flights"))
            .and(body_json(json!({
                "origin": "LHR",
                "destination": "AMS",
                "departureDate": "2023-01-01",
                "returnDate": null,
                "passengerCount": 2
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([offer(json!(100.005), "lhr")])))
            .expect(1)
            .mount(&server)
            .await;

        let flights = client_for(&server).search(&criteria(None)).await;

        assert_eq!(flights.len(), 1);
        let flight = &flights[0];
        assert_eq!(flight.airline, "British Airways");
        assert_eq!(flight.supplier, "CrazyAir");
        assert_eq!(flight.fare.to_string(), "100.01");
        assert_eq!(flight.departure_airport.as_str(), "LHR");
        assert_eq!(flight.destination_airport.as_str(), "AMS");
        assert_eq!(
            flight.departure,
            NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
        assert_eq!(
            flight.arrival,
            NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );
    }

    #[tokio::test]
    async fn server_error_yields_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.search(&criteria(None)).await.is_empty());
        assert!(matches!(
            client.fetch(&criteria(None)).await,
            Err(SupplierError::Api { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_price_invalidates_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                offer(json!(100.0), "LHR"),
                offer(json!("not-a-price"), "LHR"),
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.search(&criteria(None)).await.is_empty());
        assert!(matches!(
            client.fetch(&criteria(None)).await,
            Err(SupplierError::Json { .. })
        ));
    }

    #[tokio::test]
    async fn invalid_airport_code_invalidates_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                offer(json!(100.0), "LHR"),
                offer(json!(90.0), "L1"),
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.fetch(&criteria(None)).await,
            Err(SupplierError::InvalidAirportCode(_))
        ));
        assert!(client.search(&criteria(None)).await.is_empty());
    }

    #[test]
    fn rejects_offset_timestamps() {
        assert!(parse_local("2023-01-01T10:00:00Z").is_err());
        assert!(parse_local("2023-01-01 10:00:00").is_err());
        assert!(parse_local("2023-01-01T10:00:00").is_ok());
    }

    #[tokio::test]
    async fn price_beyond_fare_range_invalidates_batch() {
        let server = MockServer::start().await;
        let body = r#"[{
            "airline": "British Airways",
            "price": 79228162514264337593543950335,
            "departureAirportCode": "LHR",
            "destinationAirportCode": "AMS",
            "departureDate": "2023-01-01T10:00:00",
            "arrivalDate": "2023-01-01T12:00:00"
        }]"#;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.fetch(&criteria(None)).await,
            Err(SupplierError::InvalidFare(_))
        ));
        assert!(client.search(&criteria(None)).await.is_empty());
    }
}
