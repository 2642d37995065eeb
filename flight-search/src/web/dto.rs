//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Fare, Flight};

/// Date format accepted for request dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time format used for response timestamps.
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Fewest passengers the endpoint accepts.
const MIN_PASSENGERS: i64 = 1;

/// Most passengers the endpoint accepts.
const MAX_PASSENGERS: i64 = 4;

/// Request to search for flights.
///
/// Every field is optional on the wire so that a missing field is reported
/// by [`FlightSearchRequest::validate`] alongside every other problem,
/// rather than as a bare JSON error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchRequest {
    /// Origin IATA code
    pub origin: Option<String>,

    /// Destination IATA code
    pub destination: Option<String>,

    /// Outbound date, `yyyy-MM-dd`
    pub departure_date: Option<String>,

    /// Optional return date, `yyyy-MM-dd`
    pub return_date: Option<String>,

    pub number_of_passengers: Option<i64>,
}

/// A request that passed structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSearch {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub passengers: u32,
}

/// A structural problem with one request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FlightSearchRequest {
    /// Check field presence and format.
    ///
    /// Codes must already be 3 uppercase letters; business rules are left
    /// to the domain.
    pub fn validate(&self) -> Result<ValidatedSearch, Vec<FieldError>> {
        let mut errors = Vec::new();

        let origin = required_code(
            "origin",
            self.origin.as_deref(),
            "Origin is required",
            "Origin must be a 3-letter IATA code",
            &mut errors,
        );
        let destination = required_code(
            "destination",
            self.destination.as_deref(),
            "Destination is required",
            "Destination must be a 3-letter IATA code",
            &mut errors,
        );

        let departure_date = match self.departure_date.as_deref() {
            None => {
                errors.push(FieldError {
                    field: "departureDate",
                    message: "Departure date is required",
                });
                None
            }
            Some(s) => parse_date("departureDate", s, &mut errors),
        };

        let return_date = self
            .return_date
            .as_deref()
            .and_then(|s| parse_date("returnDate", s, &mut errors));

        let passengers = match self.number_of_passengers {
            None => {
                errors.push(FieldError {
                    field: "numberOfPassengers",
                    message: "Number of passengers is required",
                });
                None
            }
            Some(n) if n < MIN_PASSENGERS => {
                errors.push(FieldError {
                    field: "numberOfPassengers",
                    message: "Number of passengers must be at least 1",
                });
                None
            }
            Some(n) if n > MAX_PASSENGERS => {
                errors.push(FieldError {
                    field: "numberOfPassengers",
                    message: "Number of passengers must be at most 4",
                });
                None
            }
            Some(n) => u32::try_from(n).ok(),
        };

        match (origin, destination, departure_date, passengers) {
            (Some(origin), Some(destination), Some(departure_date), Some(passengers))
                if errors.is_empty() =>
            {
                Ok(ValidatedSearch {
                    origin,
                    destination,
                    departure_date,
                    return_date,
                    passengers,
                })
            }
            _ => Err(errors),
        }
    }
}

fn required_code(
    field: &'static str,
    value: Option<&str>,
    missing: &'static str,
    malformed: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        None => {
            errors.push(FieldError {
                field,
                message: missing,
            });
            None
        }
        Some(s) if s.trim().is_empty() => {
            errors.push(FieldError {
                field,
                message: missing,
            });
            None
        }
        Some(s) if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_uppercase()) => {
            errors.push(FieldError {
                field,
                message: malformed,
            });
            None
        }
        Some(s) => Some(s.to_string()),
    }
}

fn parse_date(field: &'static str, s: &str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(s, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError {
                field,
                message: "Date must be in yyyy-MM-dd format",
            });
            None
        }
    }
}

/// Join field errors as `field: message, field: message`.
pub fn describe_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A flight in search results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightResult {
    pub airline: String,

    /// Supplier the offer came from
    pub supplier: String,

    /// Fare with two decimal places
    pub fare: Fare,

    pub departure_airport_code: String,

    pub destination_airport_code: String,

    /// Departure, `yyyy-MM-ddTHH:mm:ss`
    pub departure_date: String,

    /// Arrival, `yyyy-MM-ddTHH:mm:ss`
    pub arrival_date: String,
}

impl FlightResult {
    /// Create from a domain Flight.
    pub fn from_flight(flight: &Flight) -> Self {
        Self {
            airline: flight.airline.clone(),
            supplier: flight.supplier.clone(),
            fare: flight.fare,
            departure_airport_code: flight.departure_airport.to_string(),
            destination_airport_code: flight.destination_airport.to_string(),
            departure_date: flight.departure.format(DATE_TIME_FORMAT).to_string(),
            arrival_date: flight.arrival.format(DATE_TIME_FORMAT).to_string(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,

    /// Reason phrase for the status
    pub error: String,

    /// What went wrong
    pub message: String,

    /// Request path
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AirportCode;
    use rust_decimal::Decimal;

    fn request() -> FlightSearchRequest {
        FlightSearchRequest {
            origin: Some("LHR".into()),
            destination: Some("AMS".into()),
            departure_date: Some("2023-01-01".into()),
            return_date: Some("2023-01-02".into()),
            number_of_passengers: Some(2),
        }
    }

    #[test]
    fn valid_request() {
        let validated = request().validate().unwrap();

        assert_eq!(validated.origin, "LHR");
        assert_eq!(validated.destination, "AMS");
        assert_eq!(
            validated.departure_date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(validated.return_date, NaiveDate::from_ymd_opt(2023, 1, 2));
        assert_eq!(validated.passengers, 2);
    }

    #[test]
    fn deserializes_camel_case() {
        let req: FlightSearchRequest = serde_json::from_str(
            r#"{"origin":"LHR","destination":"AMS","departureDate":"2023-01-01","numberOfPassengers":1}"#,
        )
        .unwrap();

        let validated = req.validate().unwrap();
        assert_eq!(validated.return_date, None);
        assert_eq!(validated.passengers, 1);
    }

    #[test]
    fn missing_fields_reported_together() {
        let errors = FlightSearchRequest::default().validate().unwrap_err();

        assert_eq!(
            describe_field_errors(&errors),
            "origin: Origin is required, destination: Destination is required, \
             departureDate: Departure date is required, \
             numberOfPassengers: Number of passengers is required"
        );
    }

    #[test]
    fn lowercase_code_rejected() {
        let errors = FlightSearchRequest {
            origin: Some("lhr".into()),
            ..request()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            errors,
            vec![FieldError {
                field: "origin",
                message: "Origin must be a 3-letter IATA code",
            }]
        );
    }

    #[test]
    fn passenger_bounds() {
        for (n, message) in [
            (0, "Number of passengers must be at least 1"),
            (-3, "Number of passengers must be at least 1"),
            (5, "Number of passengers must be at most 4"),
        ] {
            let errors = FlightSearchRequest {
                number_of_passengers: Some(n),
                ..request()
            }
            .validate()
            .unwrap_err();
            assert_eq!(errors[0].message, message);
        }

        for n in 1..=4 {
            let req = FlightSearchRequest {
                number_of_passengers: Some(n),
                ..request()
            };
            assert!(req.validate().is_ok());
        }
    }

    #[test]
    fn malformed_dates_rejected() {
        let errors = FlightSearchRequest {
            departure_date: Some("01/01/2023".into()),
            return_date: Some("2023-13-01".into()),
            ..request()
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            describe_field_errors(&errors),
            "departureDate: Date must be in yyyy-MM-dd format, returnDate: Date must be in yyyy-MM-dd format"
        );
    }

    #[test]
    fn flight_result_format() {
        let departure = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap();
        let flight = Flight {
            airline: "KLM".into(),
            supplier: "ToughJet".into(),
            fare: Fare::new(Decimal::new(955, 1)).unwrap(),
            departure_airport: AirportCode::create("LHR").unwrap(),
            destination_airport: AirportCode::create("AMS").unwrap(),
            departure,
            arrival: departure + chrono::Duration::hours(2),
        };

        let value = serde_json::to_value(FlightResult::from_flight(&flight)).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "airline": "KLM",
                "supplier": "ToughJet",
                "fare": serde_json::from_str::<serde_json::Value>("95.50").unwrap(),
                "departureAirportCode": "LHR",
                "destinationAirportCode": "AMS",
                "departureDate": "2023-01-01T11:00:00",
                "arrivalDate": "2023-01-01T13:00:00"
            })
        );
    }
}
