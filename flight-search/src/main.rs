use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use flight_search::aggregator::AggregationService;
use flight_search::config::AppConfig;
use flight_search::domain::{AirportCode, Fare, Flight};
use flight_search::supplier::{CrazyAirClient, StaticSupplier, SupplierClient, ToughJetClient};
use flight_search::telemetry;
use flight_search::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    telemetry::init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Registration order decides the order of equally priced offers
    let suppliers: Vec<Arc<dyn SupplierClient>> = if config.mock {
        info!("FLIGHT_SEARCH_MOCK set, serving sample flights");
        let today = Local::now().date_naive();
        vec![
            Arc::new(StaticSupplier::new("CrazyAir", sample_flights("CrazyAir", today))),
            Arc::new(StaticSupplier::new("ToughJet", sample_flights("ToughJet", today))),
        ]
    } else {
        let crazy_air =
            CrazyAirClient::new(&config.crazy_air).expect("Failed to create CrazyAir client");
        let tough_jet =
            ToughJetClient::new(&config.tough_jet).expect("Failed to create ToughJet client");
        let crazy_air: Arc<dyn SupplierClient> = Arc::new(crazy_air);
        let tough_jet: Arc<dyn SupplierClient> = Arc::new(tough_jet);
        vec![crazy_air, tough_jet]
    };

    let aggregator = AggregationService::new(suppliers, config.aggregator.clone());
    info!(suppliers = ?aggregator.supplier_names(), "Suppliers registered");

    let app = create_router(AppState::new(aggregator));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.addr, "Flight search listening");
    info!("  GET  /health          - Health check");
    info!("  POST /flights/search  - Search all suppliers");

    axum::serve(listener, app).await.expect("Server error");
}

/// A few LHR-AMS offers for running without supplier APIs.
fn sample_flights(supplier: &str, date: NaiveDate) -> Vec<Flight> {
    let (Ok(lhr), Ok(ams)) = (AirportCode::create("LHR"), AirportCode::create("AMS")) else {
        return Vec::new();
    };

    [("British Airways", 8, 12_000), ("KLM", 13, 9_550), ("easyJet", 18, 6_499)]
        .into_iter()
        .filter_map(|(airline, hour, cents)| {
            let departure = date.and_hms_opt(hour, 0, 0)?;
            let fare = Fare::new(Decimal::new(cents, 2)).ok()?;
            Some(Flight {
                airline: airline.to_string(),
                supplier: supplier.to_string(),
                fare,
                departure_airport: lhr.clone(),
                destination_airport: ams.clone(),
                departure,
                arrival: departure + Duration::minutes(75),
            })
        })
        .collect()
}
