//! HTTP route handlers.

use std::panic::AssertUnwindSafe;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Request, State},
    http::{StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use futures::FutureExt;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::aggregator::SearchError;
use crate::domain::{AirportCode, SearchCriteria};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/flights/search", post(search_flights))
        .layer(middleware::from_fn(catch_panics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search all suppliers for flights.
async fn search_flights(
    State(state): State<AppState>,
    uri: Uri,
    body: Bytes,
) -> Result<Json<Vec<FlightResult>>, AppError> {
    let path = uri.path();

    // Parse JSON manually so malformed bodies get the standard error shape
    let req: FlightSearchRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(&body), "Unparseable search request");
        AppError::bad_request(path, format!("Invalid JSON: {e}"))
    })?;

    let search = req
        .validate()
        .map_err(|errors| AppError::bad_request(path, describe_field_errors(&errors)))?;

    debug!(
        origin = %search.origin,
        destination = %search.destination,
        "Searching flights"
    );

    let criteria = build_criteria(search).map_err(|message| AppError::bad_request(path, message))?;

    let flights = state
        .aggregator
        .search(&criteria)
        .await
        .map_err(|e| AppError::from_search(path, e))?;

    Ok(Json(flights.iter().map(FlightResult::from_flight).collect()))
}

/// Answer a panicking handler with a 500 in the standard error shape.
async fn catch_panics(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(_) => {
            error!(path = %path, "Request handler panicked");
            AppError::internal(&path).into_response()
        }
    }
}

/// Turn a structurally valid request into domain criteria.
fn build_criteria(search: ValidatedSearch) -> Result<SearchCriteria, String> {
    let origin = AirportCode::create(&search.origin).map_err(|e| e.to_string())?;
    let destination = AirportCode::create(&search.destination).map_err(|e| e.to_string())?;

    SearchCriteria::new(
        origin,
        destination,
        search.departure_date,
        search.return_date,
        search.passengers,
    )
    .map_err(|e| e.to_string())
}

/// Application error type.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    path: String,
}

impl AppError {
    /// A client error at `path`.
    pub fn bad_request(path: &str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            path: path.to_string(),
        }
    }

    /// An unexpected server-side failure at `path`.
    pub fn internal(path: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An unexpected error occurred".to_string(),
            path: path.to_string(),
        }
    }

    fn from_search(path: &str, e: SearchError) -> Self {
        match e {
            SearchError::InvalidCriteria(e) => Self::bad_request(path, e.message()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!(status = %self.status, path = %self.path, message = %self.message, "Request failed");

        let body = Json(ErrorResponse {
            status: self.status.as_u16(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: self.message,
            path: self.path,
        });
        (self.status, body).into_response()
    }
}
