//! Shared JSON-over-HTTP transport for supplier APIs.
//!
//! Every supplier is reached the same way: one POST of a JSON body to a
//! configured endpoint, answered by a JSON array. Only the body shapes
//! differ, so those stay in each supplier's module.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::SupplierError;

/// Default flight search endpoint path.
const DEFAULT_ENDPOINT: &str = "/flights";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How much of an unparseable body to keep in the error.
const ERROR_BODY_CHARS: usize = 500;

/// Configuration for one supplier's HTTP endpoint.
#[derive(Debug, Clone)]
pub struct SupplierConfig {
    /// Base URL of the supplier API
    pub base_url: String,
    /// Path of the flight search endpoint, appended to `base_url`
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SupplierConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the flight search endpoint path.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full URL of the flight search endpoint.
    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}

/// HTTP client posting JSON to a single supplier endpoint.
#[derive(Debug, Clone)]
pub struct JsonTransport {
    http: reqwest::Client,
    url: String,
}

impl JsonTransport {
    /// Create a transport for the given configuration.
    pub fn new(config: &SupplierConfig) -> Result<Self, SupplierError> {
        if config.base_url.trim().is_empty() {
            return Err(SupplierError::NotConfigured(
                "supplier base URL is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url(),
        })
    }

    /// POST `body` as JSON and parse the JSON response.
    pub async fn post_json<Req, Resp>(&self, body: &Req) -> Result<Resp, SupplierError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let response = self.http.post(&self.url).json(body).send().await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SupplierError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| SupplierError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(ERROR_BODY_CHARS).collect()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn config_builder() {
        let config = SupplierConfig::new("http://localhost:8090/crazyair")
            .with_endpoint("/search")
            .with_timeout(3);

        assert_eq!(config.base_url, "http://localhost:8090/crazyair");
        assert_eq!(config.endpoint, "/search");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.url(), "http://localhost:8090/crazyair/search");
    }

    #[test]
    fn config_defaults() {
        let config = SupplierConfig::new("http://localhost:8090/");

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.url(), "http://localhost:8090/flights");
    }

    #[test]
    fn empty_base_url_rejected() {
        let result = JsonTransport::new(&SupplierConfig::new("  "));
        assert!(matches!(result, Err(SupplierError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn posts_body_and_parses_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/flights"))
            .and(body_json(serde_json::json!({ "q": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2, 3])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = JsonTransport::new(&SupplierConfig::new(server.uri())).unwrap();
        let result: Vec<u32> = transport
            .post_json(&serde_json::json!({ "q": 1 }))
            .await
            .unwrap();

        assert_eq!(result, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn error_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let transport = JsonTransport::new(&SupplierConfig::new(server.uri())).unwrap();
        let err = transport
            .post_json::<_, Vec<u32>>(&serde_json::json!({}))
            .await
            .unwrap_err();

        match err {
            SupplierError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "down");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let transport = JsonTransport::new(&SupplierConfig::new(server.uri())).unwrap();
        let err = transport
            .post_json::<_, Vec<u32>>(&serde_json::json!({}))
            .await
            .unwrap_err();

        match err {
            SupplierError::Json { body, .. } => assert_eq!(body.as_deref(), Some("not json")),
            other => panic!("expected JSON error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_http_error() {
        let config = SupplierConfig::new("http://127.0.0.1:1").with_timeout(1);
        let transport = JsonTransport::new(&config).unwrap();
        let err = transport
            .post_json::<_, Vec<u32>>(&serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, SupplierError::Http(_)));
    }
}
