//! HTTP client for the Liturgical Calendar API.

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::UpstreamConfig;
use crate::error::{UpstreamError, UpstreamResult};
use crate::source::{BoxFuture, CalendarRequest, CalendarSource};

/// HTTP client for the Liturgical Calendar API.
pub struct LitCalClient {
    client: Client,
    config: UpstreamConfig,
}

impl LitCalClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: UpstreamConfig) -> UpstreamResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                UpstreamError::configuration(format!("Failed to create HTTP client: {e}"))
                    .with_source(e)
            })?;

        Ok(Self { client, config })
    }

    /// Returns the absolute URL for a request.
    pub fn url_for(&self, request: &CalendarRequest) -> String {
        format!("{}{}", self.config.base_str(), request.path())
    }

    /// Performs a GET for `request` and parses the body as JSON.
    pub async fn get_json(&self, request: &CalendarRequest) -> UpstreamResult<Value> {
        let url = self.url_for(request);
        let mut builder = self.client.get(&url).header(ACCEPT, "application/json");
        if let Some(locale) = request.locale() {
            builder = builder.header(ACCEPT_LANGUAGE, locale);
        }

        debug!(url = %url, "Fetching from upstream");

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        self.handle_response(response).await
    }

    fn transport_error(&self, error: reqwest::Error) -> UpstreamError {
        let err = if error.is_timeout() {
            UpstreamError::timeout(format!(
                "Request timed out after {}s",
                self.config.timeout.as_secs()
            ))
        } else {
            UpstreamError::network(format!("Request failed: {error}"))
        };
        warn!(error = %error, "Upstream request failed");
        err.with_source(error)
    }

    async fn handle_response(&self, response: Response) -> UpstreamResult<Value> {
        let status = response.status();
        trace!(status = %status, "Received response");

        if !status.is_success() {
            warn!(status = %status, url = %response.url(), "Upstream returned an error status");
            let message = if status == reqwest::StatusCode::NOT_FOUND {
                "Calendar not found".to_string()
            } else {
                format!("API request failed: {status}")
            };
            return Err(UpstreamError::http_status(status.as_u16(), message));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Upstream body is not JSON");
            UpstreamError::invalid_response(format!("Invalid JSON from API: {e}")).with_source(e)
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }
}

impl CalendarSource for LitCalClient {
    fn name(&self) -> &str {
        "litcal"
    }

    fn fetch(&self, request: CalendarRequest) -> BoxFuture<'_, UpstreamResult<Value>> {
        Box::pin(async move { self.get_json(&request).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamErrorCode;
    use crate::source::EventsScope;
    use serde_json::json;
    use std::time::Duration;

    fn client_for(server: &mockito::Server) -> LitCalClient {
        let config = UpstreamConfig::new(server.url())
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        LitCalClient::new(config).unwrap()
    }

    #[test]
    fn url_building() {
        let config = UpstreamConfig::new("https://example.com/api/dev/").unwrap();
        let client = LitCalClient::new(config).unwrap();
        let request = CalendarRequest::National {
            nation: "US".into(),
            year: 2026,
            locale: "en".into(),
        };
        assert_eq!(
            client.url_for(&request),
            "https://example.com/api/dev/calendar/nation/US/2026"
        );
    }

    #[tokio::test]
    async fn fetch_sends_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/calendar/2026")
            .match_header("accept", "application/json")
            .match_header("accept-language", "it")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"litcal": [], "settings": {"year": 2026}}).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let body = client
            .fetch(CalendarRequest::General {
                year: 2026,
                locale: "it".into(),
            })
            .await
            .unwrap();

        assert_eq!(body["settings"]["year"], 2026);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn listing_has_no_language_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/calendars")
            .match_header("accept-language", mockito::Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"litcal_metadata": {}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let body = client.fetch(CalendarRequest::Calendars).await.unwrap();
        assert!(body.get("litcal_metadata").is_some());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn not_found_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/events/nation/XX")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .fetch(CalendarRequest::Events {
                scope: EventsScope::Nation("XX".into()),
                locale: "en".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), UpstreamErrorCode::NotFound);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Calendar not found");
    }

    #[tokio::test]
    async fn server_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/calendar/2026")
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .fetch(CalendarRequest::General {
                year: 2026,
                locale: "en".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), UpstreamErrorCode::HttpStatus);
        assert!(err.to_string().contains("503"));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn invalid_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/calendars")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.fetch(CalendarRequest::Calendars).await.unwrap_err();
        assert_eq!(err.code(), UpstreamErrorCode::InvalidResponse);
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let config = UpstreamConfig::new("http://127.0.0.1:1").unwrap();
        let client = LitCalClient::new(config).unwrap();
        let err = client.fetch(CalendarRequest::Calendars).await.unwrap_err();
        assert_eq!(err.code(), UpstreamErrorCode::Network);
        assert!(err.is_retryable());
    }
}
