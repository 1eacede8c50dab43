//! Air quality endpoint client
//!
//! The source only performs the GET and hands back status and body; the
//! status dispatch belongs to [`crate::client::AirQualityClient`].

use crate::config::ApiConfig;
use crate::models::CityQuery;
use crate::{AirCheckError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Status line and body of one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Anything that can answer `GET <base>?city=<name>`
#[async_trait]
pub trait AirQualitySource: Send + Sync {
    /// Fails only on transport problems; every HTTP status is a successful fetch.
    async fn fetch(&self, query: &CityQuery) -> Result<RawResponse>;
}

/// reqwest-backed source talking to the configured endpoint
#[derive(Debug, Clone)]
pub struct HttpAirQualitySource {
    client: Client,
    base_url: String,
}

impl HttpAirQualitySource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder
            .build()
            .map_err(|e| AirCheckError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL with the city percent-encoded
    #[must_use]
    pub fn request_url(&self, query: &CityQuery) -> String {
        format!("{}?city={}", self.base_url, query.encoded())
    }
}

#[async_trait]
impl AirQualitySource for HttpAirQualitySource {
    #[instrument(skip(self, query), fields(city = %query))]
    async fn fetch(&self, query: &CityQuery) -> Result<RawResponse> {
        let url = self.request_url(query);
        debug!("Air quality request URL: {}", url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AirCheckError::transport(format!("Request to {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AirCheckError::transport(format!("Failed to read response body: {e}")))?;

        let elapsed = start_time.elapsed();
        info!(
            "Air quality response {} for '{}' in {:.3}s",
            status,
            query,
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow air quality response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base_url: &str) -> HttpAirQualitySource {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        HttpAirQualitySource::new(&config).unwrap()
    }

    #[test]
    fn test_request_url_encodes_city() {
        let source = source("http://localhost:5000/airquality");
        let query = CityQuery::parse("  São Paulo ").unwrap();
        assert_eq!(
            source.request_url(&query),
            "http://localhost:5000/airquality?city=S%C3%A3o%20Paulo"
        );
    }

    #[test]
    fn test_request_url_keeps_extra_syntax_inside_parameter() {
        let source = source("https://air.example.org/airquality");
        let query = CityQuery::parse("Rio#frag&x=1").unwrap();
        let url = source.request_url(&query);
        assert_eq!(url.matches('?').count(), 1);
        assert!(!url.contains('#'));
        assert!(!url.contains("&x="));
    }

    #[test]
    fn test_client_with_timeout_builds() {
        let config = ApiConfig {
            timeout_seconds: Some(10),
            ..ApiConfig::default()
        };
        assert!(HttpAirQualitySource::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let source = source(&format!("http://127.0.0.1:{port}/airquality"));
        let query = CityQuery::parse("Manaus").unwrap();
        let err = source.fetch(&query).await.unwrap_err();
        assert!(matches!(err, AirCheckError::Transport { .. }));
    }
}
