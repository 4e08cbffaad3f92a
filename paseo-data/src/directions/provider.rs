//! HTTP `DirectionsProvider` for Google-Directions-compatible services.
//!
//! Each call issues one `GET` with `origin`, `destination`, `mode=walking`,
//! the pipe-joined `waypoints` and the API `key`. When the request does not
//! ask to preserve the stop order, the waypoint list is prefixed with
//! `optimize:true|` and the service's `waypoint_order` is passed back.
//!
//! The whole exchange (connect, send and body read) is bounded by the
//! configured timeout and surfaces as [`DirectionsError::Timeout`].

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use paseo_core::{
    Directions, DirectionsError, DirectionsProvider, DirectionsRequest, EncodedPolyline, Leg,
};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::google::DirectionsResponse;

/// Error type for [`HttpDirectionsProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The configured endpoint is not an absolute URL.
    #[error("invalid directions endpoint `{url}`: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Default user agent for directions requests.
pub const DEFAULT_USER_AGENT: &str = "paseo-directions/0.1";

/// Default directions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const REDACTED: &str = "REDACTED";

/// Configuration for [`HttpDirectionsProvider`].
#[derive(Clone)]
pub struct HttpDirectionsProviderConfig {
    /// Directions endpoint, e.g. `"https://maps.googleapis.com/maps/api/directions/json"`.
    pub endpoint: String,
    /// API credential sent as the `key` query parameter.
    pub api_key: Option<String>,
    /// Upper bound for the whole request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpDirectionsProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDirectionsProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpDirectionsProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpDirectionsProviderConfig {
    /// Create a new configuration with the given endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Walking-directions provider speaking the Google Directions wire format.
#[derive(Debug)]
pub struct HttpDirectionsProvider {
    client: Client,
    endpoint: Url,
    config: HttpDirectionsProviderConfig,
}

impl HttpDirectionsProvider {
    /// Create a provider for `endpoint` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP client
    /// fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDirectionsProviderConfig::new(endpoint))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP client
    /// fails to build.
    pub fn with_config(config: HttpDirectionsProviderConfig) -> Result<Self, ProviderBuildError> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|source| ProviderBuildError::InvalidEndpoint {
                url: config.endpoint.clone(),
                source,
            })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpDirectionsProviderConfig {
        &self.config
    }

    /// Build the request URL, credential included.
    fn build_url(&self, request: &DirectionsRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("origin", &request.origin.to_query_pair())
                .append_pair("destination", &request.destination.to_query_pair())
                .append_pair("mode", "walking");
            if !request.stops.is_empty() {
                query.append_pair("waypoints", &waypoints_param(request));
            }
            if let Some(key) = &self.config.api_key {
                query.append_pair("key", key);
            }
        }
        url
    }

    async fn fetch(&self, request: &DirectionsRequest) -> Result<Directions, DirectionsError> {
        let url = self.build_url(request);
        debug!("requesting walking directions: {}", redact(&url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err))?;

        let body: DirectionsResponse = response.json().await.map_err(|err| {
            if err.is_timeout() {
                self.timeout_error()
            } else {
                DirectionsError::Parse {
                    message: err.without_url().to_string(),
                }
            }
        })?;

        convert_response(body, request.stops.len())
    }

    const fn timeout_error(&self) -> DirectionsError {
        DirectionsError::Timeout {
            timeout_secs: self.config.timeout.as_secs(),
        }
    }

    /// Convert a reqwest error to a `DirectionsError`.
    ///
    /// The URL is stripped first so the credential never reaches messages.
    fn convert_reqwest_error(&self, error: reqwest::Error) -> DirectionsError {
        let error = error.without_url();
        if error.is_timeout() {
            return self.timeout_error();
        }

        if let Some(status) = error.status() {
            return DirectionsError::Http {
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        DirectionsError::Network {
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl DirectionsProvider for HttpDirectionsProvider {
    async fn walking_route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Directions, DirectionsError> {
        match tokio::time::timeout(self.config.timeout, self.fetch(request)).await {
            Ok(outcome) => outcome,
            Err(_elapsed) => Err(self.timeout_error()),
        }
    }
}

fn waypoints_param(request: &DirectionsRequest) -> String {
    let joined = request
        .stops
        .iter()
        .map(paseo_core::GeoPoint::to_query_pair)
        .collect::<Vec<_>>()
        .join("|");
    if request.preserve_order {
        joined
    } else {
        format!("optimize:true|{joined}")
    }
}

/// Render `url` with the `key` parameter masked.
fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(name, _)| name == "key") {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let shown = if name == "key" {
                REDACTED.to_owned()
            } else {
                value.into_owned()
            };
            (name.into_owned(), shown)
        })
        .collect();
    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

/// Convert a decoded response into [`Directions`].
fn convert_response(
    response: DirectionsResponse,
    stop_count: usize,
) -> Result<Directions, DirectionsError> {
    if !response.is_ok() {
        return Err(DirectionsError::Unavailable {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }

    let Some(route) = response.routes.into_iter().next() else {
        return Err(DirectionsError::Unavailable {
            status: response.status,
            message: "response contained no routes".to_owned(),
        });
    };

    let legs = route
        .legs
        .into_iter()
        .map(|leg| Leg {
            distance_meters: leg.distance.value,
            duration: Duration::from_secs(leg.duration.value),
            start_address: leg.start_address,
            end_address: leg.end_address,
        })
        .collect();

    let waypoint_order = if route.waypoint_order.is_empty() {
        (0..stop_count).collect()
    } else {
        route.waypoint_order
    };

    Ok(Directions {
        polyline: EncodedPolyline(route.overview_polyline.points),
        legs,
        waypoint_order,
    })
}
