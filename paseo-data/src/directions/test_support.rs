//! Test utilities for directions providers.
//!
//! This module provides [`StubDirectionsProvider`], a deterministic test
//! double for [`DirectionsProvider`] that returns pre-configured responses
//! without making HTTP requests.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use paseo_core::{
    Directions, DirectionsError, DirectionsProvider, DirectionsRequest, EncodedPolyline, Leg,
};

/// Stub `DirectionsProvider` for testing.
///
/// # Example
///
/// ```
/// use paseo_core::{DirectionsError, DirectionsProvider, DirectionsRequest, GeoPoint};
/// use paseo_data::directions::test_support::StubDirectionsProvider;
///
/// let provider = StubDirectionsProvider::with_error(DirectionsError::Timeout { timeout_secs: 10 });
/// let request = DirectionsRequest {
///     origin: GeoPoint::new(20.5888, -100.3899),
///     destination: GeoPoint::new(20.6042, -100.4028),
///     stops: Vec::new(),
///     preserve_order: true,
/// };
/// let outcome = tokio::runtime::Builder::new_current_thread()
///     .build()
///     .unwrap()
///     .block_on(provider.walking_route(&request));
/// assert!(outcome.is_err());
/// assert_eq!(provider.requests().len(), 1);
/// ```
#[derive(Debug)]
pub struct StubDirectionsProvider {
    response: StubResponse,
    requests: Mutex<Vec<DirectionsRequest>>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    PerHop { polyline: String, leg: Leg },
    Fixed(Directions),
    Error(DirectionsError),
}

impl StubDirectionsProvider {
    /// Create a provider that returns `directions` verbatim.
    #[must_use]
    pub fn with_directions(directions: Directions) -> Self {
        Self::from_response(StubResponse::Fixed(directions))
    }

    /// Create a provider that returns the given error.
    #[must_use]
    pub fn with_error(error: DirectionsError) -> Self {
        Self::from_response(StubResponse::Error(error))
    }

    /// Create a provider returning `polyline` and one copy of `leg` per hop.
    #[must_use]
    pub fn with_leg(polyline: impl Into<String>, leg: Leg) -> Self {
        Self::from_response(StubResponse::PerHop {
            polyline: polyline.into(),
            leg,
        })
    }

    /// Create a provider returning a short polyline and 500 m / 6 min legs.
    #[must_use]
    pub fn walking() -> Self {
        Self::with_leg(
            "a~l~Fjk~uOwHJy@P",
            Leg {
                distance_meters: 500,
                duration: Duration::from_secs(360),
                start_address: None,
                end_address: None,
            },
        )
    }

    fn from_response(response: StubResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DirectionsProvider for StubDirectionsProvider {
    async fn walking_route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Directions, DirectionsError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        match &self.response {
            StubResponse::PerHop { polyline, leg } => Ok(Directions {
                polyline: EncodedPolyline(polyline.clone()),
                legs: vec![leg.clone(); request.stops.len() + 1],
                waypoint_order: (0..request.stops.len()).collect(),
            }),
            StubResponse::Fixed(directions) => Ok(directions.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
