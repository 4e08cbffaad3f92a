//! Walking directions between an origin, a destination and ordered stops.
//!
//! The [`DirectionsProvider`] trait abstracts the third-party directions
//! service. Implementations receive a [`DirectionsRequest`] and return the
//! encoded overview polyline plus one [`Leg`] per hop. The polyline is opaque
//! here; decoding belongs to the map-rendering layer.
//!
//! The trait is asynchronous because the provider call is the pipeline's only
//! suspension point. Implementations must bound that call with a timeout and
//! report it as [`DirectionsError::Timeout`].

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GeoPoint, Place};

/// An encoded path in the provider's polyline format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPolyline(pub String);

impl EncodedPolyline {
    /// Borrow the encoded string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the provider returned an empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Summary of the route between two consecutive points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Walking distance in metres.
    pub distance_meters: u64,
    /// Estimated walking time.
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    /// Human-readable start address, when the provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_address: Option<String>,
    /// Human-readable end address, when the provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_address: Option<String>,
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// Parameters sent to a [`DirectionsProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    /// Intermediate stops. Never includes `origin` or `destination`.
    pub stops: Vec<GeoPoint>,
    /// Keep `stops` in the given order. When `false` the provider may
    /// reorder them and reports the order in [`Directions::waypoint_order`].
    pub preserve_order: bool,
}

/// A successful provider answer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directions {
    pub polyline: EncodedPolyline,
    /// One leg per hop: `stops.len() + 1` for a complete route.
    pub legs: Vec<Leg>,
    /// Order in which the provider visits the request's stops, as indices
    /// into [`DirectionsRequest::stops`]. Identity when order is preserved.
    pub waypoint_order: Vec<usize>,
}

/// Errors raised by [`DirectionsProvider::walking_route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionsError {
    /// The provider answered with a non-success status.
    #[error("directions provider returned status {status}: {message}")]
    Unavailable { status: String, message: String },
    /// The call did not complete within the bounded wait.
    #[error("directions request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
    /// The provider answered with an HTTP error status.
    #[error("directions provider returned HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// The provider could not be reached.
    #[error("failed to reach directions provider: {message}")]
    Network { message: String },
    /// The provider's response could not be decoded.
    #[error("failed to decode directions response: {message}")]
    Parse { message: String },
}

/// Source of walking routes.
///
/// Implementations must be `Send + Sync` so a single provider can serve
/// concurrent sessions.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Fetch a walking route for `request`.
    async fn walking_route(&self, request: &DirectionsRequest)
    -> Result<Directions, DirectionsError>;
}

#[async_trait]
impl<T> DirectionsProvider for Box<T>
where
    T: DirectionsProvider + ?Sized,
{
    async fn walking_route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Directions, DirectionsError> {
        (**self).walking_route(request).await
    }
}

#[async_trait]
impl<T> DirectionsProvider for std::sync::Arc<T>
where
    T: DirectionsProvider + ?Sized,
{
    async fn walking_route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Directions, DirectionsError> {
        (**self).walking_route(request).await
    }
}

/// Request a walking route through `stops` between `origin` and `destination`.
///
/// # Errors
/// Propagates the provider's [`DirectionsError`] unchanged.
pub async fn request_walking_route<P>(
    provider: &P,
    origin: GeoPoint,
    destination: GeoPoint,
    stops: &[Place],
    preserve_order: bool,
) -> Result<Directions, DirectionsError>
where
    P: DirectionsProvider + ?Sized,
{
    let request = DirectionsRequest {
        origin,
        destination,
        stops: stops.iter().map(|place| place.location).collect(),
        preserve_order,
    };
    provider.walking_route(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedDirections;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn request_passes_stop_locations_in_order() {
        let provider = FixedDirections::default();
        let stops = vec![
            Place::new("a", "A", "Museo", GeoPoint::new(20.595, -100.395)),
            Place::new("b", "B", "Templo", GeoPoint::new(20.596, -100.396)),
        ];

        let directions = request_walking_route(
            &provider,
            GeoPoint::new(20.5888, -100.3899),
            GeoPoint::new(20.6042, -100.4028),
            &stops,
            true,
        )
        .await
        .expect("fixed provider succeeds");

        assert_eq!(directions.legs.len(), 3);
        let seen = provider.last_request().expect("request recorded");
        assert_eq!(
            seen.stops,
            vec![GeoPoint::new(20.595, -100.395), GeoPoint::new(20.596, -100.396)]
        );
        assert!(seen.preserve_order);
    }

    #[rstest]
    #[tokio::test]
    async fn boxed_provider_delegates() {
        let boxed: Box<dyn DirectionsProvider> = Box::new(FixedDirections::failing(
            DirectionsError::Timeout { timeout_secs: 10 },
        ));
        let err = request_walking_route(
            &boxed,
            GeoPoint::new(20.5888, -100.3899),
            GeoPoint::new(20.6042, -100.4028),
            &[],
            false,
        )
        .await
        .expect_err("failing provider");
        assert_eq!(err, DirectionsError::Timeout { timeout_secs: 10 });
    }

    #[rstest]
    fn leg_serializes_duration_as_seconds() {
        let leg = Leg {
            distance_meters: 850,
            duration: Duration::from_secs(640),
            start_address: None,
            end_address: None,
        };
        let json = serde_json::to_value(&leg).expect("encode");
        assert_eq!(json["duration"], 640);
        assert!(json.get("start_address").is_none());
    }
}
