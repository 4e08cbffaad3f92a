//! Deterministic `DirectionsProvider` used by unit and behaviour tests.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    Directions, DirectionsError, DirectionsProvider, DirectionsRequest, EncodedPolyline, Leg,
};

/// Polyline returned by [`FixedDirections`] on success.
pub const FIXED_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

/// Provider that answers every request the same way.
///
/// On success it returns [`FIXED_POLYLINE`], one 100 m / 60 s leg per hop and
/// an identity `waypoint_order` unless one was configured with
/// [`FixedDirections::reordering`]. Every request is recorded.
#[derive(Debug, Default)]
pub struct FixedDirections {
    failure: Option<DirectionsError>,
    waypoint_order: Option<Vec<usize>>,
    requests: Mutex<Vec<DirectionsRequest>>,
}

impl FixedDirections {
    /// Provider that fails every request with `error`.
    #[must_use]
    pub fn failing(error: DirectionsError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Provider that reports `order` as its chosen stop order.
    #[must_use]
    pub fn reordering(order: Vec<usize>) -> Self {
        Self {
            waypoint_order: Some(order),
            ..Self::default()
        }
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<DirectionsRequest> {
        self.requests().pop()
    }
}

#[async_trait]
impl DirectionsProvider for FixedDirections {
    async fn walking_route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Directions, DirectionsError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let hops = request.stops.len() + 1;
        Ok(Directions {
            polyline: EncodedPolyline(FIXED_POLYLINE.to_owned()),
            legs: (0..hops)
                .map(|_| Leg {
                    distance_meters: 100,
                    duration: Duration::from_secs(60),
                    start_address: None,
                    end_address: None,
                })
                .collect(),
            waypoint_order: self
                .waypoint_order
                .clone()
                .unwrap_or_else(|| (0..request.stops.len()).collect()),
        })
    }
}
