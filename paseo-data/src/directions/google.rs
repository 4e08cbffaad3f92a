//! Response types for Google-Directions-compatible services.
//!
//! Only the fields the planner consumes are modelled; unknown fields are
//! ignored. See:
//! <https://developers.google.com/maps/documentation/directions/get-directions#DirectionsResponse>

use serde::Deserialize;

/// Top-level directions response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Status code such as `"OK"`, `"ZERO_RESULTS"` or `"REQUEST_DENIED"`.
    pub status: String,

    /// Human-readable detail accompanying a non-`"OK"` status.
    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub routes: Vec<RouteBody>,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

#[derive(Debug, Deserialize)]
pub struct RouteBody {
    pub overview_polyline: PolylineBody,
    #[serde(default)]
    pub legs: Vec<LegBody>,
    /// Visiting order of the request's waypoints, when the service reorders.
    #[serde(default)]
    pub waypoint_order: Vec<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PolylineBody {
    pub points: String,
}

#[derive(Debug, Deserialize)]
pub struct LegBody {
    pub distance: ValueBody,
    pub duration: ValueBody,
    #[serde(default)]
    pub start_address: Option<String>,
    #[serde(default)]
    pub end_address: Option<String>,
}

/// A `{ "text": .., "value": .. }` pair; only the numeric value is kept.
#[derive(Debug, Deserialize)]
pub struct ValueBody {
    pub value: u64,
}
