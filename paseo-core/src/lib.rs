//! Core domain types and routing pipeline for the Paseo walking-route planner.
//!
//! Raw place records are sanitized into a [`CandidatePool`]. A
//! [`RouteOptimizer`] then validates the endpoints of a [`RouteRequest`],
//! selects stops (by category order, or by nearest neighbour when no order is
//! given) and asks a [`DirectionsProvider`] for the walking path.
//! [`RouteSession`] keeps the latest result for a UI and discards stale
//! completions.

mod area;
mod category;
mod directions;
mod distance;
mod error;
mod nearest;
mod optimizer;
mod place;
mod point;
mod record;
mod sanitize;
mod select;
mod session;

#[doc(hidden)]
pub mod test_support;

pub use area::{DEFAULT_LATITUDE_BAND, DEFAULT_LONGITUDE_BAND, ServiceArea, ServiceAreaError};
pub use category::Category;
pub use directions::{
    Directions, DirectionsError, DirectionsProvider, DirectionsRequest, EncodedPolyline, Leg,
    request_walking_route,
};
pub use distance::{EARTH_RADIUS_KM, distance_km};
pub use error::{EndpointRole, ErrorKind, RouteError};
pub use nearest::{Tour, route_by_nearest_neighbor, tour_length_km};
pub use optimizer::{
    Endpoint, OptimizerConfig, OrderingAuthority, ParseOrderingError, ResolvedEndpoint,
    RouteOptimizer, RouteRequest, RouteResult,
};
pub use place::{CandidatePool, Place, PlaceId};
pub use point::GeoPoint;
pub use record::{PlaceRecord, RawCoordinate, RawId, RawLocation};
pub use sanitize::{
    Axis, LocationError, MalformedPlaceRecord, RecordDefect, SanitizeReport, sanitize_coordinate,
    sanitize_records, validate_location,
};
pub use select::{Selection, filter_by_categories, select_ordered_stops};
pub use session::{RouteSession, SessionError};
