//! Facade crate for the Paseo walking-route planner.
//!
//! This crate re-exports the core domain types and exposes the HTTP
//! directions provider behind the `http` feature flag.

#![forbid(unsafe_code)]

pub use paseo_core::{
    CandidatePool, Category, Directions, DirectionsError, DirectionsProvider, DirectionsRequest,
    EncodedPolyline, Endpoint, ErrorKind, GeoPoint, Leg, LocationError, MalformedPlaceRecord,
    OptimizerConfig, OrderingAuthority, Place, PlaceId, PlaceRecord, RawCoordinate, RawLocation,
    RouteError, RouteOptimizer, RouteRequest, RouteResult, RouteSession, ServiceArea,
    SessionError, distance_km, request_walking_route, route_by_nearest_neighbor,
    select_ordered_stops, validate_location,
};

#[cfg(feature = "http")]
pub use paseo_data::directions::{HttpDirectionsProvider, HttpDirectionsProviderConfig};

#[cfg(feature = "http")]
pub use paseo_data::catalog::{PlaceCatalogClient, load_candidate_pool};
