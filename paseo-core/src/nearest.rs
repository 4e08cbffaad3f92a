//! Greedy nearest-neighbour ordering of stops.
//!
//! Used when the caller supplies no category order. Starting at the origin,
//! the router repeatedly moves to the closest unvisited place by haversine
//! distance; the destination closes the tour. This is a heuristic: it runs in
//! O(n²) over a small city-scoped pool and gives no guarantee of a minimum
//! tour length.

use crate::{GeoPoint, Place, distance_km};

/// A visiting order produced by [`route_by_nearest_neighbor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Intermediate stops in visiting order. Excludes origin and destination.
    pub stops: Vec<Place>,
    /// Haversine length of `origin -> stops -> destination` in kilometres.
    pub length_km: f64,
}

/// Order `places` greedily from `origin`, finishing at `destination`.
///
/// Ties go to the place appearing first in `places`.
///
/// # Examples
/// ```
/// use paseo_core::{GeoPoint, Place, route_by_nearest_neighbor};
///
/// let origin = GeoPoint::new(20.590, -100.390);
/// let destination = GeoPoint::new(20.600, -100.390);
/// let far = Place::new("far", "Far", "Museo", GeoPoint::new(20.598, -100.390));
/// let near = Place::new("near", "Near", "Templo", GeoPoint::new(20.592, -100.390));
///
/// let tour = route_by_nearest_neighbor(&origin, &destination, &[far, near]);
/// let ids: Vec<_> = tour.stops.iter().map(|p| p.id.as_str()).collect();
/// assert_eq!(ids, ["near", "far"]);
/// ```
#[must_use]
pub fn route_by_nearest_neighbor(
    origin: &GeoPoint,
    destination: &GeoPoint,
    places: &[Place],
) -> Tour {
    let mut remaining: Vec<&Place> = places.iter().collect();
    let mut stops = Vec::with_capacity(places.len());
    let mut current = *origin;

    while !remaining.is_empty() {
        let mut closest = 0;
        let mut min_distance = f64::INFINITY;
        for (index, place) in remaining.iter().enumerate() {
            let distance = distance_km(&current, &place.location);
            if distance < min_distance {
                min_distance = distance;
                closest = index;
            }
        }
        let next = remaining.remove(closest);
        current = next.location;
        stops.push(next.clone());
    }

    let length_km = tour_length_km(origin, &stops, destination);
    Tour { stops, length_km }
}

/// Total haversine length of `origin -> stops... -> destination`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "tour length is the sum of leg distances"
)]
pub fn tour_length_km(origin: &GeoPoint, stops: &[Place], destination: &GeoPoint) -> f64 {
    let mut total = 0.0;
    let mut current = origin;
    for stop in stops {
        total += distance_km(current, &stop.location);
        current = &stop.location;
    }
    total + distance_km(current, destination)
}
