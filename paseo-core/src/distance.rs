//! Great-circle distance between coordinates.

use crate::GeoPoint;

/// Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometres.
///
/// Symmetric, non-negative, and zero when both points coincide.
///
/// # Examples
/// ```
/// use paseo_core::{GeoPoint, distance_km};
///
/// let jardin = GeoPoint::new(20.5888, -100.3899);
/// let alameda = GeoPoint::new(20.6042, -100.4028);
/// let km = distance_km(&jardin, &alameda);
/// assert!(km > 2.0 && km < 2.3);
/// assert!((km - distance_km(&alameda, &jardin)).abs() < 1e-12);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `h` marginally past 1 for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}
