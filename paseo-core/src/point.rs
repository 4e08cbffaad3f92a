//! Validated WGS84 coordinates.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Values reaching the routing pipeline have already passed
/// [`validate_location`](crate::validate_location), so they are finite and
/// inside the configured [`ServiceArea`](crate::ServiceArea).
///
/// # Examples
/// ```
/// use geo::Coord;
/// use paseo_core::GeoPoint;
///
/// let point = GeoPoint::new(20.5888, -100.3899);
/// let coord: Coord<f64> = point.into();
/// assert_eq!(coord.x, -100.3899);
/// assert_eq!(coord.y, 20.5888);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Construct a point from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as the `lat,lng` pair used by directions services.
    #[must_use]
    pub fn to_query_pair(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}
