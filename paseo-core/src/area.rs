//! The operating region that every routed coordinate must fall inside.

use std::ops::RangeInclusive;

use geo::{Coord, Intersects, Rect};
use thiserror::Error;

use crate::GeoPoint;

/// Default latitude band of the service area.
pub const DEFAULT_LATITUDE_BAND: RangeInclusive<f64> = 20.4..=20.7;

/// Default longitude band of the service area.
pub const DEFAULT_LONGITUDE_BAND: RangeInclusive<f64> = -100.5..=-100.3;

/// Errors returned by [`ServiceArea::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceAreaError {
    /// A band bound was NaN or infinite.
    #[error("service area bounds must be finite")]
    NonFinite,
    /// A band's lower bound exceeded its upper bound.
    #[error("service area band {start}..={end} is inverted")]
    Inverted { start: f64, end: f64 },
}

/// Rectangular latitude/longitude bands accepted by the planner.
///
/// Boundaries are inclusive. Points outside the area are rejected rather
/// than clamped.
///
/// # Examples
/// ```
/// use paseo_core::{GeoPoint, ServiceArea};
///
/// let area = ServiceArea::default();
/// assert!(area.contains(&GeoPoint::new(20.5888, -100.3899)));
/// assert!(!area.contains(&GeoPoint::new(19.4326, -99.1332)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceArea {
    bounds: Rect<f64>,
}

impl ServiceArea {
    /// Build an area from inclusive latitude and longitude bands.
    ///
    /// # Errors
    /// Returns [`ServiceAreaError`] when a bound is not finite or a band is
    /// inverted.
    pub fn new(
        latitude: RangeInclusive<f64>,
        longitude: RangeInclusive<f64>,
    ) -> Result<Self, ServiceAreaError> {
        for band in [&latitude, &longitude] {
            if !band.start().is_finite() || !band.end().is_finite() {
                return Err(ServiceAreaError::NonFinite);
            }
            if band.start() > band.end() {
                return Err(ServiceAreaError::Inverted {
                    start: *band.start(),
                    end: *band.end(),
                });
            }
        }
        Ok(Self {
            bounds: Rect::new(
                Coord {
                    x: *longitude.start(),
                    y: *latitude.start(),
                },
                Coord {
                    x: *longitude.end(),
                    y: *latitude.end(),
                },
            ),
        })
    }

    /// Whether `point` lies inside the area, boundaries included.
    ///
    /// Non-finite coordinates are never inside.
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        if !(point.latitude.is_finite() && point.longitude.is_finite()) {
            return false;
        }
        // `Intersects` treats boundary points as inside the rectangle.
        self.bounds.intersects(&Coord::from(*point))
    }

    /// The underlying bounding rectangle (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn bounds(&self) -> Rect<f64> {
        self.bounds
    }
}

impl Default for ServiceArea {
    fn default() -> Self {
        Self {
            bounds: Rect::new(
                Coord {
                    x: *DEFAULT_LONGITUDE_BAND.start(),
                    y: *DEFAULT_LATITUDE_BAND.start(),
                },
                Coord {
                    x: *DEFAULT_LONGITUDE_BAND.end(),
                    y: *DEFAULT_LATITUDE_BAND.end(),
                },
            ),
        }
    }
}
