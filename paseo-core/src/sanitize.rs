//! Coordinate sanitizing and location validation.
//!
//! Raw records enter the pipeline here. Coordinates are coerced to `f64`,
//! range-checked against the [`ServiceArea`], and either normalised into a
//! [`GeoPoint`] or rejected. Validation itself is pure; only
//! [`sanitize_records`] logs, because it owns the drop-and-continue policy
//! for malformed records.

use log::warn;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::record::{PlaceRecord, RawCoordinate, RawLocation};
use crate::{CandidatePool, GeoPoint, Place, PlaceId, ServiceArea};

/// Which half of a coordinate pair failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        })
    }
}

/// Reasons a raw location fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    /// The coordinate was absent or `null`.
    #[error("{axis} is missing")]
    Missing { axis: Axis },
    /// The coordinate could not be read as a finite number.
    #[error("{axis} value {raw:?} is not a finite number")]
    Unparseable { axis: Axis, raw: String },
    /// Both coordinates parsed but fall outside the operating region.
    #[error("({}, {}) lies outside the service area", .point.latitude, .point.longitude)]
    OutsideServiceArea { point: GeoPoint },
}

/// Coerce a raw coordinate into a finite `f64`.
///
/// Strings are trimmed and may use a single `,` as the decimal separator.
/// The whole string must parse; `None` is returned for anything that is not
/// a finite number.
///
/// # Examples
/// ```
/// use paseo_core::{RawCoordinate, sanitize_coordinate};
///
/// assert_eq!(sanitize_coordinate(&RawCoordinate::from("20,58")), Some(20.58));
/// assert_eq!(sanitize_coordinate(&RawCoordinate::from(" -100.39 ")), Some(-100.39));
/// assert_eq!(sanitize_coordinate(&RawCoordinate::from("north")), None);
/// assert_eq!(sanitize_coordinate(&RawCoordinate::Number(f64::NAN)), None);
/// ```
#[must_use]
pub fn sanitize_coordinate(value: &RawCoordinate) -> Option<f64> {
    let parsed = match value {
        RawCoordinate::Number(number) => Some(*number),
        RawCoordinate::Text(text) => parse_decimal(text.trim()),
    };
    parsed.filter(|number| number.is_finite())
}

fn parse_decimal(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    let single_comma = text.matches(',').count() == 1 && !text.contains('.');
    if single_comma {
        text.replacen(',', ".", 1).parse().ok()
    } else {
        text.parse().ok()
    }
}

fn sanitize_axis(value: Option<&RawCoordinate>, axis: Axis) -> Result<f64, LocationError> {
    let raw = value.ok_or(LocationError::Missing { axis })?;
    sanitize_coordinate(raw).ok_or_else(|| LocationError::Unparseable {
        axis,
        raw: match raw {
            RawCoordinate::Number(number) => number.to_string(),
            RawCoordinate::Text(text) => text.clone(),
        },
    })
}

/// Validate a raw location against the service area.
///
/// # Errors
/// Returns [`LocationError`] when either coordinate is missing, cannot be
/// sanitized, or the point falls outside `area`. Out-of-area points are
/// rejected, never clamped.
///
/// # Examples
/// ```
/// use paseo_core::{RawLocation, ServiceArea, validate_location};
///
/// let area = ServiceArea::default();
/// let ok = validate_location(&RawLocation::new("20,5888", -100.3899), &area).unwrap();
/// assert_eq!(ok.latitude, 20.5888);
/// assert!(validate_location(&RawLocation::new(19.43, -99.13), &area).is_err());
/// ```
pub fn validate_location(
    location: &RawLocation,
    area: &ServiceArea,
) -> Result<GeoPoint, LocationError> {
    let latitude = sanitize_axis(location.latitude.as_ref(), Axis::Latitude)?;
    let longitude = sanitize_axis(location.longitude.as_ref(), Axis::Longitude)?;
    let point = GeoPoint::new(latitude, longitude);
    if area.contains(&point) {
        Ok(point)
    } else {
        Err(LocationError::OutsideServiceArea { point })
    }
}

/// What was wrong with a rejected place record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordDefect {
    #[error("missing id")]
    MissingId,
    #[error("missing name")]
    MissingName,
    #[error("missing category")]
    MissingCategory,
    #[error("invalid location: {0}")]
    Location(#[from] LocationError),
}

/// A place record that could not be turned into a [`Place`].
///
/// This is a recoverable condition: the record is dropped and the rest of the
/// pool is still usable.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("place record {} is malformed: {defect}", .id.as_deref().unwrap_or("<unknown>"))]
pub struct MalformedPlaceRecord {
    /// Identifier of the record, when it carried one.
    pub id: Option<String>,
    /// The first defect found.
    pub defect: RecordDefect,
}

impl MalformedPlaceRecord {
    /// Classify for callers that only need the taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedPlaceRecord
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

impl Place {
    /// Normalise a backend record into a validated place.
    ///
    /// # Errors
    /// Returns [`MalformedPlaceRecord`] when the id, name or category is
    /// missing, or the location fails [`validate_location`].
    pub fn try_from_record(
        record: PlaceRecord,
        area: &ServiceArea,
    ) -> Result<Self, MalformedPlaceRecord> {
        let id = record.id.map(|raw| raw.to_string());
        let fail = |defect: RecordDefect| MalformedPlaceRecord {
            id: id.clone(),
            defect,
        };

        let place_id = id.clone().ok_or_else(|| fail(RecordDefect::MissingId))?;
        let name = non_blank(record.name).ok_or_else(|| fail(RecordDefect::MissingName))?;
        let category =
            non_blank(record.category).ok_or_else(|| fail(RecordDefect::MissingCategory))?;
        let location = validate_location(&record.location, area)
            .map_err(|err| fail(RecordDefect::Location(err)))?;

        Ok(Self::new(PlaceId(place_id), name, category, location))
    }
}

/// Outcome of sanitizing a batch of backend records.
#[derive(Debug, Clone, Default)]
pub struct SanitizeReport {
    /// Places that passed validation, in input order.
    pub pool: CandidatePool,
    /// Records that were dropped.
    pub rejected: Vec<MalformedPlaceRecord>,
}

/// Validate every record, keeping the good ones and logging the rest.
///
/// # Examples
/// ```
/// use paseo_core::{PlaceRecord, RawLocation, ServiceArea, sanitize_records};
///
/// let good = PlaceRecord {
///     id: Some(paseo_core::RawId::Integer(1)),
///     name: Some("Museo Regional".into()),
///     category: Some("Museo".into()),
///     location: RawLocation::new(20.595, -100.395),
/// };
/// let bad = PlaceRecord { location: RawLocation::new("abc", -100.395), ..good.clone() };
///
/// let report = sanitize_records(vec![good, bad], &ServiceArea::default());
/// assert_eq!(report.pool.len(), 1);
/// assert_eq!(report.rejected.len(), 1);
/// ```
pub fn sanitize_records<I>(records: I, area: &ServiceArea) -> SanitizeReport
where
    I: IntoIterator<Item = PlaceRecord>,
{
    let mut places = Vec::new();
    let mut rejected = Vec::new();
    for record in records {
        match Place::try_from_record(record, area) {
            Ok(place) => places.push(place),
            Err(err) => {
                warn!("dropping {err}");
                rejected.push(err);
            }
        }
    }
    SanitizeReport {
        pool: CandidatePool::from(places),
        rejected,
    }
}
