//! Raw place records exactly as the place-listing backend serves them.
//!
//! The backend mixes canonical (`latitude`, `name`, `category`) and localized
//! (`Latitud`, `Nombre`, `Categoria`) field names, and may encode
//! coordinates as numbers or strings. Both conventions are accepted here and
//! collapse into [`Place`](crate::Place) during sanitizing, so nothing past
//! this boundary branches on naming.

use serde::{Deserialize, Serialize};

/// A coordinate value before sanitizing.
///
/// # Examples
/// ```
/// use paseo_core::RawCoordinate;
///
/// let text: RawCoordinate = serde_json::from_str("\"20,58\"").unwrap();
/// assert_eq!(text, RawCoordinate::Text("20,58".into()));
/// let number: RawCoordinate = serde_json::from_str("-100.39").unwrap();
/// assert_eq!(number, RawCoordinate::Number(-100.39));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    Number(f64),
    Text(String),
}

impl From<f64> for RawCoordinate {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawCoordinate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// A location in either the canonical or the localized shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default, alias = "Latitud", alias = "lat")]
    pub latitude: Option<RawCoordinate>,
    #[serde(default, alias = "Longitud", alias = "lng")]
    pub longitude: Option<RawCoordinate>,
}

impl RawLocation {
    /// Build a location from any pair of coordinate-like values.
    pub fn new(latitude: impl Into<RawCoordinate>, longitude: impl Into<RawCoordinate>) -> Self {
        Self {
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
        }
    }
}

/// Identifier as delivered by the backend: integer or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Integer(i64),
    Text(String),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// One entry of the place-listing backend's response array.
///
/// # Examples
/// ```
/// use paseo_core::PlaceRecord;
///
/// let record: PlaceRecord = serde_json::from_str(
///     r#"{"id": 7, "Nombre": "Museo Regional", "Categoria": "Museo",
///         "Latitud": "20,5930", "Longitud": -100.3925}"#,
/// ).unwrap();
/// assert_eq!(record.name.as_deref(), Some("Museo Regional"));
/// assert!(record.location.latitude.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaceRecord {
    #[serde(default, alias = "Id", alias = "ID")]
    pub id: Option<RawId>,
    #[serde(default, alias = "Nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "Categoria")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub location: RawLocation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"latitude": 20.59, "longitude": -100.39}"#)]
    #[case(r#"{"Latitud": 20.59, "Longitud": -100.39}"#)]
    #[case(r#"{"lat": 20.59, "lng": -100.39}"#)]
    fn location_accepts_both_naming_conventions(#[case] json: &str) {
        let location: RawLocation = serde_json::from_str(json).expect("decode");
        assert_eq!(location, RawLocation::new(20.59, -100.39));
    }

    #[rstest]
    fn null_coordinates_decode_as_missing() {
        let location: RawLocation =
            serde_json::from_str(r#"{"Latitud": null}"#).expect("decode");
        assert!(location.latitude.is_none());
        assert!(location.longitude.is_none());
    }

    #[rstest]
    fn canonical_record_decodes() {
        let record: PlaceRecord = serde_json::from_str(
            r#"{"id": "t-1", "name": "Templo de San Francisco", "category": "Templo",
                "latitude": "20.5925", "longitude": "-100.3920"}"#,
        )
        .expect("decode");
        assert_eq!(record.id, Some(RawId::Text("t-1".into())));
        assert_eq!(record.category.as_deref(), Some("Templo"));
        assert_eq!(
            record.location.longitude,
            Some(RawCoordinate::Text("-100.3920".into()))
        );
    }

    #[rstest]
    fn raw_id_displays_without_quotes() {
        assert_eq!(RawId::Integer(42).to_string(), "42");
        assert_eq!(RawId::Text("abc".into()).to_string(), "abc");
    }
}
