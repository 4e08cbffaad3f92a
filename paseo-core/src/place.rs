use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Category, GeoPoint};

/// Backend identifier of a place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub String);

impl PlaceId {
    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A candidate point of interest with a validated location.
///
/// # Examples
/// ```
/// use paseo_core::{Category, GeoPoint, Place};
///
/// let museo = Place::new("1", "Museo Regional", "Museo", GeoPoint::new(20.595, -100.395));
/// assert_eq!(museo.category, Category::new("museo"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub category: Category,
    pub location: GeoPoint,
}

impl Place {
    /// Construct a place from already-validated parts.
    pub fn new(
        id: impl Into<PlaceId>,
        name: impl Into<String>,
        category: impl Into<Category>,
        location: GeoPoint,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            location,
        }
    }
}

/// The immutable set of candidate places a route is chosen from.
///
/// Loaded once and shared read-only between requests; cloning only bumps a
/// reference count.
///
/// # Examples
/// ```
/// use paseo_core::{CandidatePool, GeoPoint, Place};
///
/// let pool = CandidatePool::from(vec![
///     Place::new("1", "Museo Regional", "Museo", GeoPoint::new(20.595, -100.395)),
/// ]);
/// let shared = pool.clone();
/// assert_eq!(shared.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    places: Arc<[Place]>,
}

impl CandidatePool {
    /// Borrow the places in load order.
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }
}

impl Deref for CandidatePool {
    type Target = [Place];

    fn deref(&self) -> &Self::Target {
        &self.places
    }
}

impl From<Vec<Place>> for CandidatePool {
    fn from(places: Vec<Place>) -> Self {
        Self {
            places: places.into(),
        }
    }
}

impl FromIterator<Place> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = Place>>(iter: I) -> Self {
        Self {
            places: iter.into_iter().collect(),
        }
    }
}
