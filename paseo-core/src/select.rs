//! Category filtering and ordered stop selection.
//!
//! Selection follows the visiting order the user chose: one representative
//! per requested category, in request order. It makes no attempt at
//! per-category optimality. A category with no candidate is skipped rather
//! than failing the call, and the skip is reported in
//! [`Selection::dropped`].

use log::warn;

use crate::{Category, Place, RouteError};

/// Stops picked for an explicit category order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// One place per satisfied category occurrence, in request order.
    pub stops: Vec<Place>,
    /// Categories that produced a stop, parallel to `stops`.
    pub satisfied: Vec<Category>,
    /// Categories that found no candidate, in request order.
    pub dropped: Vec<Category>,
}

/// Keep the candidates whose category appears in `order`.
///
/// Matching is case-insensitive and pool order is preserved. An empty
/// `order` keeps every candidate.
///
/// # Examples
/// ```
/// use paseo_core::{Category, GeoPoint, Place, filter_by_categories};
///
/// let pool = vec![
///     Place::new("1", "Museo Regional", "Museo", GeoPoint::new(20.593, -100.392)),
///     Place::new("2", "La Mariposa", "Restaurante", GeoPoint::new(20.594, -100.391)),
/// ];
/// let kept = filter_by_categories(&[Category::new("MUSEO")], &pool);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].name, "Museo Regional");
/// ```
#[must_use]
pub fn filter_by_categories(order: &[Category], pool: &[Place]) -> Vec<Place> {
    if order.is_empty() {
        return pool.to_vec();
    }
    pool.iter()
        .filter(|place| order.contains(&place.category))
        .cloned()
        .collect()
}

/// Pick the first candidate of each category in `order`.
///
/// Duplicate categories re-select per occurrence, so the same place can
/// appear twice when a category is requested twice.
///
/// # Errors
/// Returns [`RouteError::NoValidWaypoints`] when no category in `order`
/// yields a stop.
///
/// # Examples
/// ```
/// use paseo_core::{Category, GeoPoint, Place, select_ordered_stops};
///
/// let pool = vec![
///     Place::new("t", "Templo de la Cruz", "Templo", GeoPoint::new(20.592, -100.383)),
///     Place::new("m", "Museo Regional", "Museo", GeoPoint::new(20.593, -100.392)),
/// ];
/// let order = [Category::new("Museo"), Category::new("Templo")];
/// let selection = select_ordered_stops(&order, &pool).unwrap();
/// let ids: Vec<_> = selection.stops.iter().map(|p| p.id.as_str()).collect();
/// assert_eq!(ids, ["m", "t"]);
/// ```
pub fn select_ordered_stops(
    order: &[Category],
    candidates: &[Place],
) -> Result<Selection, RouteError> {
    let mut selection = Selection {
        stops: Vec::with_capacity(order.len()),
        satisfied: Vec::with_capacity(order.len()),
        dropped: Vec::new(),
    };

    for category in order {
        match candidates.iter().find(|place| &place.category == category) {
            Some(place) => {
                selection.stops.push(place.clone());
                selection.satisfied.push(category.clone());
            }
            None => {
                warn!("skipping category {category}: no valid candidate");
                selection.dropped.push(category.clone());
            }
        }
    }

    if selection.stops.is_empty() {
        return Err(RouteError::NoValidWaypoints {
            categories: order.to_vec(),
        });
    }
    Ok(selection)
}
