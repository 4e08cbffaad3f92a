//! Error taxonomy of the route pipeline.

use thiserror::Error;

use crate::{Category, DirectionsError, LocationError};

/// Coarse classification of every failure the pipeline can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Origin or destination failed location validation.
    InvalidEndpoints,
    /// No candidate place matches the requested categories.
    NoPlacesForCategories,
    /// Ordered selection produced no stop at all.
    NoValidWaypoints,
    /// The directions provider answered with a failure or could not be used.
    DirectionsUnavailable,
    /// The directions provider did not answer within the bounded wait.
    DirectionsTimeout,
    /// A candidate record was dropped during sanitizing.
    MalformedPlaceRecord,
}

/// Which endpoint of the route failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Origin,
    Destination,
}

impl std::fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
        })
    }
}

fn labels(categories: &[Category]) -> String {
    categories
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors returned by [`RouteOptimizer::optimize_route`](crate::RouteOptimizer::optimize_route).
///
/// Every variant is fatal for the current call. No partial route accompanies
/// an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// Origin or destination is missing, malformed or outside the area.
    #[error("{endpoint} is not a usable location: {source}")]
    InvalidEndpoints {
        endpoint: EndpointRole,
        #[source]
        source: LocationError,
    },
    /// Filtering the pool by category left nothing to visit.
    #[error("no candidate places for categories [{}]", labels(.categories))]
    NoPlacesForCategories { categories: Vec<Category> },
    /// No requested category produced a representative stop.
    #[error("no stop could be selected for categories [{}]", labels(.categories))]
    NoValidWaypoints { categories: Vec<Category> },
    /// The directions provider failed; the provider error is kept unchanged.
    #[error(transparent)]
    Directions(#[from] DirectionsError),
}

impl RouteError {
    /// Classify the error.
    ///
    /// # Examples
    /// ```
    /// use paseo_core::{DirectionsError, ErrorKind, RouteError};
    ///
    /// let err = RouteError::from(DirectionsError::Timeout { timeout_secs: 10 });
    /// assert_eq!(err.kind(), ErrorKind::DirectionsTimeout);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEndpoints { .. } => ErrorKind::InvalidEndpoints,
            Self::NoPlacesForCategories { .. } => ErrorKind::NoPlacesForCategories,
            Self::NoValidWaypoints { .. } => ErrorKind::NoValidWaypoints,
            Self::Directions(DirectionsError::Timeout { .. }) => ErrorKind::DirectionsTimeout,
            Self::Directions(_) => ErrorKind::DirectionsUnavailable,
        }
    }

    /// Explanatory text for the map view to show in place of a route.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEndpoints { endpoint, source } => match source {
                LocationError::Missing { .. } => {
                    format!("The selected {endpoint} has no location.")
                }
                LocationError::Unparseable { .. } => {
                    format!("The selected {endpoint} has a location that could not be read.")
                }
                LocationError::OutsideServiceArea { .. } => {
                    format!("The selected {endpoint} is outside the area covered by the planner.")
                }
            },
            Self::NoPlacesForCategories { .. } => {
                "There are no places for the selected categories.".to_owned()
            }
            Self::NoValidWaypoints { .. } => {
                "None of the selected categories has a place with a usable location.".to_owned()
            }
            Self::Directions(DirectionsError::Timeout { .. }) => {
                "The directions service took too long to answer. Please try again.".to_owned()
            }
            Self::Directions(_) => {
                "A walking route could not be obtained right now. Please try again later."
                    .to_owned()
            }
        }
    }
}
