//! Route optimizer: the end-to-end pipeline from request to route.
//!
//! [`RouteOptimizer::optimize_route`] drives a small state machine:
//!
//! ```text
//! Idle -> Validating -> Selecting -> Requesting -> Done
//!              \            \            \
//!               +------------+------------+--> Failed
//! ```
//!
//! Each call runs the stages sequentially. The only suspension point is the
//! directions request. Failures are never retried.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    CandidatePool, Category, Directions, DirectionsProvider, EncodedPolyline, EndpointRole,
    GeoPoint, Leg, Place, RawLocation, RouteError, ServiceArea, filter_by_categories,
    request_walking_route, route_by_nearest_neighbor, select_ordered_stops, validate_location,
};

/// Who decides the visiting order when no category order is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingAuthority {
    /// Order stops by greedy nearest neighbour and ask the provider to keep it.
    #[default]
    Core,
    /// Let the directions provider optimise the order.
    Provider,
}

impl fmt::Display for OrderingAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Core => "core",
            Self::Provider => "provider",
        })
    }
}

/// Error returned when parsing an unknown [`OrderingAuthority`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ordering authority `{0}`; expected `core` or `provider`")]
pub struct ParseOrderingError(String);

impl FromStr for OrderingAuthority {
    type Err = ParseOrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "core" => Ok(Self::Core),
            "provider" => Ok(Self::Provider),
            _ => Err(ParseOrderingError(s.to_owned())),
        }
    }
}

/// Settings for [`RouteOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OptimizerConfig {
    /// Region endpoints must fall within.
    pub area: ServiceArea,
    /// Ordering used when the request carries no category order.
    pub ordering: OrderingAuthority,
}

impl OptimizerConfig {
    /// Set the service area.
    #[must_use]
    pub const fn with_area(mut self, area: ServiceArea) -> Self {
        self.area = area;
        self
    }

    /// Set the ordering authority.
    #[must_use]
    pub const fn with_ordering(mut self, ordering: OrderingAuthority) -> Self {
        self.ordering = ordering;
        self
    }
}

/// A named route endpoint as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    #[serde(flatten)]
    pub location: RawLocation,
}

impl Endpoint {
    /// Construct an endpoint from a name and a raw location.
    pub fn new(name: impl Into<String>, location: RawLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// An endpoint whose location passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEndpoint {
    pub name: String,
    pub location: GeoPoint,
}

/// Input of [`RouteOptimizer::optimize_route`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteRequest {
    pub origin: Endpoint,
    pub destination: Endpoint,
    /// Categories to visit, in order. Empty means "visit every candidate".
    pub category_order: Vec<Category>,
    pub candidates: CandidatePool,
}

/// A planned walking route.
///
/// `waypoints` never contains the origin or the destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub origin: ResolvedEndpoint,
    pub destination: ResolvedEndpoint,
    /// Intermediate stops in visiting order.
    pub waypoints: Vec<Place>,
    pub polyline: EncodedPolyline,
    /// One leg per hop.
    pub legs: Vec<Leg>,
    /// The category order that produced this route, as requested.
    pub ordered_categories: Vec<Category>,
    /// Requested categories that produced no stop.
    pub dropped_categories: Vec<Category>,
    /// Which side fixed the visiting order.
    pub ordering: OrderingAuthority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Validating,
    Selecting,
    Requesting,
    Done,
    Failed,
}

impl Stage {
    const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Validating)
                | (Self::Validating, Self::Selecting | Self::Failed)
                | (Self::Selecting, Self::Requesting | Self::Failed)
                | (Self::Requesting, Self::Done | Self::Failed)
        )
    }

    fn advance(&mut self, next: Self) {
        debug_assert!(
            self.can_advance_to(next),
            "illegal transition {self:?} -> {next:?}"
        );
        debug!("route pipeline: {self:?} -> {next:?}");
        *self = next;
    }
}

/// Stops chosen during the selecting stage.
struct Plan {
    stops: Vec<Place>,
    dropped: Vec<Category>,
    preserve_order: bool,
    ordering: OrderingAuthority,
}

/// Plans walking routes through candidate places.
///
/// # Examples
/// ```
/// use paseo_core::{
///     CandidatePool, Category, Endpoint, GeoPoint, Place, RawLocation, RouteOptimizer,
///     RouteRequest, test_support::FixedDirections,
/// };
///
/// # tokio_test_block_on(async {
/// let optimizer = RouteOptimizer::new(FixedDirections::default());
/// let request = RouteRequest {
///     origin: Endpoint::new("Jardín Zenea", RawLocation::new(20.5888, -100.3899)),
///     destination: Endpoint::new("Alameda", RawLocation::new(20.6042, -100.4028)),
///     category_order: vec![Category::new("Museo")],
///     candidates: CandidatePool::from(vec![Place::new(
///         "1",
///         "Museo Regional",
///         "Museo",
///         GeoPoint::new(20.595, -100.395),
///     )]),
/// };
/// let route = optimizer.optimize_route(&request).await.unwrap();
/// assert_eq!(route.waypoints.len(), 1);
/// assert_eq!(route.legs.len(), 2);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug)]
pub struct RouteOptimizer<D> {
    provider: D,
    config: OptimizerConfig,
}

impl<D> RouteOptimizer<D>
where
    D: DirectionsProvider,
{
    /// Create an optimizer with the default configuration.
    pub fn new(provider: D) -> Self {
        Self::with_config(provider, OptimizerConfig::default())
    }

    /// Create an optimizer with an explicit configuration.
    pub const fn with_config(provider: D, config: OptimizerConfig) -> Self {
        Self { provider, config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// The directions provider.
    #[must_use]
    pub const fn provider(&self) -> &D {
        &self.provider
    }

    /// Plan a route for `request`.
    ///
    /// # Errors
    /// - [`RouteError::InvalidEndpoints`] when the origin or destination is
    ///   missing, malformed or outside the service area.
    /// - [`RouteError::NoPlacesForCategories`] when no candidate matches.
    /// - [`RouteError::NoValidWaypoints`] when no requested category yields a
    ///   stop.
    /// - [`RouteError::Directions`] when the provider fails.
    pub async fn optimize_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        let mut stage = Stage::Idle;
        let outcome = self.run(request, &mut stage).await;
        match &outcome {
            Ok(route) => {
                stage.advance(Stage::Done);
                debug!(
                    "planned route with {} waypoint(s) and {} leg(s)",
                    route.waypoints.len(),
                    route.legs.len()
                );
            }
            Err(err) => {
                stage.advance(Stage::Failed);
                debug!("route planning failed: {err}");
            }
        }
        outcome
    }

    async fn run(
        &self,
        request: &RouteRequest,
        stage: &mut Stage,
    ) -> Result<RouteResult, RouteError> {
        stage.advance(Stage::Validating);
        let origin = self.resolve(&request.origin, EndpointRole::Origin)?;
        let destination = self.resolve(&request.destination, EndpointRole::Destination)?;

        stage.advance(Stage::Selecting);
        let plan = self.select(request, &origin.location, &destination.location)?;

        stage.advance(Stage::Requesting);
        let directions = request_walking_route(
            &self.provider,
            origin.location,
            destination.location,
            &plan.stops,
            plan.preserve_order,
        )
        .await?;

        Ok(assemble(
            origin,
            destination,
            &request.category_order,
            plan,
            directions,
        ))
    }

    fn resolve(
        &self,
        endpoint: &Endpoint,
        role: EndpointRole,
    ) -> Result<ResolvedEndpoint, RouteError> {
        let location = validate_location(&endpoint.location, &self.config.area)
            .map_err(|source| RouteError::InvalidEndpoints {
                endpoint: role,
                source,
            })?;
        Ok(ResolvedEndpoint {
            name: endpoint.name.clone(),
            location,
        })
    }

    fn select(
        &self,
        request: &RouteRequest,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Plan, RouteError> {
        let order = &request.category_order;
        let filtered: Vec<Place> = filter_by_categories(order, &request.candidates)
            .into_iter()
            .filter(|place| self.in_area(place))
            .collect();
        if filtered.is_empty() {
            return Err(RouteError::NoPlacesForCategories {
                categories: order.clone(),
            });
        }

        if !order.is_empty() {
            let selection = select_ordered_stops(order, &filtered)?;
            return Ok(Plan {
                stops: selection.stops,
                dropped: selection.dropped,
                preserve_order: true,
                ordering: OrderingAuthority::Core,
            });
        }

        let (stops, preserve_order) = match self.config.ordering {
            OrderingAuthority::Core => {
                let tour = route_by_nearest_neighbor(origin, destination, &filtered);
                debug!("nearest-neighbour tour length {:.3} km", tour.length_km);
                (tour.stops, true)
            }
            OrderingAuthority::Provider => (filtered, false),
        };
        Ok(Plan {
            stops,
            dropped: Vec::new(),
            preserve_order,
            ordering: self.config.ordering,
        })
    }

    fn in_area(&self, place: &Place) -> bool {
        let inside = self.config.area.contains(&place.location);
        if !inside {
            warn!(
                "skipping place {} ({}): location {:?} is outside the service area",
                place.id.as_str(),
                place.name,
                place.location
            );
        }
        inside
    }
}

fn assemble(
    origin: ResolvedEndpoint,
    destination: ResolvedEndpoint,
    category_order: &[Category],
    plan: Plan,
    directions: Directions,
) -> RouteResult {
    let Plan {
        mut stops,
        dropped,
        preserve_order,
        ordering,
    } = plan;

    if !preserve_order {
        match apply_order(&stops, &directions.waypoint_order) {
            Some(reordered) => stops = reordered,
            None => warn!(
                "ignoring invalid waypoint order {:?} for {} stop(s)",
                directions.waypoint_order,
                stops.len()
            ),
        }
    }

    RouteResult {
        origin,
        destination,
        waypoints: stops,
        polyline: directions.polyline,
        legs: directions.legs,
        ordered_categories: category_order.to_vec(),
        dropped_categories: dropped,
        ordering,
    }
}

/// Reorder `stops` by `order`, which must be a permutation of their indices.
fn apply_order(stops: &[Place], order: &[usize]) -> Option<Vec<Place>> {
    if order.len() != stops.len() {
        return None;
    }
    let mut seen = vec![false; stops.len()];
    let mut reordered = Vec::with_capacity(stops.len());
    for &index in order {
        let slot = seen.get_mut(index)?;
        if *slot {
            return None;
        }
        *slot = true;
        reordered.push(stops.get(index)?.clone());
    }
    Some(reordered)
}
