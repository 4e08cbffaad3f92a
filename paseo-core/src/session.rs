//! Single-writer holder for the latest planned route.
//!
//! A UI may start a new plan while an older one is still waiting on the
//! directions provider. [`RouteSession`] stamps every call with a generation
//! number and only lets the newest call publish its result, so a slow
//! response can never replace a fresher route.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use log::debug;
use thiserror::Error;

use crate::{DirectionsProvider, RouteError, RouteOptimizer, RouteRequest, RouteResult};

/// Errors returned by [`RouteSession::generate_route`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// A newer call (or a reset) started before this one completed.
    #[error("route request was superseded by a newer one")]
    Superseded,
    /// The pipeline failed.
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Decrements the in-flight counter when a call finishes or is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Owns a [`RouteOptimizer`] and the most recent route it produced.
#[derive(Debug)]
pub struct RouteSession<D> {
    optimizer: RouteOptimizer<D>,
    generation: AtomicU64,
    in_flight: AtomicUsize,
    latest: Mutex<Option<RouteResult>>,
}

impl<D> RouteSession<D>
where
    D: DirectionsProvider,
{
    /// Wrap `optimizer` in a session with no route yet.
    pub const fn new(optimizer: RouteOptimizer<D>) -> Self {
        Self {
            optimizer,
            generation: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            latest: Mutex::new(None),
        }
    }

    /// The wrapped optimizer.
    #[must_use]
    pub const fn optimizer(&self) -> &RouteOptimizer<D> {
        &self.optimizer
    }

    /// Plan a route and publish it if no newer call started meanwhile.
    ///
    /// A failure of the newest call clears the published route.
    ///
    /// # Errors
    /// [`SessionError::Superseded`] when a newer call or a [`reset`](Self::reset)
    /// happened first; the stale outcome is discarded. Otherwise the
    /// pipeline's [`RouteError`].
    pub async fn generate_route(
        &self,
        request: &RouteRequest,
    ) -> Result<RouteResult, SessionError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight::enter(&self.in_flight);

        let outcome = self.optimizer.optimize_route(request).await;

        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!("discarding outcome of superseded route request #{ticket}");
            return Err(SessionError::Superseded);
        }
        match outcome {
            Ok(route) => {
                *latest = Some(route.clone());
                Ok(route)
            }
            Err(err) => {
                *latest = None;
                Err(err.into())
            }
        }
    }

    /// The most recently published route.
    #[must_use]
    pub fn latest(&self) -> Option<RouteResult> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clear the published route and invalidate calls still in flight.
    pub fn reset(&self) {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        self.generation.fetch_add(1, Ordering::SeqCst);
        *latest = None;
    }

    /// Whether any call is still running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}
