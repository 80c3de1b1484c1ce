//! The seam between planning and the search strategies behind it.

use std::time::Duration;

use thiserror::Error;

use crate::{LocationSet, Route, TravelTimeError};

/// Search statistics reported alongside a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    /// Wall-clock time spent solving.
    pub solve_time: Duration,
    /// States taken off the frontier and expanded.
    pub states_expanded: u64,
    /// Successor states created, including ones later discarded.
    pub states_generated: u64,
}

/// A complete route found by a [`Solver`].
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// The chosen visiting order.
    pub route: Route,
    /// Elapsed hours as accumulated by the solver while building the route.
    pub total_hours: f64,
    /// Search statistics.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The search ran out of states without completing a route.
    ///
    /// Every valid location set admits a route, so this signals a defect in
    /// the solver rather than a property of the input.
    #[error("search exhausted every state without completing a route")]
    NoRouteFound,
    /// The configured iteration or wall-clock budget ran out first.
    #[error("search budget exceeded after {expanded} expansions in {elapsed:?}")]
    BudgetExceeded {
        /// States expanded before giving up.
        expanded: u64,
        /// Time spent before giving up.
        elapsed: Duration,
    },
    /// Travel times could not be derived from the locations.
    #[error(transparent)]
    TravelTime(#[from] TravelTimeError),
}

/// Find a minimum-time visiting order for a validated location set.
///
/// Implementations are pure functions of their input: no state is shared
/// between calls, so solvers must be `Send + Sync` and safe to call
/// concurrently.
///
/// # Examples
/// ```rust
/// use courier_core::{Diagnostics, LocationSet, Route, Solution, SolveError, Solver, Stop};
///
/// struct FixedOrder;
///
/// impl Solver for FixedOrder {
///     fn solve(&self, _locations: &LocationSet) -> Result<Solution, SolveError> {
///         let route = Route::new(&[
///             Stop::Hub,
///             Stop::Restaurant1,
///             Stop::Customer1,
///             Stop::Restaurant2,
///             Stop::Customer2,
///         ])
///         .map_err(|_| SolveError::NoRouteFound)?;
///         Ok(Solution { route, total_hours: 0.0, diagnostics: Diagnostics::default() })
///     }
/// }
/// ```
pub trait Solver: Send + Sync {
    /// Solve for `locations`, producing a route or an error.
    ///
    /// # Errors
    /// Returns [`SolveError`] when no route could be produced.
    fn solve(&self, locations: &LocationSet) -> Result<Solution, SolveError>;
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn solve(&self, locations: &LocationSet) -> Result<Solution, SolveError> {
        (**self).solve(locations)
    }
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve(&self, locations: &LocationSet) -> Result<Solution, SolveError> {
        (**self).solve(locations)
    }
}
