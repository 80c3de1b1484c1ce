//! Exhaustive route enumeration.
//!
//! With the hub fixed first, a delivery run has 24 orderings of the remaining
//! four stops, of which six serve every customer after its restaurant.
//! [`ExhaustiveSolver`] prices each of them and keeps the fastest, which makes
//! it a simple optimal reference for the heuristic search.

#![forbid(unsafe_code)]

use std::time::Instant;

use courier_core::{
    Diagnostics, HaversineTravelTime, LocationSet, Route, RouteCostEvaluator, STOP_COUNT,
    Solution, SolveError, Solver, Stop, TravelTimeModel, is_precedence_valid,
};
use log::{debug, info};

/// Optimal solver that evaluates every valid route.
///
/// Ties keep the route enumerated first; orderings are enumerated
/// lexicographically by [`Stop::ALL`] position, so results are reproducible.
///
/// # Examples
/// ```
/// use courier_core::{LocationSet, Restaurant, Solver};
/// use courier_solver_exhaustive::ExhaustiveSolver;
/// use geo::Coord;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let here = Coord { x: 0.0, y: 0.0 };
/// let set = LocationSet::new(here, Restaurant::new(here, 0.25), Restaurant::new(here, 0.5), here, here)?;
/// let solution = ExhaustiveSolver::new().solve(&set)?;
/// assert_eq!(solution.total_hours, 0.75);
/// assert_eq!(solution.diagnostics.states_expanded, 6);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveSolver<T = HaversineTravelTime> {
    travel_time: T,
}

impl ExhaustiveSolver {
    /// Construct a solver at the default courier speed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_travel_time(HaversineTravelTime::default())
    }
}

impl<T: TravelTimeModel> ExhaustiveSolver<T> {
    /// Construct a solver over an explicit travel-time model.
    pub const fn with_travel_time(travel_time: T) -> Self {
        Self { travel_time }
    }
}

impl<T> Solver for ExhaustiveSolver<T>
where
    T: TravelTimeModel + Send + Sync,
{
    fn solve(&self, locations: &LocationSet) -> Result<Solution, SolveError> {
        let started_at = Instant::now();
        let matrix = self.travel_time.travel_time_matrix(locations)?;
        let evaluator = RouteCostEvaluator::new(locations, &matrix);

        let orderings = orderings();
        let mut evaluated = 0_u64;
        let mut best: Option<(Route, f64)> = None;
        for stops in &orderings {
            if !is_precedence_valid(stops) {
                continue;
            }
            let Ok(route) = Route::new(stops) else {
                continue;
            };
            evaluated += 1;
            let hours = evaluator.total_hours(&route);
            debug!("{route}: {hours} hours");
            if best.as_ref().is_none_or(|(_, fastest)| hours < *fastest) {
                best = Some((route, hours));
            }
        }

        let (route, total_hours) = best.ok_or(SolveError::NoRouteFound)?;
        info!("fastest of {evaluated} routes: {route} ({total_hours} hours)");
        Ok(Solution {
            route,
            total_hours,
            diagnostics: Diagnostics {
                solve_time: started_at.elapsed(),
                states_expanded: evaluated,
                states_generated: u64::try_from(orderings.len()).unwrap_or(u64::MAX),
            },
        })
    }
}

/// Every ordering of the non-hub stops, prefixed with the hub.
fn orderings() -> Vec<Vec<Stop>> {
    let mut out = Vec::new();
    let mut path = Vec::with_capacity(STOP_COUNT);
    path.push(Stop::Hub);
    permute(&mut path, &mut out);
    out
}

fn permute(path: &mut Vec<Stop>, out: &mut Vec<Vec<Stop>>) {
    if path.len() == STOP_COUNT {
        out.push(path.clone());
        return;
    }
    for stop in Stop::ALL {
        if path.contains(&stop) {
            continue;
        }
        path.push(stop);
        permute(path, out);
        path.pop();
    }
}
