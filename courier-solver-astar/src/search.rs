//! The best-first search loop over partial routes.
//!
//! States are expanded in ascending `f = g + h` order. A state is a goal when
//! it has visited every stop; the goal test runs when a state is popped, so
//! the first complete route popped is returned. Budgets are checked before
//! each expansion.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use courier_core::{LocationSet, SolveError, Stop, StopSet, TravelTimeMatrix, leg_hours};
use log::{debug, error};

use crate::frontier::{Frontier, SearchState};
use crate::solver::{AStarConfig, Deduplication};

/// A complete route with the bookkeeping that produced it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Found {
    pub(crate) path: Vec<Stop>,
    pub(crate) g: f64,
    pub(crate) expanded: u64,
    pub(crate) generated: u64,
}

/// Tracks which successors may enter the frontier.
enum Seen {
    VisitedSet(HashSet<StopSet>),
    StopAndVisited(HashMap<(Stop, StopSet), f64>),
}

impl Seen {
    fn new(mode: Deduplication, start: &SearchState) -> Self {
        match mode {
            Deduplication::VisitedSet => Self::VisitedSet(HashSet::new()),
            Deduplication::StopAndVisited => {
                Self::StopAndVisited(HashMap::from([((start.stop, start.visited), start.g)]))
            }
        }
    }

    /// Record a generated state, returning whether it should be queued.
    fn admit(&mut self, stop: Stop, visited: StopSet, g: f64) -> bool {
        match self {
            Self::VisitedSet(sets) => sets.insert(visited),
            Self::StopAndVisited(best) => match best.entry((stop, visited)) {
                Entry::Occupied(mut known) => {
                    if g < *known.get() {
                        known.insert(g);
                        true
                    } else {
                        false
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(g);
                    true
                }
            },
        }
    }

    /// Whether a popped state has since been superseded by a cheaper one.
    fn is_stale(&self, state: &SearchState) -> bool {
        match self {
            Self::VisitedSet(_) => false,
            Self::StopAndVisited(best) => best
                .get(&(state.stop, state.visited))
                .is_some_and(|cheapest| state.g > *cheapest),
        }
    }
}

pub(crate) struct RouteSearch<'a> {
    locations: &'a LocationSet,
    matrix: &'a TravelTimeMatrix,
    config: &'a AStarConfig,
}

impl<'a> RouteSearch<'a> {
    pub(crate) const fn new(
        locations: &'a LocationSet,
        matrix: &'a TravelTimeMatrix,
        config: &'a AStarConfig,
    ) -> Self {
        Self {
            locations,
            matrix,
            config,
        }
    }

    fn estimate(&self, stop: Stop, visited: StopSet) -> f64 {
        self.config.heuristic.estimate(self.matrix, stop, visited)
    }

    pub(crate) fn run(&self, started_at: Instant) -> Result<Found, SolveError> {
        let visited = StopSet::only(Stop::Hub);
        let start = SearchState {
            stop: Stop::Hub,
            path: vec![Stop::Hub],
            visited,
            g: 0.0,
            f: self.estimate(Stop::Hub, visited),
        };
        let mut seen = Seen::new(self.config.deduplication, &start);
        let mut frontier = Frontier::default();
        frontier.push(start);
        let mut expanded = 0_u64;
        let mut generated = 0_u64;

        while let Some(current) = frontier.pop() {
            if seen.is_stale(&current) {
                debug!("skipping stale state at {} (g={})", current.stop, current.g);
                continue;
            }
            if current.visited.is_complete() {
                return Ok(Found {
                    path: current.path,
                    g: current.g,
                    expanded,
                    generated,
                });
            }
            self.check_budget(expanded, started_at)?;
            expanded += 1;
            debug!("expanding {:?} g={} f={}", current.path, current.g, current.f);
            for next in Stop::ALL {
                if !current.visited.admits(next) {
                    continue;
                }
                generated += 1;
                let successor = self.successor(&current, next);
                if seen.admit(next, successor.visited, successor.g) {
                    frontier.push(successor);
                } else {
                    debug!("discarding {:?} (g={})", successor.path, successor.g);
                }
            }
        }

        error!(
            "frontier exhausted after {expanded} expansions without a complete route; \
             every valid location set admits one"
        );
        Err(SolveError::NoRouteFound)
    }

    #[expect(clippy::float_arithmetic, reason = "path cost accumulates leg hours")]
    fn successor(&self, current: &SearchState, next: Stop) -> SearchState {
        let g = current.g + leg_hours(self.locations, self.matrix, current.stop, next);
        let visited = current.visited.with(next);
        let mut path = current.path.clone();
        path.push(next);
        SearchState {
            stop: next,
            path,
            visited,
            g,
            f: g + self.estimate(next, visited),
        }
    }

    fn check_budget(&self, expanded: u64, started_at: Instant) -> Result<(), SolveError> {
        let elapsed = started_at.elapsed();
        let over_iterations = self
            .config
            .max_expansions
            .is_some_and(|limit| expanded >= limit);
        let over_time = self
            .config
            .time_budget
            .is_some_and(|limit| elapsed >= limit);
        if over_iterations || over_time {
            return Err(SolveError::BudgetExceeded { expanded, elapsed });
        }
        Ok(())
    }
}
