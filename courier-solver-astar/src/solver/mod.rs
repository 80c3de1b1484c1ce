//! `AStarSolver` configuration and its `Solver` implementation.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use courier_core::{
    Diagnostics, HaversineTravelTime, LocationSet, Route, Solution, SolveError, Solver,
    TravelTimeModel,
};
use log::{error, info};

use crate::heuristic::{HeuristicKind, ParseOptionError};
use crate::search::RouteSearch;

/// Which generated states are allowed onto the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Deduplication {
    /// Keep the cheapest state per `(current stop, visited set)` and drop
    /// superseded frontier entries when they surface.
    #[default]
    StopAndVisited,
    /// Keep only the first state generated for each visited set, whatever
    /// its current stop or cost.
    ///
    /// Reproduces the dispatcher this engine replaced. It can prune the
    /// fastest route.
    VisitedSet,
}

impl Deduplication {
    /// Stable kebab-case name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StopAndVisited => "stop-and-visited",
            Self::VisitedSet => "visited-set",
        }
    }
}

impl fmt::Display for Deduplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Deduplication {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stop-and-visited" | "stop_and_visited" => Ok(Self::StopAndVisited),
            "visited-set" | "visited_set" | "legacy" => Ok(Self::VisitedSet),
            _ => Err(ParseOptionError {
                option: "deduplication",
                value: s.to_owned(),
            }),
        }
    }
}

/// Configuration for [`AStarSolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AStarConfig {
    /// Remaining-cost estimate.
    pub heuristic: HeuristicKind,
    /// Frontier admission rule.
    pub deduplication: Deduplication,
    /// Upper bound on expanded states; `None` searches until done.
    pub max_expansions: Option<u64>,
    /// Upper bound on wall-clock time; `None` disables the check.
    pub time_budget: Option<Duration>,
}

impl AStarConfig {
    /// Default expansion cap, far above the number of reachable states.
    pub const DEFAULT_MAX_EXPANSIONS: u64 = 10_000;

    /// The heuristic and deduplication of the dispatcher this engine
    /// replaced, kept for comparing routes with historical output.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            heuristic: HeuristicKind::DirectSum,
            deduplication: Deduplication::VisitedSet,
            ..Self::default()
        }
    }
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            heuristic: HeuristicKind::default(),
            deduplication: Deduplication::default(),
            max_expansions: Some(Self::DEFAULT_MAX_EXPANSIONS),
            time_budget: None,
        }
    }
}

/// Best-first route search over the five delivery stops.
///
/// Generic over the travel-time model so tests can swap in fixed matrices.
///
/// # Examples
/// ```
/// use courier_core::{DeliveryRequest, PlanStatus, Planner};
/// use courier_solver_astar::AStarSolver;
///
/// let planner = Planner::new(AStarSolver::new());
/// let request = DeliveryRequest {
///     restaurant1_prep_time: 0.5,
///     ..DeliveryRequest::default()
/// };
/// let response = planner.plan(&request);
/// assert_eq!(response.status, PlanStatus::Ok);
/// assert_eq!(response.estimated_time_hours, Some(0.5));
/// ```
#[derive(Debug, Clone)]
pub struct AStarSolver<T = HaversineTravelTime> {
    travel_time: T,
    config: AStarConfig,
}

impl AStarSolver {
    /// Construct a solver with the default speed and configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AStarConfig::default())
    }

    /// Construct a solver at the default speed with explicit configuration.
    #[must_use]
    pub fn with_config(config: AStarConfig) -> Self {
        Self::with_travel_time(HaversineTravelTime::default(), config)
    }
}

impl Default for AStarSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TravelTimeModel> AStarSolver<T> {
    /// Construct a solver over an explicit travel-time model.
    pub const fn with_travel_time(travel_time: T, config: AStarConfig) -> Self {
        Self {
            travel_time,
            config,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &AStarConfig {
        &self.config
    }
}

impl<T> Solver for AStarSolver<T>
where
    T: TravelTimeModel + Send + Sync,
{
    fn solve(&self, locations: &LocationSet) -> Result<Solution, SolveError> {
        let started_at = Instant::now();
        info!(
            "starting route search (heuristic={}, deduplication={})",
            self.config.heuristic, self.config.deduplication
        );
        let matrix = self.travel_time.travel_time_matrix(locations)?;
        let found = RouteSearch::new(locations, &matrix, &self.config).run(started_at)?;
        let route = Route::new(&found.path).map_err(|err| {
            error!("search produced an invalid route {:?}: {err}", found.path);
            SolveError::NoRouteFound
        })?;
        info!("finalised route {route} (g={})", found.g);
        Ok(Solution {
            route,
            total_hours: found.g,
            diagnostics: Diagnostics {
                solve_time: started_at.elapsed(),
                states_expanded: found.expanded,
                states_generated: found.generated,
            },
        })
    }
}
