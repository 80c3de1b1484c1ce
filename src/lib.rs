//! Facade crate for the courier route engine.
//!
//! This crate re-exports the core domain types and exposes the solver
//! implementations behind feature flags.

#![forbid(unsafe_code)]

pub use courier_core::{
    DeliveryRequest, Diagnostics, HaversineTravelTime, Leg, LocationSet, LocationSetError,
    PlanResponse, PlanStatus, Planner, Restaurant, Route, RouteCostEvaluator, RouteError,
    Solution, SolveError, Solver, Stop, StopSet, TravelTimeError, TravelTimeMatrix,
    TravelTimeModel,
};

#[cfg(feature = "solver-astar")]
pub use courier_solver_astar::{AStarConfig, AStarSolver, Deduplication, HeuristicKind};

#[cfg(feature = "solver-exhaustive")]
pub use courier_solver_exhaustive::ExhaustiveSolver;

#[cfg(all(test, feature = "solver-astar"))]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_request_plans_an_instant_run() {
        let planner = Planner::new(AStarSolver::new());
        let response = planner.plan(&DeliveryRequest::default());
        assert_eq!(response.status, PlanStatus::Ok);
        assert_eq!(response.estimated_time_hours, Some(0.0));
        assert_eq!(
            response.route,
            Some(vec![
                Stop::Hub,
                Stop::Restaurant1,
                Stop::Restaurant2,
                Stop::Customer1,
                Stop::Customer2,
            ])
        );
    }
}
