//! Core domain types for the courier route engine.
//!
//! A delivery run has five fixed stops: the hub, two restaurants and the two
//! customers they serve. This crate validates their positions, derives
//! travel times, prices routes and defines the [`Solver`] seam that search
//! strategies implement. [`Planner`] ties these together into a single
//! request/response call.
//!
//! Constructors return `Result` so invalid input is rejected before any
//! search runs.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cost;
mod location;
mod plan;
mod route;
mod solver;
mod stop;
pub mod travel_time;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cost::{Leg, RouteCostEvaluator, leg_hours};
pub use location::{LocationField, LocationSet, LocationSetError, Restaurant};
pub use plan::{DeliveryRequest, PlanResponse, PlanStatus, Planner};
pub use route::{Route, RouteError, is_precedence_valid};
pub use solver::{Diagnostics, Solution, SolveError, Solver};
pub use stop::{ParseStopError, STOP_COUNT, Stop, StopSet};
pub use travel_time::{
    AVERAGE_SPEED_KMH, HaversineTravelTime, TravelTimeError, TravelTimeMatrix, TravelTimeModel,
    haversine_km, travel_time_hours,
};
