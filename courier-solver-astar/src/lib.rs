//! Best-first route search for courier deliveries.
//!
//! This crate provides [`AStarSolver`], the default implementation of the
//! [`Solver`](courier_core::Solver) trait. It explores partial routes from the
//! hub in ascending order of elapsed time plus a remaining-time estimate,
//! honouring the rule that each customer follows its restaurant.
//!
//! The default configuration is optimal: an admissible
//! [`HeuristicKind::NearestUnvisited`] estimate and
//! [`Deduplication::StopAndVisited`] state merging. [`AStarConfig::legacy`]
//! restores the behaviour of the dispatcher this engine replaced, which can
//! return slower routes.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod frontier;
mod heuristic;
mod search;
mod solver;

pub use heuristic::{HeuristicKind, ParseOptionError};
pub use solver::{AStarConfig, AStarSolver, Deduplication};
