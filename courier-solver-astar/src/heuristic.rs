//! Remaining-cost estimates used to order the frontier.

use std::fmt;
use std::str::FromStr;

use courier_core::{Stop, StopSet, TravelTimeMatrix};
use thiserror::Error;

/// How the search estimates the hours still to come from a partial route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeuristicKind {
    /// Travel time from the current stop to the closest unvisited stop.
    ///
    /// The next leg always costs at least its drive, so this never
    /// overestimates and the search stays optimal.
    #[default]
    NearestUnvisited,
    /// Sum of direct travel times from the current stop to every unvisited
    /// stop.
    ///
    /// Matches the dispatcher this engine replaced. It usually overestimates
    /// the remaining tour, so the returned route may not be the fastest.
    DirectSum,
    /// No estimate; the search degrades to uniform-cost search.
    Zero,
}

impl HeuristicKind {
    /// Estimated hours to finish from `at` having visited `visited`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "travel times are summed")]
    pub fn estimate(self, matrix: &TravelTimeMatrix, at: Stop, visited: StopSet) -> f64 {
        let remaining = visited.complement().iter().map(|stop| matrix.hours(at, stop));
        match self {
            Self::NearestUnvisited => remaining.reduce(f64::min).unwrap_or(0.0),
            Self::DirectSum => remaining.fold(0.0, |total, hours| total + hours),
            Self::Zero => 0.0,
        }
    }

    /// Stable kebab-case name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NearestUnvisited => "nearest-unvisited",
            Self::DirectSum => "direct-sum",
            Self::Zero => "zero",
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a search option from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {option} '{value}'")]
pub struct ParseOptionError {
    /// Option being parsed.
    pub option: &'static str,
    /// Rejected input.
    pub value: String,
}

impl FromStr for HeuristicKind {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest-unvisited" | "nearest_unvisited" => Ok(Self::NearestUnvisited),
            "direct-sum" | "direct_sum" | "legacy" => Ok(Self::DirectSum),
            "zero" | "none" => Ok(Self::Zero),
            _ => Err(ParseOptionError {
                option: "heuristic",
                value: s.to_owned(),
            }),
        }
    }
}
