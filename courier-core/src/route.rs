//! Complete visiting orders.
//!
//! A [`Route`] always holds all five stops, starts at the hub and visits each
//! restaurant before its customer. Partial orderings can be checked with
//! [`is_precedence_valid`].

use thiserror::Error;

use crate::{STOP_COUNT, Stop, StopSet};

/// Errors returned by [`Route::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The ordering did not hold exactly five stops.
    #[error("route must visit exactly five stops, got {0}")]
    WrongLength(usize),
    /// The first stop was not the hub.
    #[error("route must start at the hub")]
    MustStartAtHub,
    /// A stop appeared more than once.
    #[error("{0} appears more than once")]
    DuplicateStop(Stop),
    /// A customer was visited before its restaurant.
    #[error("{customer} visited before {restaurant}")]
    PrecedenceViolated {
        /// Customer reached too early.
        customer: Stop,
        /// Restaurant that had to come first.
        restaurant: Stop,
    },
}

/// A precedence-valid visiting order over all five stops.
///
/// # Examples
/// ```
/// use courier_core::{Route, Stop};
///
/// # fn main() -> Result<(), courier_core::RouteError> {
/// let route = Route::new(&[
///     Stop::Hub,
///     Stop::Restaurant2,
///     Stop::Restaurant1,
///     Stop::Customer2,
///     Stop::Customer1,
/// ])?;
/// assert_eq!(route.stops()[1], Stop::Restaurant2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Route {
    stops: [Stop; STOP_COUNT],
}

impl Route {
    /// Validate and construct a route.
    ///
    /// # Errors
    /// Returns [`RouteError`] when the ordering is not a precedence-valid
    /// permutation of the five stops starting at the hub.
    pub fn new(stops: &[Stop]) -> Result<Self, RouteError> {
        let array: [Stop; STOP_COUNT] = stops
            .try_into()
            .map_err(|_| RouteError::WrongLength(stops.len()))?;
        if array.first() != Some(&Stop::Hub) {
            return Err(RouteError::MustStartAtHub);
        }
        check_ordering(&array)?;
        Ok(Self { stops: array })
    }

    /// Stops in visiting order.
    #[must_use]
    pub const fn stops(&self) -> &[Stop; STOP_COUNT] {
        &self.stops
    }

    /// Consecutive `(from, to)` legs, starting at the hub.
    pub fn legs(&self) -> impl Iterator<Item = (Stop, Stop)> + '_ {
        self.stops.windows(2).filter_map(|pair| match pair {
            [from, to] => Some((*from, *to)),
            _ => None,
        })
    }

    /// Position of `stop` within the route.
    #[must_use]
    pub fn position(&self, stop: Stop) -> Option<usize> {
        self.stops.iter().position(|candidate| *candidate == stop)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for stop in &self.stops {
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "{stop}")?;
            first = false;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Stop>> for Route {
    type Error = RouteError;

    fn try_from(stops: Vec<Stop>) -> Result<Self, Self::Error> {
        Self::new(&stops)
    }
}

/// Whether `stops` never repeats a stop and never reaches a customer before
/// its restaurant.
///
/// Accepts partial orderings, so it can vet search paths as they grow.
///
/// # Examples
/// ```
/// use courier_core::{is_precedence_valid, Stop};
///
/// assert!(is_precedence_valid(&[Stop::Hub, Stop::Restaurant1, Stop::Customer1]));
/// assert!(!is_precedence_valid(&[Stop::Hub, Stop::Customer2]));
/// ```
#[must_use]
pub fn is_precedence_valid(stops: &[Stop]) -> bool {
    check_ordering(stops).is_ok()
}

fn check_ordering(stops: &[Stop]) -> Result<(), RouteError> {
    let mut visited = StopSet::empty();
    for stop in stops {
        if visited.contains(*stop) {
            return Err(RouteError::DuplicateStop(*stop));
        }
        if let Some(restaurant) = stop.required_predecessor()
            && !visited.contains(restaurant)
        {
            return Err(RouteError::PrecedenceViolated {
                customer: *stop,
                restaurant,
            });
        }
        visited.insert(*stop);
    }
    Ok(())
}
