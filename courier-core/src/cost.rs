//! Elapsed-time accounting for routes.
//!
//! [`leg_hours`] is the single leg-cost rule: driving time, raised to the
//! restaurant's preparation time when the leg ends at a restaurant. Searches
//! accumulate it while exploring; [`RouteCostEvaluator`] replays it over a
//! finished route so the reported total is computed independently of any
//! search bookkeeping.

use crate::{LocationSet, Route, Stop, TravelTimeMatrix};

/// Hours charged for the leg `from -> to`.
///
/// The courier waits at a restaurant until the food is ready, so a leg ending
/// at a restaurant costs at least its preparation time.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use courier_core::{leg_hours, LocationSet, Restaurant, Stop, TravelTimeMatrix};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let here = Coord { x: 0.0, y: 0.0 };
/// let set = LocationSet::new(here, Restaurant::new(here, 2.0), Restaurant::new(here, 0.0), here, here)?;
/// let matrix = TravelTimeMatrix::try_from_fn(|from, to| if from == to { 0.0 } else { 0.5 })?;
/// assert_eq!(leg_hours(&set, &matrix, Stop::Hub, Stop::Restaurant1), 2.0);
/// assert_eq!(leg_hours(&set, &matrix, Stop::Hub, Stop::Restaurant2), 0.5);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn leg_hours(locations: &LocationSet, matrix: &TravelTimeMatrix, from: Stop, to: Stop) -> f64 {
    let travel = matrix.hours(from, to);
    if to.is_restaurant() {
        travel.max(locations.preparation_hours(to))
    } else {
        travel
    }
}

/// One leg of a route with its cost split into driving and waiting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    /// Departure stop.
    pub from: Stop,
    /// Arrival stop.
    pub to: Stop,
    /// Driving time in hours.
    pub travel_hours: f64,
    /// Time spent waiting for food beyond the drive, in hours.
    pub wait_hours: f64,
    /// Total hours charged for the leg.
    pub hours: f64,
}

/// Recomputes the elapsed time of finished routes.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use courier_core::{LocationSet, Restaurant, Route, RouteCostEvaluator, Stop, TravelTimeMatrix};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let here = Coord { x: 0.0, y: 0.0 };
/// let set = LocationSet::new(here, Restaurant::new(here, 1.0), Restaurant::new(here, 0.0), here, here)?;
/// let matrix = TravelTimeMatrix::try_from_fn(|from, to| if from == to { 0.0 } else { 0.25 })?;
/// let route = Route::new(&[Stop::Hub, Stop::Restaurant1, Stop::Restaurant2, Stop::Customer1, Stop::Customer2])?;
/// let evaluator = RouteCostEvaluator::new(&set, &matrix);
/// assert_eq!(evaluator.total_hours(&route), 1.75);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteCostEvaluator<'a> {
    locations: &'a LocationSet,
    matrix: &'a TravelTimeMatrix,
}

impl<'a> RouteCostEvaluator<'a> {
    /// Create an evaluator over one invocation's inputs.
    #[must_use]
    pub const fn new(locations: &'a LocationSet, matrix: &'a TravelTimeMatrix) -> Self {
        Self { locations, matrix }
    }

    /// Total elapsed hours from the hub to the final stop.
    ///
    /// Legs are summed in visiting order starting from zero, the same order
    /// in which a search accumulates its path cost.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "leg times are summed")]
    pub fn total_hours(&self, route: &Route) -> f64 {
        route.legs().fold(0.0, |total, (from, to)| {
            total + leg_hours(self.locations, self.matrix, from, to)
        })
    }

    /// Per-leg breakdown of a route.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "waiting time is a difference of hours")]
    pub fn legs(&self, route: &Route) -> Vec<Leg> {
        route
            .legs()
            .map(|(from, to)| {
                let travel_hours = self.matrix.hours(from, to);
                let hours = leg_hours(self.locations, self.matrix, from, to);
                Leg {
                    from,
                    to,
                    travel_hours,
                    wait_hours: hours - travel_hours,
                    hours,
                }
            })
            .collect()
    }
}
