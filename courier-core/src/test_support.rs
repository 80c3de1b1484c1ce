//! Fixtures shared by unit, behaviour and property tests.
//!
//! Enabled for this crate's own tests and, through the `test-support`
//! feature, for solver crates that need the same scenarios.

use geo::Coord;

use crate::{
    LocationSet, Restaurant, Route, RouteCostEvaluator, Stop, TravelTimeError, TravelTimeMatrix,
    TravelTimeModel, is_precedence_valid,
};

fn build(
    hub: (f64, f64),
    r1: (f64, f64, f64),
    r2: (f64, f64, f64),
    c1: (f64, f64),
    c2: (f64, f64),
) -> LocationSet {
    let at = |latitude: f64, longitude: f64| Coord {
        x: longitude,
        y: latitude,
    };
    let built = LocationSet::new(
        at(hub.0, hub.1),
        Restaurant::new(at(r1.0, r1.1), r1.2),
        Restaurant::new(at(r2.0, r2.1), r2.2),
        at(c1.0, c1.1),
        at(c2.0, c2.1),
    );
    match built {
        Ok(set) => set,
        Err(err) => panic!("fixture locations must be valid: {err}"),
    }
}

/// Every stop at the same point with the given preparation times.
///
/// Travel is free, so every route costs the sum of both preparation times.
///
/// # Panics
/// Panics when a preparation time is negative or not finite.
#[must_use]
pub fn co_located(restaurant1_prep_hours: f64, restaurant2_prep_hours: f64) -> LocationSet {
    build(
        (12.97, 77.59),
        (12.97, 77.59, restaurant1_prep_hours),
        (12.97, 77.59, restaurant2_prep_hours),
        (12.97, 77.59),
        (12.97, 77.59),
    )
}

/// Five stops spread over a few kilometres of one city.
#[must_use]
pub fn city_block() -> LocationSet {
    build(
        (12.9716, 77.5946),
        (12.9352, 77.6245, 0.5),
        (12.9279, 77.6271, 0.25),
        (12.9141, 77.6411),
        (12.9081, 77.6476),
    )
}

/// One restaurant next to the hub, the other a long drive away.
///
/// Both customers sit next to their restaurants, so the nearby pair should
/// be served first.
#[must_use]
pub fn far_restaurant() -> LocationSet {
    build(
        (0.0, 0.0),
        (0.0, 0.01, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.02),
        (0.0, 1.01),
    )
}

/// Travel model that charges the same time for every leg between distinct
/// stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformTravelTime(pub f64);

impl TravelTimeModel for UniformTravelTime {
    fn travel_time_matrix(
        &self,
        _locations: &LocationSet,
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        TravelTimeMatrix::try_from_fn(|from, to| if from == to { 0.0 } else { self.0 })
    }
}

/// Every precedence-valid route, in lexicographic order of the stops after
/// the hub.
#[must_use]
pub fn valid_routes() -> Vec<Route> {
    let mut routes = Vec::new();
    let mut path = vec![Stop::Hub];
    extend(&mut path, &mut routes);
    routes
}

fn extend(path: &mut Vec<Stop>, routes: &mut Vec<Route>) {
    if let Ok(route) = Route::new(path) {
        routes.push(route);
        return;
    }
    for stop in Stop::ALL {
        path.push(stop);
        if is_precedence_valid(path) {
            extend(path, routes);
        }
        path.pop();
    }
}

/// Brute-force minimum over [`valid_routes`], used to check solver output.
#[must_use]
pub fn optimal_hours(locations: &LocationSet, matrix: &TravelTimeMatrix) -> f64 {
    let evaluator = RouteCostEvaluator::new(locations, matrix);
    valid_routes()
        .iter()
        .map(|route| evaluator.total_hours(route))
        .fold(f64::INFINITY, f64::min)
}
