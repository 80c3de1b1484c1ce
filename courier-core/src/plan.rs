//! The planning boundary: raw request in, structured response out.
//!
//! [`Planner::plan`] validates a [`DeliveryRequest`], runs a [`Solver`],
//! re-evaluates the winning route and folds every failure into a
//! [`PlanStatus`]. It never panics and never searches invalid data.

use log::{error, info, warn};

use crate::{
    HaversineTravelTime, LocationSet, LocationSetError, Restaurant, RouteCostEvaluator,
    SolveError, Solver, Stop, TravelTimeModel,
};
use geo::Coord;

/// Coordinates and preparation times for one delivery run.
///
/// Latitudes and longitudes are in degrees, preparation times in hours.
/// Field names follow the wire format (`hubLatitude`, `restaurant1PrepTime`,
/// ...); the short names of the older dispatch endpoint (`amanLat`,
/// `r1Lon`, `pt1`, ...) are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DeliveryRequest {
    /// Hub latitude.
    #[cfg_attr(feature = "serde", serde(alias = "amanLat"))]
    pub hub_latitude: f64,
    /// Hub longitude.
    #[cfg_attr(feature = "serde", serde(alias = "amanLon"))]
    pub hub_longitude: f64,
    /// First restaurant latitude.
    #[cfg_attr(feature = "serde", serde(alias = "r1Lat"))]
    pub restaurant1_latitude: f64,
    /// First restaurant longitude.
    #[cfg_attr(feature = "serde", serde(alias = "r1Lon"))]
    pub restaurant1_longitude: f64,
    /// First restaurant preparation time in hours.
    #[cfg_attr(feature = "serde", serde(alias = "pt1"))]
    pub restaurant1_prep_time: f64,
    /// Second restaurant latitude.
    #[cfg_attr(feature = "serde", serde(alias = "r2Lat"))]
    pub restaurant2_latitude: f64,
    /// Second restaurant longitude.
    #[cfg_attr(feature = "serde", serde(alias = "r2Lon"))]
    pub restaurant2_longitude: f64,
    /// Second restaurant preparation time in hours.
    #[cfg_attr(feature = "serde", serde(alias = "pt2"))]
    pub restaurant2_prep_time: f64,
    /// First customer latitude.
    #[cfg_attr(feature = "serde", serde(alias = "c1Lat"))]
    pub customer1_latitude: f64,
    /// First customer longitude.
    #[cfg_attr(feature = "serde", serde(alias = "c1Lon"))]
    pub customer1_longitude: f64,
    /// Second customer latitude.
    #[cfg_attr(feature = "serde", serde(alias = "c2Lat"))]
    pub customer2_latitude: f64,
    /// Second customer longitude.
    #[cfg_attr(feature = "serde", serde(alias = "c2Lon"))]
    pub customer2_longitude: f64,
}

impl DeliveryRequest {
    /// Validate the request and assemble its [`LocationSet`].
    ///
    /// # Errors
    /// Returns [`LocationSetError`] for non-finite or out-of-range
    /// coordinates and negative preparation times.
    pub fn validate(&self) -> Result<LocationSet, LocationSetError> {
        LocationSet::new(
            coord(self.hub_latitude, self.hub_longitude),
            Restaurant::new(
                coord(self.restaurant1_latitude, self.restaurant1_longitude),
                self.restaurant1_prep_time,
            ),
            Restaurant::new(
                coord(self.restaurant2_latitude, self.restaurant2_longitude),
                self.restaurant2_prep_time,
            ),
            coord(self.customer1_latitude, self.customer1_longitude),
            coord(self.customer2_latitude, self.customer2_longitude),
        )
    }
}

impl From<&LocationSet> for DeliveryRequest {
    fn from(set: &LocationSet) -> Self {
        let hub = set.position(Stop::Hub);
        let r1 = set.position(Stop::Restaurant1);
        let r2 = set.position(Stop::Restaurant2);
        let c1 = set.position(Stop::Customer1);
        let c2 = set.position(Stop::Customer2);
        Self {
            hub_latitude: hub.y,
            hub_longitude: hub.x,
            restaurant1_latitude: r1.y,
            restaurant1_longitude: r1.x,
            restaurant1_prep_time: set.preparation_hours(Stop::Restaurant1),
            restaurant2_latitude: r2.y,
            restaurant2_longitude: r2.x,
            restaurant2_prep_time: set.preparation_hours(Stop::Restaurant2),
            customer1_latitude: c1.y,
            customer1_longitude: c1.x,
            customer2_latitude: c2.y,
            customer2_longitude: c2.x,
        }
    }
}

const fn coord(latitude: f64, longitude: f64) -> Coord<f64> {
    Coord {
        x: longitude,
        y: latitude,
    }
}

/// Outcome category of a planning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlanStatus {
    /// A route was found.
    Ok,
    /// The search finished without a route.
    NoRoute,
    /// The request failed validation; no search ran.
    InvalidInput,
    /// The search budget ran out before a route was found.
    SearchAborted,
}

/// Structured result of a planning call.
///
/// `route` and `estimated_time_hours` are present exactly when `status` is
/// [`PlanStatus::Ok`]; `message` explains every other status.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlanResponse {
    /// Outcome category.
    pub status: PlanStatus,
    /// Visiting order, starting at the hub.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub route: Option<Vec<Stop>>,
    /// Total elapsed hours for `route`.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub estimated_time_hours: Option<f64>,
    /// Human-readable failure reason.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub message: Option<String>,
}

impl PlanResponse {
    fn ok(route: Vec<Stop>, hours: f64) -> Self {
        Self {
            status: PlanStatus::Ok,
            route: Some(route),
            estimated_time_hours: Some(hours),
            message: None,
        }
    }

    fn failed(status: PlanStatus, message: String) -> Self {
        Self {
            status,
            route: None,
            estimated_time_hours: None,
            message: Some(message),
        }
    }
}

/// Validates requests, runs a solver and reports the re-evaluated route.
///
/// # Examples
/// ```
/// use courier_core::{DeliveryRequest, PlanStatus, Planner};
/// # use courier_core::{Diagnostics, LocationSet, Route, Solution, SolveError, Solver, Stop};
/// # struct FixedOrder;
/// # impl Solver for FixedOrder {
/// #     fn solve(&self, _: &LocationSet) -> Result<Solution, SolveError> {
/// #         let route = Route::new(&[Stop::Hub, Stop::Restaurant1, Stop::Customer1, Stop::Restaurant2, Stop::Customer2])
/// #             .map_err(|_| SolveError::NoRouteFound)?;
/// #         Ok(Solution { route, total_hours: 0.0, diagnostics: Diagnostics::default() })
/// #     }
/// # }
///
/// let planner = Planner::new(FixedOrder);
/// let request = DeliveryRequest { hub_latitude: f64::NAN, ..DeliveryRequest::default() };
/// assert_eq!(planner.plan(&request).status, PlanStatus::InvalidInput);
/// ```
#[derive(Debug, Clone)]
pub struct Planner<S, T = HaversineTravelTime> {
    solver: S,
    travel_time: T,
}

impl<S: Solver> Planner<S> {
    /// Plan with `solver`, re-evaluating routes at the default courier speed.
    pub fn new(solver: S) -> Self {
        Self::with_travel_time(solver, HaversineTravelTime::default())
    }
}

impl<S: Solver, T: TravelTimeModel> Planner<S, T> {
    /// Plan with `solver`, re-evaluating routes with `travel_time`.
    ///
    /// `travel_time` should be the model the solver searches with, otherwise
    /// the reported time describes a different road network.
    pub const fn with_travel_time(solver: S, travel_time: T) -> Self {
        Self {
            solver,
            travel_time,
        }
    }

    /// The wrapped solver.
    pub const fn solver(&self) -> &S {
        &self.solver
    }

    /// Plan a single delivery run.
    pub fn plan(&self, request: &DeliveryRequest) -> PlanResponse {
        let locations = match request.validate() {
            Ok(locations) => locations,
            Err(err) => {
                warn!("rejecting delivery request: {err}");
                return PlanResponse::failed(PlanStatus::InvalidInput, err.to_string());
            }
        };
        self.plan_locations(&locations)
    }

    /// Plan for already validated locations.
    pub fn plan_locations(&self, locations: &LocationSet) -> PlanResponse {
        let solution = match self.solver.solve(locations) {
            Ok(solution) => solution,
            Err(err) => return failure_response(&err),
        };
        let matrix = match self.travel_time.travel_time_matrix(locations) {
            Ok(matrix) => matrix,
            Err(err) => return failure_response(&SolveError::TravelTime(err)),
        };
        let hours = RouteCostEvaluator::new(locations, &matrix).total_hours(&solution.route);
        info!(
            "route found: {} | estimated time: {hours} hours | {} states expanded in {:?}",
            solution.route, solution.diagnostics.states_expanded, solution.diagnostics.solve_time
        );
        PlanResponse::ok(solution.route.stops().to_vec(), hours)
    }
}

fn failure_response(err: &SolveError) -> PlanResponse {
    match err {
        SolveError::NoRouteFound => {
            error!("search finished without a route; every valid input admits one");
            PlanResponse::failed(PlanStatus::NoRoute, err.to_string())
        }
        SolveError::BudgetExceeded { .. } => {
            warn!("{err}");
            PlanResponse::failed(PlanStatus::SearchAborted, err.to_string())
        }
        SolveError::TravelTime(_) => {
            warn!("travel times unavailable: {err}");
            PlanResponse::failed(PlanStatus::InvalidInput, err.to_string())
        }
    }
}
