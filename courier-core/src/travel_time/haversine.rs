//! Great-circle distance model backed by `geo`'s haversine measure.

use geo::{Coord, Distance, Haversine, Point};

use super::{TravelTimeError, TravelTimeMatrix, TravelTimeModel};
use crate::LocationSet;

/// Average courier speed in kilometres per hour.
pub const AVERAGE_SPEED_KMH: f64 = 20.0;

const METRES_PER_KILOMETRE: f64 = 1_000.0;

/// Great-circle distance between two WGS84 coordinates in kilometres.
///
/// Symmetric, and zero for identical coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use courier_core::haversine_km;
///
/// let london = Coord { x: -0.1278, y: 51.5074 };
/// let paris = Coord { x: 2.3522, y: 48.8566 };
/// let km = haversine_km(london, paris);
/// assert!((km - 343.5).abs() < 1.0);
/// assert_eq!(haversine_km(london, london), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "unit conversion from metres to kilometres"
)]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b)) / METRES_PER_KILOMETRE
}

/// Hours needed to cover the great-circle distance between `a` and `b` at
/// `speed_kmh`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "travel time is distance divided by speed"
)]
pub fn travel_time_hours(a: Coord<f64>, b: Coord<f64>, speed_kmh: f64) -> f64 {
    haversine_km(a, b) / speed_kmh
}

/// Travel times from straight-line distances at a constant speed.
///
/// # Examples
/// ```
/// use courier_core::{HaversineTravelTime, AVERAGE_SPEED_KMH};
///
/// let model = HaversineTravelTime::default();
/// assert_eq!(model.speed_kmh(), AVERAGE_SPEED_KMH);
/// assert!(HaversineTravelTime::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaversineTravelTime {
    speed_kmh: f64,
}

impl HaversineTravelTime {
    /// Construct a model travelling at `speed_kmh`.
    ///
    /// # Errors
    /// Returns [`TravelTimeError::InvalidSpeed`] unless the speed is finite
    /// and strictly positive.
    pub fn new(speed_kmh: f64) -> Result<Self, TravelTimeError> {
        if speed_kmh.is_finite() && speed_kmh > 0.0 {
            Ok(Self { speed_kmh })
        } else {
            Err(TravelTimeError::InvalidSpeed(speed_kmh))
        }
    }

    /// Configured speed in kilometres per hour.
    #[must_use]
    pub const fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }
}

impl Default for HaversineTravelTime {
    fn default() -> Self {
        Self {
            speed_kmh: AVERAGE_SPEED_KMH,
        }
    }
}

impl TravelTimeModel for HaversineTravelTime {
    fn travel_time_matrix(
        &self,
        locations: &LocationSet,
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        TravelTimeMatrix::try_from_fn(|from, to| {
            travel_time_hours(locations.position(from), locations.position(to), self.speed_kmh)
        })
    }
}
