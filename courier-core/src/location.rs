//! Positions of the five stops for a single planning invocation.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`, matching the
//! `geo` crate. Restaurants additionally carry a preparation time in hours.
//! [`LocationSet::new`] is the only constructor and rejects data a search must
//! never see: non-finite numbers, out-of-range coordinates and negative
//! preparation times.

use geo::Coord;
use thiserror::Error;

use crate::Stop;

/// Which part of a stop's input failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    /// The latitude (`y`) component.
    Latitude,
    /// The longitude (`x`) component.
    Longitude,
    /// A restaurant preparation time.
    PreparationTime,
}

impl std::fmt::Display for LocationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::PreparationTime => "preparation time",
        })
    }
}

/// Errors returned by [`LocationSet::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationSetError {
    /// A value was NaN or infinite.
    #[error("{stop} {field} must be a finite number, got {value}")]
    NonFinite {
        /// Stop whose input was rejected.
        stop: Stop,
        /// Offending field.
        field: LocationField,
        /// Rejected value.
        value: f64,
    },
    /// A coordinate fell outside the valid WGS84 range.
    #[error("{stop} {field} {value} is out of range")]
    OutOfRange {
        /// Stop whose input was rejected.
        stop: Stop,
        /// Offending field.
        field: LocationField,
        /// Rejected value.
        value: f64,
    },
    /// A restaurant preparation time was below zero.
    #[error("{stop} preparation time must not be negative, got {value}")]
    NegativePreparationTime {
        /// Restaurant whose preparation time was rejected.
        stop: Stop,
        /// Rejected value in hours.
        value: f64,
    },
}

impl LocationSetError {
    /// The stop whose input caused the error.
    #[must_use]
    pub const fn stop(&self) -> Stop {
        match self {
            Self::NonFinite { stop, .. }
            | Self::OutOfRange { stop, .. }
            | Self::NegativePreparationTime { stop, .. } => *stop,
        }
    }
}

/// A pickup location and the time its order needs before it is ready.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Restaurant {
    /// Restaurant position.
    pub position: Coord<f64>,
    /// Minimum preparation time in hours.
    pub preparation_hours: f64,
}

impl Restaurant {
    /// Construct a restaurant from a position and preparation time.
    #[must_use]
    pub const fn new(position: Coord<f64>, preparation_hours: f64) -> Self {
        Self {
            position,
            preparation_hours,
        }
    }
}

/// The validated inputs of one search: five positions and two
/// preparation times.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use courier_core::{LocationSet, Restaurant, Stop};
///
/// # fn main() -> Result<(), courier_core::LocationSetError> {
/// let set = LocationSet::new(
///     Coord { x: -0.12, y: 51.50 },
///     Restaurant::new(Coord { x: -0.10, y: 51.51 }, 0.25),
///     Restaurant::new(Coord { x: -0.14, y: 51.52 }, 0.0),
///     Coord { x: -0.09, y: 51.49 },
///     Coord { x: -0.15, y: 51.53 },
/// )?;
/// assert_eq!(set.preparation_hours(Stop::Restaurant1), 0.25);
/// assert_eq!(set.preparation_hours(Stop::Customer1), 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationSet {
    hub: Coord<f64>,
    restaurant1: Restaurant,
    restaurant2: Restaurant,
    customer1: Coord<f64>,
    customer2: Coord<f64>,
}

impl LocationSet {
    /// Validate and assemble a location set.
    ///
    /// # Errors
    /// Returns [`LocationSetError`] for the first stop, in [`Stop::ALL`]
    /// order, whose coordinates or preparation time are invalid.
    pub fn new(
        hub: Coord<f64>,
        restaurant1: Restaurant,
        restaurant2: Restaurant,
        customer1: Coord<f64>,
        customer2: Coord<f64>,
    ) -> Result<Self, LocationSetError> {
        let set = Self {
            hub,
            restaurant1,
            restaurant2,
            customer1,
            customer2,
        };
        for stop in Stop::ALL {
            validate_position(stop, set.position(stop))?;
        }
        validate_preparation(Stop::Restaurant1, restaurant1.preparation_hours)?;
        validate_preparation(Stop::Restaurant2, restaurant2.preparation_hours)?;
        Ok(set)
    }

    /// Position of `stop`.
    #[must_use]
    pub const fn position(&self, stop: Stop) -> Coord<f64> {
        match stop {
            Stop::Hub => self.hub,
            Stop::Restaurant1 => self.restaurant1.position,
            Stop::Restaurant2 => self.restaurant2.position,
            Stop::Customer1 => self.customer1,
            Stop::Customer2 => self.customer2,
        }
    }

    /// Preparation time of `stop` in hours; zero for non-restaurants.
    #[must_use]
    pub const fn preparation_hours(&self, stop: Stop) -> f64 {
        match stop {
            Stop::Restaurant1 => self.restaurant1.preparation_hours,
            Stop::Restaurant2 => self.restaurant2.preparation_hours,
            Stop::Hub | Stop::Customer1 | Stop::Customer2 => 0.0,
        }
    }

    /// Return a copy with a different preparation time for `stop`.
    ///
    /// Has no effect for non-restaurant stops.
    ///
    /// # Errors
    /// Returns [`LocationSetError`] when `hours` is negative or non-finite.
    pub fn with_preparation_hours(mut self, stop: Stop, hours: f64) -> Result<Self, LocationSetError> {
        match stop {
            Stop::Restaurant1 => {
                validate_preparation(stop, hours)?;
                self.restaurant1.preparation_hours = hours;
            }
            Stop::Restaurant2 => {
                validate_preparation(stop, hours)?;
                self.restaurant2.preparation_hours = hours;
            }
            Stop::Hub | Stop::Customer1 | Stop::Customer2 => {}
        }
        Ok(self)
    }
}

fn validate_position(stop: Stop, position: Coord<f64>) -> Result<(), LocationSetError> {
    validate_component(stop, LocationField::Latitude, position.y, 90.0)?;
    validate_component(stop, LocationField::Longitude, position.x, 180.0)
}

fn validate_component(
    stop: Stop,
    field: LocationField,
    value: f64,
    limit: f64,
) -> Result<(), LocationSetError> {
    if !value.is_finite() {
        return Err(LocationSetError::NonFinite { stop, field, value });
    }
    if !(-limit..=limit).contains(&value) {
        return Err(LocationSetError::OutOfRange { stop, field, value });
    }
    Ok(())
}

fn validate_preparation(stop: Stop, value: f64) -> Result<(), LocationSetError> {
    if !value.is_finite() {
        return Err(LocationSetError::NonFinite {
            stop,
            field: LocationField::PreparationTime,
            value,
        });
    }
    if value < 0.0 {
        return Err(LocationSetError::NegativePreparationTime { stop, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn origin() -> Coord<f64> {
        Coord { x: 0.0, y: 0.0 }
    }

    fn build(hub: Coord<f64>, prep1: f64, prep2: f64) -> Result<LocationSet, LocationSetError> {
        let origin = Coord { x: 0.0, y: 0.0 };
        LocationSet::new(
            hub,
            Restaurant::new(origin, prep1),
            Restaurant::new(origin, prep2),
            origin,
            origin,
        )
    }

    #[rstest]
    fn accepts_boundary_coordinates() {
        let hub = Coord { x: 180.0, y: -90.0 };
        assert!(build(hub, 0.0, 0.0).is_ok());
    }

    #[rstest]
    #[case(Coord { x: 0.0, y: f64::NAN }, LocationField::Latitude)]
    #[case(Coord { x: f64::INFINITY, y: 0.0 }, LocationField::Longitude)]
    fn rejects_non_finite_coordinates(#[case] hub: Coord<f64>, #[case] expected: LocationField) {
        let err = build(hub, 0.0, 0.0).expect_err("non-finite coordinate");
        match err {
            LocationSetError::NonFinite { stop, field, .. } => {
                assert_eq!(stop, Stop::Hub);
                assert_eq!(field, expected);
            }
            other => panic!("expected NonFinite, found {other:?}"),
        }
    }

    #[rstest]
    #[case(Coord { x: 0.0, y: 90.5 })]
    #[case(Coord { x: -180.5, y: 0.0 })]
    fn rejects_out_of_range_coordinates(#[case] hub: Coord<f64>) {
        let err = build(hub, 0.0, 0.0).expect_err("out of range coordinate");
        assert!(matches!(err, LocationSetError::OutOfRange { stop: Stop::Hub, .. }));
    }

    #[rstest]
    fn rejects_negative_preparation(origin: Coord<f64>) {
        let err = build(origin, 0.0, -0.5).expect_err("negative preparation");
        assert_eq!(
            err,
            LocationSetError::NegativePreparationTime {
                stop: Stop::Restaurant2,
                value: -0.5
            }
        );
        assert_eq!(err.stop(), Stop::Restaurant2);
    }

    #[rstest]
    fn rejects_nan_preparation(origin: Coord<f64>) {
        let err = build(origin, f64::NAN, 0.0).expect_err("NaN preparation");
        assert!(matches!(
            err,
            LocationSetError::NonFinite {
                stop: Stop::Restaurant1,
                field: LocationField::PreparationTime,
                ..
            }
        ));
    }

    #[rstest]
    fn preparation_override_validates(origin: Coord<f64>) {
        let set = build(origin, 0.0, 0.0).expect("valid set");
        let updated = set
            .with_preparation_hours(Stop::Restaurant1, 1.5)
            .expect("valid override");
        assert_eq!(updated.preparation_hours(Stop::Restaurant1), 1.5);
        assert!(set.with_preparation_hours(Stop::Restaurant2, -1.0).is_err());
        let unchanged = set
            .with_preparation_hours(Stop::Customer1, -1.0)
            .expect("customers carry no preparation time");
        assert_eq!(unchanged, set);
    }
}
