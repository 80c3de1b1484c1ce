use thiserror::Error;

use crate::Stop;

/// Errors from [`crate::travel_time::TravelTimeModel::travel_time_matrix`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TravelTimeError {
    /// The configured average speed cannot convert distance into time.
    ///
    /// Speeds must be finite and strictly positive.
    #[error("average speed must be finite and positive, got {0} km/h")]
    InvalidSpeed(f64),
    /// A computed or supplied leg time was negative or not finite.
    #[error("travel time from {from} to {to} is invalid: {hours}")]
    InvalidLeg {
        /// Departure stop.
        from: Stop,
        /// Arrival stop.
        to: Stop,
        /// Offending value in hours.
        hours: f64,
    },
}
