//! Great-circle distances and the travel times derived from them.
//!
//! [`haversine_km`] and [`travel_time_hours`] are the pure distance model. The
//! [`TravelTimeModel`] trait abstracts how a full [`TravelTimeMatrix`] is built
//! for a [`LocationSet`](crate::LocationSet); [`HaversineTravelTime`] is the
//! default, converting distances at a fixed average speed.

mod error;
mod haversine;
mod matrix;

pub use error::TravelTimeError;
pub use haversine::{AVERAGE_SPEED_KMH, HaversineTravelTime, haversine_km, travel_time_hours};
pub use matrix::{TravelTimeMatrix, TravelTimeModel};
