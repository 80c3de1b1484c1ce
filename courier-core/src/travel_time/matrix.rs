//! Dense stop-to-stop travel-time table and the trait that produces it.

use crate::{LocationSet, STOP_COUNT, Stop};

use super::error::TravelTimeError;

/// Travel times in hours between every ordered pair of stops.
///
/// `hours(from, to)` is the time to drive from `from` to `to`, without any
/// waiting at the destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelTimeMatrix {
    hours: [[f64; STOP_COUNT]; STOP_COUNT],
}

impl TravelTimeMatrix {
    /// Build a matrix by evaluating `leg` for every ordered pair of stops.
    ///
    /// # Errors
    /// Returns [`TravelTimeError::InvalidLeg`] for the first pair whose time
    /// is negative or not finite.
    ///
    /// # Examples
    /// ```
    /// use courier_core::{Stop, TravelTimeMatrix};
    ///
    /// let matrix = TravelTimeMatrix::try_from_fn(|from, to| if from == to { 0.0 } else { 0.5 })?;
    /// assert_eq!(matrix.hours(Stop::Hub, Stop::Customer2), 0.5);
    /// # Ok::<(), courier_core::TravelTimeError>(())
    /// ```
    pub fn try_from_fn<F>(mut leg: F) -> Result<Self, TravelTimeError>
    where
        F: FnMut(Stop, Stop) -> f64,
    {
        let mut hours = [[0.0; STOP_COUNT]; STOP_COUNT];
        for (from, row) in Stop::ALL.into_iter().zip(hours.iter_mut()) {
            for (to, cell) in Stop::ALL.into_iter().zip(row.iter_mut()) {
                let value = leg(from, to);
                if !value.is_finite() || value < 0.0 {
                    return Err(TravelTimeError::InvalidLeg {
                        from,
                        to,
                        hours: value,
                    });
                }
                *cell = value;
            }
        }
        Ok(Self { hours })
    }

    /// Travel time from `from` to `to` in hours.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "stop indices are bounded by STOP_COUNT"
    )]
    pub const fn hours(&self, from: Stop, to: Stop) -> f64 {
        self.hours[from.index()][to.index()]
    }
}

/// Produce pairwise travel times for a validated [`LocationSet`].
///
/// Implementations must be pure: the same locations always yield the same
/// matrix.
///
/// # Examples
///
/// ```rust
/// use courier_core::{LocationSet, TravelTimeError, TravelTimeMatrix, TravelTimeModel};
///
/// struct HalfHourModel;
///
/// impl TravelTimeModel for HalfHourModel {
///     fn travel_time_matrix(
///         &self,
///         _locations: &LocationSet,
///     ) -> Result<TravelTimeMatrix, TravelTimeError> {
///         TravelTimeMatrix::try_from_fn(|from, to| if from == to { 0.0 } else { 0.5 })
///     }
/// }
/// ```
pub trait TravelTimeModel {
    /// Return travel times between every pair of stops in `locations`.
    ///
    /// # Errors
    /// Returns [`TravelTimeError`] when the model cannot produce finite,
    /// non-negative times.
    fn travel_time_matrix(&self, locations: &LocationSet)
    -> Result<TravelTimeMatrix, TravelTimeError>;
}
