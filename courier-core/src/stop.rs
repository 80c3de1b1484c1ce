//! The five stops of a delivery run and a compact set over them.
//!
//! The enum replaces free-form location labels so precedence and
//! preparation-time rules are matched exhaustively by the compiler.
//!
//! # Examples
//! ```
//! use courier_core::Stop;
//!
//! assert_eq!(Stop::Restaurant1.as_str(), "restaurant1");
//! assert_eq!(Stop::Customer2.required_predecessor(), Some(Stop::Restaurant2));
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of stops in every delivery run.
pub const STOP_COUNT: usize = 5;

/// A semantic delivery location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stop {
    /// The courier's starting point.
    Hub,
    /// First pickup location.
    Restaurant1,
    /// Second pickup location.
    Restaurant2,
    /// Drop-off for the order collected at [`Stop::Restaurant1`].
    Customer1,
    /// Drop-off for the order collected at [`Stop::Restaurant2`].
    Customer2,
}

impl Stop {
    /// Every stop in canonical order.
    ///
    /// Searches generate successors in this order, which makes their
    /// tie-breaking reproducible.
    pub const ALL: [Self; STOP_COUNT] = [
        Self::Hub,
        Self::Restaurant1,
        Self::Restaurant2,
        Self::Customer1,
        Self::Customer2,
    ];

    /// Position of the stop within [`Stop::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Hub => 0,
            Self::Restaurant1 => 1,
            Self::Restaurant2 => 2,
            Self::Customer1 => 3,
            Self::Customer2 => 4,
        }
    }

    /// Stop that must already be visited before this one may be entered.
    ///
    /// # Examples
    /// ```
    /// use courier_core::Stop;
    ///
    /// assert_eq!(Stop::Customer1.required_predecessor(), Some(Stop::Restaurant1));
    /// assert!(Stop::Restaurant1.required_predecessor().is_none());
    /// ```
    #[must_use]
    pub const fn required_predecessor(self) -> Option<Self> {
        match self {
            Self::Customer1 => Some(Self::Restaurant1),
            Self::Customer2 => Some(Self::Restaurant2),
            Self::Hub | Self::Restaurant1 | Self::Restaurant2 => None,
        }
    }

    /// Whether the stop is a pickup with a preparation time.
    #[must_use]
    pub const fn is_restaurant(self) -> bool {
        matches!(self, Self::Restaurant1 | Self::Restaurant2)
    }

    /// Stable lowercase tag used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hub => "hub",
            Self::Restaurant1 => "restaurant1",
            Self::Restaurant2 => "restaurant2",
            Self::Customer1 => "customer1",
            Self::Customer2 => "customer2",
        }
    }

    /// Short label used by the dispatch service this engine grew out of.
    ///
    /// # Examples
    /// ```
    /// use courier_core::Stop;
    ///
    /// assert_eq!(Stop::Hub.short_tag(), "Aman");
    /// assert_eq!(Stop::Customer1.short_tag(), "C1");
    /// ```
    #[must_use]
    pub const fn short_tag(self) -> &'static str {
        match self {
            Self::Hub => "Aman",
            Self::Restaurant1 => "R1",
            Self::Restaurant2 => "R2",
            Self::Customer1 => "C1",
            Self::Customer2 => "C2",
        }
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stop label cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stop '{0}'")]
pub struct ParseStopError(pub String);

impl FromStr for Stop {
    type Err = ParseStopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hub" | "aman" => Ok(Self::Hub),
            "restaurant1" | "r1" => Ok(Self::Restaurant1),
            "restaurant2" | "r2" => Ok(Self::Restaurant2),
            "customer1" | "c1" => Ok(Self::Customer1),
            "customer2" | "c2" => Ok(Self::Customer2),
            _ => Err(ParseStopError(s.to_owned())),
        }
    }
}

/// A set of stops stored as a five-bit mask.
///
/// Used by searches both for membership tests and as a memoisation key.
///
/// # Examples
/// ```
/// use courier_core::{Stop, StopSet};
///
/// let visited = StopSet::only(Stop::Hub).with(Stop::Restaurant2);
/// assert!(visited.contains(Stop::Restaurant2));
/// assert_eq!(visited.len(), 2);
/// assert!(!visited.is_complete());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct StopSet(u8);

impl StopSet {
    const FULL: u8 = 0b1_1111;

    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// A set holding every stop.
    #[must_use]
    pub const fn all() -> Self {
        Self(Self::FULL)
    }

    /// A set holding a single stop.
    #[must_use]
    pub const fn only(stop: Stop) -> Self {
        Self::empty().with(stop)
    }

    const fn bit(stop: Stop) -> u8 {
        1 << stop.index()
    }

    /// Return a copy of the set with `stop` added.
    #[must_use]
    pub const fn with(self, stop: Stop) -> Self {
        Self(self.0 | Self::bit(stop))
    }

    /// Add `stop`, returning `false` when it was already present.
    pub const fn insert(&mut self, stop: Stop) -> bool {
        let present = self.contains(stop);
        self.0 |= Self::bit(stop);
        !present
    }

    /// Whether `stop` is a member.
    #[must_use]
    pub const fn contains(self, stop: Stop) -> bool {
        self.0 & Self::bit(stop) != 0
    }

    /// Number of members.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether all five stops are members.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.0 == Self::FULL
    }

    /// The stops not in this set.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::FULL)
    }

    /// Whether `stop` may be entered next: it is unvisited and its
    /// precedence requirement, if any, is met.
    ///
    /// # Examples
    /// ```
    /// use courier_core::{Stop, StopSet};
    ///
    /// let visited = StopSet::only(Stop::Hub);
    /// assert!(visited.admits(Stop::Restaurant1));
    /// assert!(!visited.admits(Stop::Customer1));
    /// assert!(!visited.admits(Stop::Hub));
    /// ```
    #[must_use]
    pub const fn admits(self, stop: Stop) -> bool {
        if self.contains(stop) {
            return false;
        }
        match stop.required_predecessor() {
            Some(predecessor) => self.contains(predecessor),
            None => true,
        }
    }

    /// Iterate over members in [`Stop::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Stop> {
        Stop::ALL.into_iter().filter(move |stop| self.contains(*stop))
    }
}

impl FromIterator<Stop> for StopSet {
    fn from_iter<I: IntoIterator<Item = Stop>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}
