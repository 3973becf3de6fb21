//! Validated rental duration.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing [`RentalDays`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RentalDaysError {
    /// No duration was given.
    #[error("rental duration is required")]
    Missing,
    /// The input is not a whole number.
    #[error("rental duration must be a whole number of days, got {0:?}")]
    NotANumber(String),
    /// The duration is zero or negative.
    #[error("rental duration must be at least 1 day")]
    NotPositive,
    /// The duration is longer than the shop rents for.
    #[error("rental duration must be at most {max} days")]
    TooLong {
        /// Maximum allowed duration.
        max: u32,
    },
}

/// Number of days a bike is rented for, always in `1..=MAX`.
///
/// ```
/// use royal_bike_core::RentalDays;
///
/// assert_eq!(RentalDays::parse("3").unwrap().get(), 3);
/// assert!(RentalDays::parse("abc").is_err());
/// assert!(RentalDays::parse("0").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RentalDays(u32);

impl RentalDays {
    /// Longest rental the shop accepts.
    pub const MAX: u32 = 365;

    /// A single day, used when no duration is given on checkout links.
    pub const ONE: Self = Self(1);

    /// Create from a number of days.
    ///
    /// # Errors
    ///
    /// Returns an error if `days` is zero or above [`Self::MAX`].
    pub const fn new(days: u32) -> Result<Self, RentalDaysError> {
        if days == 0 {
            return Err(RentalDaysError::NotPositive);
        }
        if days > Self::MAX {
            return Err(RentalDaysError::TooLong { max: Self::MAX });
        }
        Ok(Self(days))
    }

    /// Parse a duration from form or query input.
    ///
    /// # Errors
    ///
    /// Returns an error for empty, non-numeric, non-positive or too-long input.
    pub fn parse(input: &str) -> Result<Self, RentalDaysError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RentalDaysError::Missing);
        }

        let days: i64 = input
            .parse()
            .map_err(|_| RentalDaysError::NotANumber(input.to_owned()))?;

        if days <= 0 {
            return Err(RentalDaysError::NotPositive);
        }

        u32::try_from(days)
            .map_err(|_| RentalDaysError::TooLong { max: Self::MAX })
            .and_then(Self::new)
    }

    /// Number of days.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RentalDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for RentalDays {
    type Error = RentalDaysError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<RentalDays> for u32 {
    fn from(days: RentalDays) -> Self {
        days.0
    }
}
