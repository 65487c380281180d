//! Second-resolution timestamps with blank and archive semantics.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An instant with one-second resolution, counted from 1 January 1970 GMT.
///
/// A value of zero means "blank" (no date set). Calendar dates are
/// conventionally stored with the time component at exactly 12:00:00 GMT,
/// which is the form the external service accepts. Far-future values are
/// either pseudo-dates or archived dates; classifying them needs today's
/// date and therefore lives on the date resolver, not here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

/// Months in the archive shift. Archiving parks a date one calendar year
/// ahead; unarchiving reverses the shift.
const ARCHIVE_SHIFT_MONTHS: u32 = 12;

impl Timestamp {
    /// The blank timestamp (no date set).
    pub const BLANK: Self = Self(0);

    /// Creates a timestamp from a number of seconds since the epoch.
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Creates a timestamp from a UTC datetime.
    #[must_use]
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp())
    }

    /// Returns the number of seconds since the epoch.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        self.0
    }

    /// Returns whether this timestamp is blank (no date set).
    #[must_use]
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }

    /// Returns the timestamp as a UTC datetime, or `None` when the value
    /// is outside the representable range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }

    /// Returns this date parked one calendar year into the future.
    #[must_use]
    pub fn archive(self) -> Self {
        self.shifted_by_months(ARCHIVE_SHIFT_MONTHS, true)
    }

    /// Returns this date brought back one calendar year.
    #[must_use]
    pub fn unarchive(self) -> Self {
        self.shifted_by_months(ARCHIVE_SHIFT_MONTHS, false)
    }

    fn shifted_by_months(self, months: u32, forwards: bool) -> Self {
        let Some(datetime) = self.to_datetime() else {
            return self;
        };
        let shift = Months::new(months);
        let shifted = if forwards {
            datetime.checked_add_months(shift)
        } else {
            datetime.checked_sub_months(shift)
        };
        shifted.map_or(self, Self::from_datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(datetime) if !self.is_blank() => write!(f, "{datetime}"),
            _ => write!(f, "{}", self.0),
        }
    }
}
