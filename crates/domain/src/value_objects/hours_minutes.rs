//! Duration text in whole hours and minutes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A duration split into whole hours and minutes, rendered as `7h 30min`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoursMinutes {
    hours: u64,
    minutes: u8,
}

impl HoursMinutes {
    /// Convert fractional hours, rounding minutes to the nearest integer
    ///
    /// A fraction that rounds up to 60 minutes carries into the hour, so
    /// `7.999` becomes `8h 00min`. Negative and NaN inputs render as zero.
    #[must_use]
    pub fn from_hours(value: f64) -> Self {
        let value = value.max(0.0);
        let whole = value.trunc();
        let minutes = ((value - whole) * 60.0).round() as u8;
        let hours = whole as u64;

        if minutes >= 60 {
            Self {
                hours: hours.saturating_add(1),
                minutes: 0,
            }
        } else {
            Self { hours, minutes }
        }
    }

    /// Whole hours
    #[must_use]
    pub const fn hours(&self) -> u64 {
        self.hours
    }

    /// Remaining minutes (0-59)
    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }
}

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {:02}min", self.hours, self.minutes)
    }
}
