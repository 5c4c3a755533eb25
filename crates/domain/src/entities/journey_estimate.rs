//! Driving-time and mandatory-rest calculation
//!
//! Converts raw driving time from the routing provider into a
//! regulation-adjusted journey duration and an arrival estimate:
//!
//! - one 45 minute break per full 4.5 hours of driving
//! - a single flat 11 hour daily rest once the adjusted duration exceeds 13 hours
//!
//! The daily rest is added at most once, however many days the journey
//! spans. There is no multi-day rule to replace it with.

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::Route;
use crate::errors::DomainError;
use crate::value_objects::HoursMinutes;

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: i64 = 86_400;

/// Driver-hours constants used by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestPolicy {
    /// Driving time that earns one short break
    pub break_interval_hours: f64,
    /// Length of one short break
    pub break_duration_hours: f64,
    /// Adjusted duration above which the daily rest applies (strict `>`)
    pub daily_rest_threshold_hours: f64,
    /// Length of the daily rest
    pub daily_rest_hours: f64,
}

impl RestPolicy {
    /// 4.5h / 45min breaks, 11h rest above 13h
    pub const REGULATORY: Self = Self {
        break_interval_hours: 4.5,
        break_duration_hours: 0.75,
        daily_rest_threshold_hours: 13.0,
        daily_rest_hours: 11.0,
    };

    /// Check that every constant is finite, the break interval is positive
    /// and the other lengths are non-negative
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPolicy`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let lengths = [
            ("break_duration_hours", self.break_duration_hours),
            ("daily_rest_threshold_hours", self.daily_rest_threshold_hours),
            ("daily_rest_hours", self.daily_rest_hours),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidPolicy(format!(
                    "{name} must be a finite, non-negative number of hours, got {value}"
                )));
            }
        }
        // NaN fails the comparison
        if !(self.break_interval_hours.is_finite() && self.break_interval_hours > 0.0) {
            return Err(DomainError::InvalidPolicy(format!(
                "break_interval_hours must be a finite, positive number of hours, got {}",
                self.break_interval_hours
            )));
        }
        Ok(())
    }

    /// Compute a journey estimate under this policy
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPolicy`] if the policy itself is invalid,
    /// [`DomainError::InvalidDuration`] if `driving_hours` is negative,
    /// not finite or too large to schedule, and
    /// [`DomainError::InvalidDistance`] if `distance_km` is negative or not finite.
    pub fn estimate(
        &self,
        driving_hours: f64,
        distance_km: f64,
        departure_time: NaiveTime,
    ) -> Result<JourneyEstimate, DomainError> {
        self.validate()?;
        if !driving_hours.is_finite() || driving_hours < 0.0 {
            return Err(DomainError::InvalidDuration(format!(
                "driving time must be a finite, non-negative number of hours, got {driving_hours}"
            )));
        }
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(DomainError::InvalidDistance(format!(
                "distance must be a finite, non-negative number of km, got {distance_km}"
            )));
        }

        let breaks = (driving_hours / self.break_interval_hours).floor();
        if breaks > f64::from(u32::MAX) {
            return Err(DomainError::InvalidDuration(format!(
                "driving time of {driving_hours}h is too large to schedule"
            )));
        }
        let rest_break_count = breaks as u32;

        let adjusted_duration_hours =
            f64::from(rest_break_count).mul_add(self.break_duration_hours, driving_hours);
        let mandatory_daily_rest_applied = adjusted_duration_hours > self.daily_rest_threshold_hours;
        let total_duration_with_daily_rest_hours = if mandatory_daily_rest_applied {
            adjusted_duration_hours + self.daily_rest_hours
        } else {
            adjusted_duration_hours
        };

        let estimated_arrival =
            ArrivalTime::after(departure_time, total_duration_with_daily_rest_hours)?;

        Ok(JourneyEstimate {
            total_distance_km: distance_km,
            driving_duration_hours: driving_hours,
            rest_break_count,
            adjusted_duration_hours,
            mandatory_daily_rest_applied,
            total_duration_with_daily_rest_hours,
            departure_time,
            estimated_arrival,
        })
    }
}

impl Default for RestPolicy {
    fn default() -> Self {
        Self::REGULATORY
    }
}

/// Arrival time of day plus the number of calendar days after departure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrivalTime {
    time: NaiveTime,
    days_later: u32,
}

impl ArrivalTime {
    /// Departure time plus a duration in hours, rolling past midnight
    ///
    /// The duration is rounded to whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidDuration`] if the duration is negative,
    /// not finite or overflows the calendar.
    pub fn after(departure: NaiveTime, hours: f64) -> Result<Self, DomainError> {
        let seconds = (hours * SECONDS_PER_HOUR).round();
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(DomainError::InvalidDuration(format!(
                "cannot schedule {hours}h after departure"
            )));
        }

        // `as` saturates, try_seconds rejects anything out of range
        let delta = TimeDelta::try_seconds(seconds as i64).ok_or_else(|| {
            DomainError::InvalidDuration(format!("{hours}h exceeds the supported range"))
        })?;

        let (time, wrapped_seconds) = departure.overflowing_add_signed(delta);
        let days_later = u32::try_from(wrapped_seconds / SECONDS_PER_DAY).map_err(|_| {
            DomainError::InvalidDuration(format!("{hours}h exceeds the supported range"))
        })?;

        Ok(Self { time, days_later })
    }

    /// Arrival time of day
    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    /// Calendar days between the departure day and the arrival day
    #[must_use]
    pub const fn days_later(&self) -> u32 {
        self.days_later
    }
}

impl fmt::Display for ArrivalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time.format("%H:%M"))?;
        match self.days_later {
            0 => Ok(()),
            1 => write!(f, " (+1 day)"),
            n => write!(f, " (+{n} days)"),
        }
    }
}

/// Result of the journey time calculation for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyEstimate {
    /// Route distance in kilometers
    pub total_distance_km: f64,
    /// Pure driving time reported by the routing provider
    pub driving_duration_hours: f64,
    /// Short breaks owed, `floor(driving / 4.5)`
    pub rest_break_count: u32,
    /// Driving plus short breaks
    pub adjusted_duration_hours: f64,
    /// Whether the daily rest was added
    pub mandatory_daily_rest_applied: bool,
    /// Adjusted duration plus the daily rest, if applied
    pub total_duration_with_daily_rest_hours: f64,
    /// Requested departure time of day
    pub departure_time: NaiveTime,
    /// Departure time plus the total duration
    pub estimated_arrival: ArrivalTime,
}

impl JourneyEstimate {
    /// Calculate with the regulatory rest policy
    ///
    /// # Errors
    ///
    /// See [`RestPolicy::estimate`].
    pub fn calculate(
        driving_hours: f64,
        distance_km: f64,
        departure_time: NaiveTime,
    ) -> Result<Self, DomainError> {
        RestPolicy::REGULATORY.estimate(driving_hours, distance_km, departure_time)
    }

    /// Calculate from a routed path, converting meters and seconds
    ///
    /// # Errors
    ///
    /// See [`RestPolicy::estimate`].
    pub fn from_route(
        route: &Route,
        policy: &RestPolicy,
        departure_time: NaiveTime,
    ) -> Result<Self, DomainError> {
        policy.estimate(route.driving_hours(), route.total_distance_km(), departure_time)
    }

    /// Time spent in short breaks
    #[must_use]
    pub fn break_hours(&self) -> f64 {
        self.adjusted_duration_hours - self.driving_duration_hours
    }

    /// Driving time as `Xh YYmin`
    #[must_use]
    pub fn driving_text(&self) -> HoursMinutes {
        HoursMinutes::from_hours(self.driving_duration_hours)
    }

    /// Driving plus short breaks as `Xh YYmin`
    #[must_use]
    pub fn adjusted_text(&self) -> HoursMinutes {
        HoursMinutes::from_hours(self.adjusted_duration_hours)
    }

    /// Total including daily rest as `Xh YYmin`
    #[must_use]
    pub fn total_text(&self) -> HoursMinutes {
        HoursMinutes::from_hours(self.total_duration_with_daily_rest_hours)
    }
}
