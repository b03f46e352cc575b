// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! School day configuration.
//!
//! The engines never consult these values when choosing substitutes. They
//! bound the valid period indices of a school and let notices show the
//! wall-clock time of a period.

use crate::error::DomainError;
use crate::types::PeriodIndex;
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Per-school timetable settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableConfig {
    period_count: u8,
    period_duration_minutes: u16,
    start_hour: u8,
    start_minute: u8,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            period_count: 8,
            period_duration_minutes: 45,
            start_hour: 8,
            start_minute: 0,
        }
    }
}

impl TimetableConfig {
    /// Creates a validated timetable configuration.
    ///
    /// # Arguments
    ///
    /// * `period_count` - Number of periods in a school day
    /// * `period_duration_minutes` - Length of each period
    /// * `start_hour` - Hour the first period starts (0-23)
    /// * `start_minute` - Minute the first period starts (0-59)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `period_count` or `period_duration_minutes` is zero
    /// - the start time is not a valid time of day
    /// - the last period would end after midnight
    pub fn new(
        period_count: u8,
        period_duration_minutes: u16,
        start_hour: u8,
        start_minute: u8,
    ) -> Result<Self, DomainError> {
        if period_count == 0 {
            return Err(DomainError::InvalidTimetableConfig {
                reason: String::from("period count must be greater than 0"),
            });
        }
        if period_duration_minutes == 0 {
            return Err(DomainError::InvalidTimetableConfig {
                reason: String::from("period duration must be greater than 0"),
            });
        }
        if start_hour > 23 || start_minute > 59 {
            return Err(DomainError::InvalidTimetableConfig {
                reason: format!("start time {start_hour:02}:{start_minute:02} is not a time of day"),
            });
        }

        let config: Self = Self {
            period_count,
            period_duration_minutes,
            start_hour,
            start_minute,
        };

        let day_end: u32 = config.start_offset_minutes()
            + u32::from(period_count) * u32::from(period_duration_minutes);
        if day_end > MINUTES_PER_DAY {
            return Err(DomainError::InvalidTimetableConfig {
                reason: format!(
                    "{period_count} periods of {period_duration_minutes} minutes run past midnight"
                ),
            });
        }

        Ok(config)
    }

    /// Number of periods in a school day.
    #[must_use]
    pub const fn period_count(&self) -> u8 {
        self.period_count
    }

    /// Length of each period in minutes.
    #[must_use]
    pub const fn period_duration_minutes(&self) -> u16 {
        self.period_duration_minutes
    }

    /// Hour the first period starts.
    #[must_use]
    pub const fn start_hour(&self) -> u8 {
        self.start_hour
    }

    /// Minute the first period starts.
    #[must_use]
    pub const fn start_minute(&self) -> u8 {
        self.start_minute
    }

    /// Whether `period` is a period of this school day.
    #[must_use]
    pub const fn contains(&self, period: PeriodIndex) -> bool {
        period.value() < self.period_count
    }

    /// Computes the wall-clock window of a period.
    ///
    /// Returns `None` if the period is not part of the school day.
    #[must_use]
    pub fn period_window(&self, period: PeriodIndex) -> Option<PeriodWindow> {
        if !self.contains(period) {
            return None;
        }

        let day_start: NaiveTime =
            NaiveTime::from_hms_opt(u32::from(self.start_hour), u32::from(self.start_minute), 0)?;
        let duration: Duration = Duration::minutes(i64::from(self.period_duration_minutes));
        let offset: Duration = duration * i32::from(period.value());

        let start: NaiveTime = day_start + offset;
        let end: NaiveTime = start + duration;
        Some(PeriodWindow { start, end })
    }

    const fn start_offset_minutes(&self) -> u32 {
        self.start_hour as u32 * 60 + self.start_minute as u32
    }
}

/// Wall-clock start and end of a teaching period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    /// When the period starts.
    pub start: NaiveTime,
    /// When the period ends.
    pub end: NaiveTime,
}

impl std::fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}
