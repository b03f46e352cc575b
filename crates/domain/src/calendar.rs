// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar helpers shared by the engines.
//!
//! The weekly timetable is keyed by a weekday number where Sunday is `0`
//! and Saturday is `6`. Leave requests are expressed as calendar dates, so
//! every date must be mapped onto that numbering before it can be matched
//! against a schedule slot.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A day of the repeating weekly timetable, `0` = Sunday through `6` = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weekday(u8);

impl Weekday {
    /// Sunday (`0`).
    pub const SUNDAY: Self = Self(0);
    /// Monday (`1`).
    pub const MONDAY: Self = Self(1);
    /// Tuesday (`2`).
    pub const TUESDAY: Self = Self(2);
    /// Wednesday (`3`).
    pub const WEDNESDAY: Self = Self(3);
    /// Thursday (`4`).
    pub const THURSDAY: Self = Self(4);
    /// Friday (`5`).
    pub const FRIDAY: Self = Self(5);
    /// Saturday (`6`).
    pub const SATURDAY: Self = Self(6);

    /// Creates a weekday from its number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeekday` if `value` is greater than 6.
    pub const fn new(value: u8) -> Result<Self, DomainError> {
        if value > 6 {
            return Err(DomainError::InvalidWeekday(value));
        }
        Ok(Self(value))
    }

    /// Returns the weekday a calendar date falls on.
    #[must_use]
    pub const fn of(date: Date) -> Self {
        Self(date.weekday().number_days_from_sunday())
    }

    /// Returns the weekday number (`0` = Sunday).
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Returns the English name of the weekday.
    #[must_use]
    pub const fn name(self) -> &'static str {
        WEEKDAY_NAMES[self.0 as usize]
    }
}

impl TryFrom<u8> for Weekday {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weekday> for u8 {
    fn from(weekday: Weekday) -> Self {
        weekday.0
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Iterator over every calendar date of a closed interval, in ascending order.
///
/// Weekends are included; whether slots exist on them is a property of the
/// timetable, not of the calendar.
#[derive(Debug, Clone)]
pub struct LeaveDates {
    next: Option<Date>,
    last: Date,
}

impl LeaveDates {
    pub(crate) const fn new(first: Date, last: Date) -> Self {
        Self {
            next: Some(first),
            last,
        }
    }
}

impl Iterator for LeaveDates {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        let current: Date = self.next?;
        if current > self.last {
            self.next = None;
            return None;
        }
        // `next_day` is `None` only at `Date::MAX`, which also ends the range.
        self.next = current.next_day();
        Some(current)
    }
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a date as ISO 8601 (`YYYY-MM-DD`).
#[must_use]
pub fn format_date(date: Date) -> String {
    let (year, month, day) = date.to_calendar_date();
    format!("{year:04}-{:02}-{day:02}", u8::from(month))
}
