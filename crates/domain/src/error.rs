// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::leave::LeaveStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The end of a date range precedes its start.
    InvalidRange {
        /// The first day of the range.
        from: time::Date,
        /// The last day of the range.
        to: time::Date,
    },
    /// A leave range is longer than one request may cover.
    LeaveTooLong {
        /// Days in the requested range.
        days: i64,
        /// The longest allowed range.
        max_days: i64,
    },
    /// Weekday number is outside `0..=6`.
    InvalidWeekday(u8),
    /// Period index is outside the school's timetable.
    InvalidPeriodIndex {
        /// The rejected index (0-based).
        index: u8,
        /// The number of periods in the school day.
        period_count: u8,
    },
    /// Leave status string is not one of `pending`, `approved`, `rejected`.
    InvalidLeaveStatus(String),
    /// A leave request has already left the `pending` state.
    LeaveAlreadyDecided {
        /// The leave request identifier.
        leave_id: i64,
        /// The status the leave is already in.
        status: LeaveStatus,
    },
    /// A decision other than approve or reject was requested.
    InvalidDecision(String),
    /// Teacher role string is not `teacher` or `admin`.
    InvalidRole(String),
    /// A name is empty or invalid.
    InvalidName(String),
    /// An email address is empty or malformed.
    InvalidEmail(String),
    /// A subject is empty.
    InvalidSubject(String),
    /// A class section is empty.
    InvalidClassSection(String),
    /// School timetable settings are out of range.
    InvalidTimetableConfig {
        /// Description of the problem.
        reason: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The teacher already has a pending or approved leave covering part of the range.
    OverlappingLeave {
        /// The teacher requesting leave.
        teacher_id: i64,
        /// The existing leave request that overlaps.
        existing_leave_id: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { from, to } => {
                write!(
                    f,
                    "Invalid date range: end date {to} is before start date {from}"
                )
            }
            Self::LeaveTooLong { days, max_days } => {
                write!(
                    f,
                    "Leave of {days} days exceeds the maximum of {max_days} days"
                )
            }
            Self::InvalidWeekday(value) => {
                write!(f, "Invalid weekday: {value}. Must be between 0 and 6")
            }
            Self::InvalidPeriodIndex {
                index,
                period_count,
            } => {
                write!(
                    f,
                    "Invalid period index: {index}. School day has {period_count} periods"
                )
            }
            Self::InvalidLeaveStatus(status) => write!(f, "Invalid leave status: {status}"),
            Self::LeaveAlreadyDecided { leave_id, status } => {
                write!(f, "Leave request {leave_id} has already been {status}")
            }
            Self::InvalidDecision(msg) => {
                write!(
                    f,
                    "Invalid decision: {msg}. Must be approved or rejected"
                )
            }
            Self::InvalidRole(role) => {
                write!(f, "Invalid role: '{role}'. Must be 'teacher' or 'admin'")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidSubject(msg) => write!(f, "Invalid subject: {msg}"),
            Self::InvalidClassSection(msg) => write!(f, "Invalid class section: {msg}"),
            Self::InvalidTimetableConfig { reason } => {
                write!(f, "Invalid timetable configuration: {reason}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::OverlappingLeave {
                teacher_id,
                existing_leave_id,
            } => {
                write!(
                    f,
                    "Teacher {teacher_id} already has leave request {existing_leave_id} overlapping this period"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
