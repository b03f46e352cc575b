// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod error;
mod leave;
mod timetable;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{LeaveDates, Weekday, format_date, parse_date};
pub use error::DomainError;
pub use leave::{LeaveRange, LeaveRequest, LeaveStatus, MAX_LEAVE_DAYS, NewLeaveRequest};
pub use timetable::{PeriodWindow, TimetableConfig};
pub use types::{
    NewScheduleSlot, NewSchool, NewSubstitution, NewTeacher, PeriodIndex, ScheduleSlot, School,
    Substitution, Teacher, TeacherRole,
};
pub use validation::{
    validate_class_section, validate_email, validate_name, validate_slot_within_timetable,
    validate_subject,
};
