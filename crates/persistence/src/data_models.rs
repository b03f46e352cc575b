// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion into domain records.
//!
//! Weekdays and periods are stored as `INTEGER`, calendar dates as
//! `YYYY-MM-DD` text and timestamps as RFC 3339 text. Every read goes
//! through these conversions so a bad row surfaces as
//! [`RowDecodeError`] instead of a panic.

use autosub_domain::{
    DomainError, LeaveRange, LeaveRequest, LeaveStatus, PeriodIndex, ScheduleSlot, School, Substitution,
    Teacher, TeacherRole, TimetableConfig, Weekday, parse_date,
};
use diesel::prelude::*;
use num_traits::cast::ToPrimitive;
use std::str::FromStr;
use time::{Date, OffsetDateTime};
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{leave_requests, schedule_slots, schools, substitutions, teachers};
use crate::error::RowDecodeError;

fn narrow<T: Copy + Into<i64>, U>(
    column: &'static str,
    value: T,
    convert: impl FnOnce(T) -> Option<U>,
) -> Result<U, RowDecodeError> {
    convert(value).ok_or(RowDecodeError::OutOfRange {
        column,
        value: value.into(),
    })
}

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented in RFC 3339.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, RowDecodeError> {
    value.format(&Rfc3339).map_err(|e| RowDecodeError::Timestamp {
        value: value.to_string(),
        message: e.to_string(),
    })
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, RowDecodeError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| RowDecodeError::Timestamp {
        value: value.to_string(),
        message: e.to_string(),
    })
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = schools)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SchoolRow {
    pub school_id: i64,
    pub name: String,
    pub period_count: i32,
    pub period_duration_minutes: i32,
    pub start_hour: i32,
    pub start_minute: i32,
}

impl SchoolRow {
    pub fn into_domain(self) -> Result<School, RowDecodeError> {
        let timetable: TimetableConfig = TimetableConfig::new(
            narrow("period_count", self.period_count, |v| v.to_u8())?,
            narrow("period_duration_minutes", self.period_duration_minutes, |v| {
                v.to_u16()
            })?,
            narrow("start_hour", self.start_hour, |v| v.to_u8())?,
            narrow("start_minute", self.start_minute, |v| v.to_u8())?,
        )
        .map_err(|source| RowDecodeError::Invalid {
            column: "timetable",
            source,
        })?;

        Ok(School {
            school_id: self.school_id,
            name: self.name,
            timetable,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = teachers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TeacherRow {
    pub teacher_id: i64,
    pub school_id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: i32,
}

impl TeacherRow {
    pub fn into_domain(self) -> Result<Teacher, RowDecodeError> {
        let role: TeacherRole =
            TeacherRole::from_str(&self.role).map_err(|source| RowDecodeError::Invalid {
                column: "role",
                source,
            })?;
        Ok(Teacher {
            teacher_id: self.teacher_id,
            school_id: self.school_id,
            name: self.name,
            email: self.email,
            role,
            is_active: self.is_active != 0,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = schedule_slots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ScheduleSlotRow {
    pub slot_id: i64,
    pub school_id: i64,
    pub teacher_id: i64,
    pub weekday: i32,
    pub period_index: i32,
    pub subject: String,
    pub class_section: String,
}

impl ScheduleSlotRow {
    pub fn into_domain(self) -> Result<ScheduleSlot, RowDecodeError> {
        let weekday: Weekday = Weekday::new(narrow("weekday", self.weekday, |v| v.to_u8())?)
            .map_err(|source| RowDecodeError::Invalid {
                column: "weekday",
                source,
            })?;
        let period_index: PeriodIndex =
            PeriodIndex::new(narrow("period_index", self.period_index, |v| v.to_u8())?);

        Ok(ScheduleSlot {
            slot_id: self.slot_id,
            school_id: self.school_id,
            teacher_id: self.teacher_id,
            weekday,
            period_index,
            subject: self.subject,
            class_section: self.class_section,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = substitutions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubstitutionRow {
    pub substitution_id: i64,
    pub original_teacher_id: i64,
    pub substitute_teacher_id: i64,
    pub schedule_slot_id: i64,
    pub school_id: i64,
    pub reason: String,
    pub assigned_at: String,
}

impl SubstitutionRow {
    pub fn into_domain(self) -> Result<Substitution, RowDecodeError> {
        Ok(Substitution {
            substitution_id: self.substitution_id,
            original_teacher_id: self.original_teacher_id,
            substitute_teacher_id: self.substitute_teacher_id,
            schedule_slot_id: self.schedule_slot_id,
            school_id: self.school_id,
            reason: self.reason,
            assigned_at: parse_timestamp(&self.assigned_at)?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = leave_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LeaveRequestRow {
    pub leave_id: i64,
    pub teacher_id: i64,
    pub school_id: i64,
    pub from_date: String,
    pub to_date: String,
    pub reason: String,
    pub status: String,
    pub admin_comment: Option<String>,
}

impl LeaveRequestRow {
    pub fn into_domain(self) -> Result<LeaveRequest, RowDecodeError> {
        let invalid = |column: &'static str| {
            move |source: DomainError| RowDecodeError::Invalid { column, source }
        };
        let from: Date = parse_date(&self.from_date).map_err(invalid("from_date"))?;
        let to: Date = parse_date(&self.to_date).map_err(invalid("to_date"))?;
        let range: LeaveRange = LeaveRange::new(from, to).map_err(invalid("to_date"))?;
        let status: LeaveStatus = LeaveStatus::from_str(&self.status).map_err(invalid("status"))?;

        Ok(LeaveRequest {
            leave_id: self.leave_id,
            teacher_id: self.teacher_id,
            school_id: self.school_id,
            range,
            reason: self.reason,
            status,
            admin_comment: self.admin_comment,
        })
    }
}

/// Decodes a list of rows, stopping at the first bad one.
pub fn decode_all<R, T>(
    rows: Vec<R>,
    decode: impl Fn(R) -> Result<T, RowDecodeError>,
) -> Result<Vec<T>, RowDecodeError> {
    rows.into_iter().map(decode).collect()
}
