// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::LeaveRequestRow;
use crate::diesel_schema::leave_requests;
use crate::error::PersistenceError;
use autosub_domain::{LeaveRange, LeaveRequest, LeaveStatus, format_date};

/// Retrieves a leave request by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
/// Returns `Ok(None)` if the leave request is not found.
pub fn get_leave_request(
    conn: &mut SqliteConnection,
    leave_id: i64,
) -> Result<Option<LeaveRequest>, PersistenceError> {
    let row: Option<LeaveRequestRow> = leave_requests::table
        .filter(leave_requests::leave_id.eq(leave_id))
        .select(LeaveRequestRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(LeaveRequestRow::into_domain).transpose()?)
}

/// Finds a pending or approved leave of a teacher sharing a day with `range`.
///
/// Dates are stored as `YYYY-MM-DD`, so text comparison orders them.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn find_overlapping_leave(
    conn: &mut SqliteConnection,
    teacher_id: i64,
    range: &LeaveRange,
) -> Result<Option<LeaveRequest>, PersistenceError> {
    let from: String = format_date(range.from());
    let to: String = format_date(range.to());

    let row: Option<LeaveRequestRow> = leave_requests::table
        .filter(leave_requests::teacher_id.eq(teacher_id))
        .filter(leave_requests::status.eq_any([
            LeaveStatus::Pending.as_str(),
            LeaveStatus::Approved.as_str(),
        ]))
        .filter(leave_requests::from_date.le(&to))
        .filter(leave_requests::to_date.ge(&from))
        .order(leave_requests::leave_id.asc())
        .select(LeaveRequestRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(LeaveRequestRow::into_domain).transpose()?)
}
