// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::leave_requests;
use crate::error::PersistenceError;
use autosub_domain::{LeaveRequest, LeaveStatus, NewLeaveRequest, format_date};

/// Inserts a pending leave request.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_leave_request(
    conn: &mut SqliteConnection,
    request: &NewLeaveRequest,
) -> Result<LeaveRequest, PersistenceError> {
    let from_date: String = format_date(request.range.from());
    let to_date: String = format_date(request.range.to());

    diesel::insert_into(leave_requests::table)
        .values((
            leave_requests::teacher_id.eq(request.teacher_id),
            leave_requests::school_id.eq(request.school_id),
            leave_requests::from_date.eq(&from_date),
            leave_requests::to_date.eq(&to_date),
            leave_requests::reason.eq(&request.reason),
            leave_requests::status.eq(LeaveStatus::Pending.as_str()),
        ))
        .execute(conn)?;

    let leave_id: i64 = get_last_insert_rowid(conn)?;
    debug!(leave_id, teacher_id = request.teacher_id, "Stored leave request");

    Ok(LeaveRequest {
        leave_id,
        teacher_id: request.teacher_id,
        school_id: request.school_id,
        range: request.range,
        reason: request.reason.clone(),
        status: LeaveStatus::Pending,
        admin_comment: None,
    })
}

/// Writes the status and admin comment of a decided leave request.
///
/// # Errors
///
/// Returns `NotFound` if the leave request does not exist.
pub fn update_leave_status(
    conn: &mut SqliteConnection,
    leave: &LeaveRequest,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(leave_requests::table.filter(leave_requests::leave_id.eq(leave.leave_id)))
            .set((
                leave_requests::status.eq(leave.status.as_str()),
                leave_requests::admin_comment.eq(leave.admin_comment.as_deref()),
            ))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Leave request {} not found",
            leave.leave_id
        )));
    }
    Ok(())
}
