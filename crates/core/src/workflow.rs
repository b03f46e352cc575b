// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave approval workflow.
//!
//! A teacher applies for leave, an admin decides it once. Approval runs
//! the assignment engine exactly once for that leave.

use crate::assign::{AssignmentOutcome, assign_substitutes};
use crate::error::CoreError;
use crate::notice::{Notice, assignment_notices};
use crate::store::{LeaveStore, TimetableStore};
use autosub_domain::{
    DomainError, LeaveRange, LeaveRequest, LeaveStatus, NewLeaveRequest, School, Teacher,
};
use time::Date;
use tracing::{error, info};

/// Result of deciding a leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveDecisionOutcome {
    /// The leave request as stored after the decision.
    pub leave: LeaveRequest,
    /// The assignment run, present only for a successful approval run.
    pub assignment: Option<AssignmentOutcome>,
    /// Why the assignment run failed. The decision stands regardless.
    pub assignment_error: Option<CoreError>,
    /// Notices to hand to a sink, in the order they were produced.
    pub notices: Vec<Notice>,
}

/// Records a new pending leave request.
///
/// # Arguments
///
/// * `store` - The store
/// * `teacher_id` - The requesting teacher
/// * `school_id` - The teacher's school
/// * `from` - First day of leave
/// * `to` - Last day of leave (inclusive)
/// * `reason` - Free-text reason
///
/// # Errors
///
/// Returns an error if:
/// - `to` is before `from`
/// - the teacher does not exist in the school
/// - the teacher already has a pending or approved leave sharing a day
/// - the store fails
pub fn apply_for_leave<S>(
    store: &mut S,
    teacher_id: i64,
    school_id: i64,
    from: Date,
    to: Date,
    reason: &str,
) -> Result<LeaveRequest, CoreError>
where
    S: TimetableStore + LeaveStore + ?Sized,
{
    let range: LeaveRange = LeaveRange::new(from, to)?;

    let teacher: Teacher = store
        .get_teacher(teacher_id)?
        .filter(|t| t.school_id == school_id)
        .ok_or(CoreError::NotFound {
            entity: "teacher",
            id: teacher_id,
        })?;

    if let Some(existing) = store.find_overlapping_leave(teacher.teacher_id, &range)? {
        return Err(DomainError::OverlappingLeave {
            teacher_id,
            existing_leave_id: existing.leave_id,
        }
        .into());
    }

    let leave: LeaveRequest = store.create_leave_request(NewLeaveRequest {
        teacher_id,
        school_id,
        range,
        reason: reason.trim().to_string(),
    })?;

    info!(
        leave_id = leave.leave_id,
        teacher_id,
        school_id,
        from = %from,
        to = %to,
        "Leave requested"
    );
    Ok(leave)
}

/// Approves or rejects a pending leave request.
///
/// The new status is written before anything else. On approval the
/// assignment engine runs once; if it fails the leave stays approved and
/// the failure is returned in `assignment_error`, together with any
/// notices for substitutions recorded before the failure.
///
/// # Arguments
///
/// * `store` - The store
/// * `leave_id` - The leave to decide
/// * `decision` - `Approved` or `Rejected`
/// * `admin_comment` - Optional comment for the teacher
///
/// # Errors
///
/// Returns an error if:
/// - the leave request, its teacher or its school does not exist
/// - the leave request has already been decided
/// - `decision` is not `Approved` or `Rejected`
/// - the status write fails
pub fn decide_leave<S>(
    store: &mut S,
    leave_id: i64,
    decision: LeaveStatus,
    admin_comment: Option<String>,
) -> Result<LeaveDecisionOutcome, CoreError>
where
    S: TimetableStore + LeaveStore + ?Sized,
{
    let leave: LeaveRequest = store
        .get_leave_request(leave_id)?
        .ok_or(CoreError::NotFound {
            entity: "leave request",
            id: leave_id,
        })?;
    let teacher: Teacher = store
        .get_teacher(leave.teacher_id)?
        .ok_or(CoreError::NotFound {
            entity: "teacher",
            id: leave.teacher_id,
        })?;
    let school: School = store
        .get_school(leave.school_id)?
        .ok_or(CoreError::NotFound {
            entity: "school",
            id: leave.school_id,
        })?;

    let decided: LeaveRequest = leave.decide(decision, admin_comment)?;
    store.update_leave_status(&decided)?;
    info!(
        leave_id,
        teacher_id = decided.teacher_id,
        status = %decided.status,
        "Leave decided"
    );

    let mut outcome: LeaveDecisionOutcome = LeaveDecisionOutcome {
        notices: vec![Notice::leave_decided(&decided, &teacher)],
        leave: decided,
        assignment: None,
        assignment_error: None,
    };

    if outcome.leave.status != LeaveStatus::Approved {
        return Ok(outcome);
    }

    match assign_substitutes(
        store,
        school.school_id,
        teacher.teacher_id,
        outcome.leave.range.from(),
        outcome.leave.range.to(),
    ) {
        Ok(assignment) => {
            outcome
                .notices
                .extend(assignment_notices(&assignment, &school.timetable));
            outcome.assignment = Some(assignment);
        }
        Err(err) => {
            error!(leave_id, error = %err, "Substitute assignment failed after approval");
            if let CoreError::Interrupted { partial, .. } = &err {
                outcome
                    .notices
                    .extend(assignment_notices(partial, &school.timetable));
            }
            outcome.assignment_error = Some(err);
        }
    }

    Ok(outcome)
}
