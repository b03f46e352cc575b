// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler validates its request, calls the persistence adapter or an
//! engine, and maps the result into a response DTO. Handlers never deliver
//! notices; those that produce any return them in a [`WithNotices`].

use std::str::FromStr;

use autosub::{
    ConflictReport, CoreError, HistoryFilter, LeaveDecisionOutcome, ScanOutcome,
    SubstitutionRecord,
};
use autosub_domain::{
    LeaveRequest, LeaveStatus, NewScheduleSlot, NewSchool, NewTeacher, PeriodIndex, ScheduleSlot,
    School, Teacher, TeacherRole, TimetableConfig, Weekday, parse_date,
    validate_slot_within_timetable,
};
use autosub_persistence::Persistence;
use time::Date;
use tracing::{info, warn};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    ApplyLeaveRequest, AssignSubstitutesRequest, AssignmentResponse, ConflictReportResponse,
    CreateScheduleSlotRequest, CreateSchoolRequest, CreateTeacherRequest, DecideLeaveRequest,
    DecideLeaveResponse, LeaveResponse, ScanFailureInfo, ScanResponse, ScheduleSlotResponse,
    SchoolResponse, SetTeacherActiveRequest, SubstitutionHistoryRequest,
    SubstitutionHistoryResponse, SubstitutionRecordInfo, TeacherResponse, WithNotices,
};

fn school_not_found(school_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("School"),
        message: format!("school {school_id} does not exist"),
    }
}

fn teacher_not_found(teacher_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Teacher"),
        message: format!("teacher {teacher_id} does not exist"),
    }
}

fn parse_request_date(value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(translate_domain_error)
}

/// Creates a school.
///
/// # Errors
///
/// Returns an error if the name is empty or the timetable settings are out
/// of range.
pub fn create_school(
    persistence: &mut Persistence,
    request: &CreateSchoolRequest,
) -> Result<SchoolResponse, ApiError> {
    let defaults: TimetableConfig = TimetableConfig::default();
    let timetable: TimetableConfig = TimetableConfig::new(
        request.period_count.unwrap_or(defaults.period_count()),
        request
            .period_duration_minutes
            .unwrap_or(defaults.period_duration_minutes()),
        request.start_hour.unwrap_or(defaults.start_hour()),
        request.start_minute.unwrap_or(defaults.start_minute()),
    )
    .map_err(translate_domain_error)?;
    let new_school: NewSchool =
        NewSchool::new(&request.name, timetable).map_err(translate_domain_error)?;

    let school: School = persistence.create_school(&new_school)?;
    Ok(SchoolResponse::from(&school))
}

/// Creates a staff member of a school.
///
/// # Errors
///
/// Returns an error if:
/// - the school does not exist
/// - the name, email or role is invalid
/// - the email is already registered
pub fn create_teacher(
    persistence: &mut Persistence,
    request: &CreateTeacherRequest,
) -> Result<TeacherResponse, ApiError> {
    let role: TeacherRole = request
        .role
        .as_deref()
        .map_or(Ok(TeacherRole::Teacher), TeacherRole::from_str)
        .map_err(translate_domain_error)?;
    let new_teacher: NewTeacher =
        NewTeacher::new(request.school_id, &request.name, &request.email, role)
            .map_err(translate_domain_error)?;

    if persistence.get_school(request.school_id)?.is_none() {
        return Err(school_not_found(request.school_id));
    }

    let teacher: Teacher = persistence.create_teacher(&new_teacher)?;
    Ok(TeacherResponse::from(&teacher))
}

/// Activates or deactivates a staff member.
///
/// Deactivation does not touch substitutions already recorded.
///
/// # Errors
///
/// Returns an error if the teacher does not exist.
pub fn set_teacher_active(
    persistence: &mut Persistence,
    teacher_id: i64,
    request: SetTeacherActiveRequest,
) -> Result<TeacherResponse, ApiError> {
    if persistence.get_teacher(teacher_id)?.is_none() {
        return Err(teacher_not_found(teacher_id));
    }
    let teacher: Teacher = persistence.set_teacher_active(teacher_id, request.is_active)?;
    Ok(TeacherResponse::from(&teacher))
}

/// Creates a schedule slot.
///
/// # Errors
///
/// Returns an error if:
/// - the school or teacher does not exist
/// - the teacher is not on the school's staff
/// - the weekday is not `0..=6` or the period is past the school's last period
/// - the subject or class section is empty
/// - the teacher already has a slot at that weekday and period
pub fn create_schedule_slot(
    persistence: &mut Persistence,
    request: &CreateScheduleSlotRequest,
) -> Result<ScheduleSlotResponse, ApiError> {
    let weekday: Weekday = Weekday::new(request.weekday).map_err(translate_domain_error)?;
    let period_index: PeriodIndex = PeriodIndex::new(request.period_index);

    let school: School = persistence
        .get_school(request.school_id)?
        .ok_or_else(|| school_not_found(request.school_id))?;
    validate_slot_within_timetable(period_index, &school.timetable)
        .map_err(translate_domain_error)?;

    let teacher: Teacher = persistence
        .get_teacher(request.teacher_id)?
        .ok_or_else(|| teacher_not_found(request.teacher_id))?;
    if teacher.school_id != school.school_id {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("slot_teacher_in_school"),
            message: format!(
                "teacher {} is not on the staff of school {}",
                teacher.teacher_id, school.school_id
            ),
        });
    }

    let new_slot: NewScheduleSlot = NewScheduleSlot::new(
        school.school_id,
        teacher.teacher_id,
        weekday,
        period_index,
        &request.subject,
        &request.class_section,
    )
    .map_err(translate_domain_error)?;

    let slot: ScheduleSlot = persistence.create_schedule_slot(&new_slot)?;
    Ok(ScheduleSlotResponse::from(&slot))
}

/// Records a pending leave request.
///
/// # Errors
///
/// Returns an error if:
/// - a date does not parse or the range is reversed
/// - the teacher does not exist in the school
/// - the teacher already has a pending or approved leave sharing a day
pub fn apply_leave(
    persistence: &mut Persistence,
    request: &ApplyLeaveRequest,
) -> Result<LeaveResponse, ApiError> {
    let from: Date = parse_request_date(&request.from_date)?;
    let to: Date = parse_request_date(&request.to_date)?;

    let leave: LeaveRequest = autosub::apply_for_leave(
        persistence,
        request.teacher_id,
        request.school_id,
        from,
        to,
        &request.reason,
    )
    .map_err(translate_core_error)?;

    Ok(LeaveResponse::from(&leave))
}

/// Approves or rejects a pending leave. Approval assigns substitutes.
///
/// A failed assignment run does not undo the decision; the failure is
/// reported in `assignment_error` and whatever the run completed is
/// still returned.
///
/// # Errors
///
/// Returns an error if:
/// - the decision is not `approved` or `rejected`
/// - the leave does not exist or is already decided
pub fn decide_leave(
    persistence: &mut Persistence,
    leave_id: i64,
    request: &DecideLeaveRequest,
) -> Result<WithNotices<DecideLeaveResponse>, ApiError> {
    let decision: LeaveStatus =
        LeaveStatus::parse_decision(&request.decision).map_err(translate_domain_error)?;

    let outcome: LeaveDecisionOutcome =
        autosub::decide_leave(persistence, leave_id, decision, request.admin_comment.clone())
            .map_err(translate_core_error)?;

    let assignment: Option<AssignmentResponse> =
        match (&outcome.assignment, &outcome.assignment_error) {
            (Some(run), _) => Some(AssignmentResponse::from(run)),
            (
                None,
                Some(
                    err @ CoreError::Interrupted {
                        partial, untried, ..
                    },
                ),
            ) => Some(AssignmentResponse::new(
                partial,
                untried,
                Some(err.to_string()),
            )),
            (None, _) => None,
        };

    let message: String = match &assignment {
        Some(run) => format!(
            "Leave {leave_id} {}: {} assigned, {} uncovered",
            outcome.leave.status,
            run.assignments.len(),
            run.uncovered.len()
        ),
        None => format!("Leave {leave_id} {}", outcome.leave.status),
    };

    Ok(WithNotices {
        response: DecideLeaveResponse {
            leave: LeaveResponse::from(&outcome.leave),
            assignment,
            assignment_error: outcome.assignment_error.as_ref().map(ToString::to_string),
            message,
        },
        notices: outcome.notices,
    })
}

/// Assigns substitutes for a teacher's absence without a leave request.
///
/// A store failure part way through is not an error here: the response
/// carries the completed part, the untried occurrences and the failure,
/// and the notices for the completed part are returned.
///
/// # Errors
///
/// Returns an error if:
/// - a date does not parse or the range is reversed
/// - the school does not exist, or the teacher is not on its staff
/// - the store fails before anything is written
pub fn assign_substitutes(
    persistence: &mut Persistence,
    request: &AssignSubstitutesRequest,
) -> Result<WithNotices<AssignmentResponse>, ApiError> {
    let from: Date = parse_request_date(&request.from_date)?;
    let to: Date = parse_request_date(&request.to_date)?;
    let school: School = persistence
        .get_school(request.school_id)?
        .ok_or_else(|| school_not_found(request.school_id))?;

    info!(
        school_id = school.school_id,
        teacher_id = request.teacher_id,
        from = %from,
        to = %to,
        "Handling assign_substitutes request"
    );

    match autosub::assign_substitutes(persistence, school.school_id, request.teacher_id, from, to)
    {
        Ok(outcome) => Ok(WithNotices {
            notices: autosub::assignment_notices(&outcome, &school.timetable),
            response: AssignmentResponse::from(&outcome),
        }),
        Err(CoreError::Interrupted {
            partial,
            untried,
            source,
        }) => {
            warn!(
                assigned = partial.assignments.len(),
                untried = untried.len(),
                error = %source,
                "Assignment run interrupted"
            );
            Ok(WithNotices {
                notices: autosub::assignment_notices(&partial, &school.timetable),
                response: AssignmentResponse::new(&partial, &untried, Some(source.to_string())),
            })
        }
        Err(err) => Err(translate_core_error(err)),
    }
}

/// Runs conflict detection for one school.
///
/// # Errors
///
/// Returns an error if the school does not exist or the store fails.
pub fn detect_conflicts(
    persistence: &mut Persistence,
    school_id: i64,
) -> Result<ConflictReportResponse, ApiError> {
    let report: ConflictReport =
        autosub::detect_conflicts(persistence, school_id).map_err(translate_core_error)?;
    Ok(ConflictReportResponse::from(&report))
}

/// Runs conflict detection for every school and builds one summary
/// notice per admin.
///
/// # Errors
///
/// Returns an error only if the list of schools cannot be read. Failing
/// schools are reported in `failures`.
pub fn run_conflict_scan(
    persistence: &mut Persistence,
) -> Result<WithNotices<ScanResponse>, ApiError> {
    let outcome: ScanOutcome = autosub::scan_all_schools(persistence).map_err(translate_core_error)?;

    Ok(WithNotices {
        response: ScanResponse {
            reports: outcome
                .reports
                .iter()
                .map(ConflictReportResponse::from)
                .collect(),
            failures: outcome
                .failures
                .iter()
                .map(|failure| ScanFailureInfo {
                    school_id: failure.school_id,
                    message: failure.error.to_string(),
                })
                .collect(),
        },
        notices: outcome.notices,
    })
}

fn history_response(
    records: &[SubstitutionRecord],
) -> Result<SubstitutionHistoryResponse, ApiError> {
    let history: Vec<SubstitutionRecordInfo> = records
        .iter()
        .map(SubstitutionRecordInfo::try_from)
        .collect::<Result<_, _>>()
        .map_err(|e| ApiError::Internal {
            message: format!("cannot format substitution timestamp: {e}"),
        })?;
    Ok(SubstitutionHistoryResponse {
        count: history.len(),
        history,
    })
}

/// Lists a school's substitutions, newest first.
///
/// # Errors
///
/// Returns an error if:
/// - a date does not parse or `to` is before `from`
/// - the school does not exist, or the substitute filter names someone
///   outside its staff
pub fn list_substitution_history(
    persistence: &mut Persistence,
    request: &SubstitutionHistoryRequest,
) -> Result<SubstitutionHistoryResponse, ApiError> {
    let filter: HistoryFilter = HistoryFilter {
        substitute_teacher_id: request.substitute_teacher_id,
        assigned_from: request.from.as_deref().map(parse_request_date).transpose()?,
        assigned_to: request.to.as_deref().map(parse_request_date).transpose()?,
    };

    let records: Vec<SubstitutionRecord> =
        autosub::substitution_history(persistence, request.school_id, &filter)
            .map_err(translate_core_error)?;
    history_response(&records)
}

/// Lists the classes a teacher has covered, newest first.
///
/// # Errors
///
/// Returns an error if the teacher does not exist.
pub fn list_teacher_substitutions(
    persistence: &mut Persistence,
    teacher_id: i64,
) -> Result<SubstitutionHistoryResponse, ApiError> {
    let teacher: Teacher = persistence
        .get_teacher(teacher_id)?
        .ok_or_else(|| teacher_not_found(teacher_id))?;
    let filter: HistoryFilter = HistoryFilter {
        substitute_teacher_id: Some(teacher.teacher_id),
        ..HistoryFilter::default()
    };

    let records: Vec<SubstitutionRecord> =
        autosub::substitution_history(persistence, teacher.school_id, &filter)
            .map_err(translate_core_error)?;
    history_response(&records)
}
