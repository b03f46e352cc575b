// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross the boundary as `YYYY-MM-DD` strings, weekdays as numbers
//! (`0` = Sunday) with a display name alongside, periods as 0-based
//! indices.

use autosub::{
    Assignment, AssignmentOutcome, ConflictReport, Notice, OverloadWarning, SlotOccurrence,
    SubstitutionRecord, UncoveredSlot,
};
use autosub_domain::{LeaveRequest, ScheduleSlot, School, Teacher, format_date};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

/// A handler result together with the notices it produced.
///
/// Callers publish `notices` after the response is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithNotices<T> {
    /// The response body.
    pub response: T,
    /// Notices to hand to a sink.
    pub notices: Vec<Notice>,
}

/// API request to create a school.
///
/// Omitted timetable fields take the defaults (8 periods of 45 minutes
/// from 08:00).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSchoolRequest {
    /// Display name.
    pub name: String,
    /// Number of periods per day.
    #[serde(default)]
    pub period_count: Option<u8>,
    /// Length of a period in minutes.
    #[serde(default)]
    pub period_duration_minutes: Option<u16>,
    /// Hour the first period starts.
    #[serde(default)]
    pub start_hour: Option<u8>,
    /// Minute the first period starts.
    #[serde(default)]
    pub start_minute: Option<u8>,
}

/// A school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolResponse {
    /// The canonical identifier.
    pub school_id: i64,
    /// Display name.
    pub name: String,
    /// Number of periods per day.
    pub period_count: u8,
    /// Length of a period in minutes.
    pub period_duration_minutes: u16,
    /// Hour the first period starts.
    pub start_hour: u8,
    /// Minute the first period starts.
    pub start_minute: u8,
}

impl From<&School> for SchoolResponse {
    fn from(school: &School) -> Self {
        Self {
            school_id: school.school_id,
            name: school.name.clone(),
            period_count: school.timetable.period_count(),
            period_duration_minutes: school.timetable.period_duration_minutes(),
            start_hour: school.timetable.start_hour(),
            start_minute: school.timetable.start_minute(),
        }
    }
}

/// API request to create a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTeacherRequest {
    /// The school the teacher joins.
    pub school_id: i64,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// `teacher` (default) or `admin`.
    #[serde(default)]
    pub role: Option<String>,
}

/// API request to activate or deactivate a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTeacherActiveRequest {
    /// The new active flag.
    pub is_active: bool,
}

/// A staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherResponse {
    /// The canonical identifier.
    pub teacher_id: i64,
    /// The teacher's school.
    pub school_id: i64,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// `teacher` or `admin`.
    pub role: String,
    /// Whether the teacher can take substitutions.
    pub is_active: bool,
}

impl From<&Teacher> for TeacherResponse {
    fn from(teacher: &Teacher) -> Self {
        Self {
            teacher_id: teacher.teacher_id,
            school_id: teacher.school_id,
            name: teacher.name.clone(),
            email: teacher.email.clone(),
            role: teacher.role.to_string(),
            is_active: teacher.is_active,
        }
    }
}

/// API request to create a schedule slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateScheduleSlotRequest {
    /// The school.
    pub school_id: i64,
    /// The teacher who teaches the slot.
    pub teacher_id: i64,
    /// Weekday number, `0` = Sunday.
    pub weekday: u8,
    /// 0-based period index.
    pub period_index: u8,
    /// Subject taught.
    pub subject: String,
    /// Class and section taught.
    pub class_section: String,
}

/// A schedule slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlotResponse {
    /// The canonical identifier.
    pub slot_id: i64,
    /// The school.
    pub school_id: i64,
    /// The teacher who teaches the slot.
    pub teacher_id: i64,
    /// Weekday number, `0` = Sunday.
    pub weekday: u8,
    /// Weekday name.
    pub weekday_name: String,
    /// 0-based period index.
    pub period_index: u8,
    /// Subject taught.
    pub subject: String,
    /// Class and section taught.
    pub class_section: String,
}

impl From<&ScheduleSlot> for ScheduleSlotResponse {
    fn from(slot: &ScheduleSlot) -> Self {
        Self {
            slot_id: slot.slot_id,
            school_id: slot.school_id,
            teacher_id: slot.teacher_id,
            weekday: slot.weekday.number(),
            weekday_name: slot.weekday.name().to_string(),
            period_index: slot.period_index.value(),
            subject: slot.subject.clone(),
            class_section: slot.class_section.clone(),
        }
    }
}

/// API request to apply for leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyLeaveRequest {
    /// The absent teacher.
    pub teacher_id: i64,
    /// The teacher's school.
    pub school_id: i64,
    /// First day of leave (`YYYY-MM-DD`).
    pub from_date: String,
    /// Last day of leave, inclusive (`YYYY-MM-DD`).
    pub to_date: String,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

/// API request to decide a pending leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideLeaveRequest {
    /// `approved` or `rejected`.
    pub decision: String,
    /// Optional comment for the teacher.
    #[serde(default)]
    pub admin_comment: Option<String>,
}

/// A leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveResponse {
    /// The canonical identifier.
    pub leave_id: i64,
    /// The absent teacher.
    pub teacher_id: i64,
    /// The teacher's school.
    pub school_id: i64,
    /// First day of leave.
    pub from_date: String,
    /// Last day of leave, inclusive.
    pub to_date: String,
    /// Free-text reason.
    pub reason: String,
    /// `pending`, `approved` or `rejected`.
    pub status: String,
    /// The deciding admin's comment.
    pub admin_comment: Option<String>,
}

impl From<&LeaveRequest> for LeaveResponse {
    fn from(leave: &LeaveRequest) -> Self {
        Self {
            leave_id: leave.leave_id,
            teacher_id: leave.teacher_id,
            school_id: leave.school_id,
            from_date: format_date(leave.range.from()),
            to_date: format_date(leave.range.to()),
            reason: leave.reason.clone(),
            status: leave.status.to_string(),
            admin_comment: leave.admin_comment.clone(),
        }
    }
}

/// Result of deciding a leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideLeaveResponse {
    /// The leave as stored after the decision.
    pub leave: LeaveResponse,
    /// The assignment run started by an approval.
    pub assignment: Option<AssignmentResponse>,
    /// Why the assignment run failed. The decision stands regardless.
    pub assignment_error: Option<String>,
    /// A success message.
    pub message: String,
}

/// API request to assign substitutes for a teacher's absence directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignSubstitutesRequest {
    /// The school.
    pub school_id: i64,
    /// The absent teacher.
    pub teacher_id: i64,
    /// First day of absence (`YYYY-MM-DD`).
    pub from_date: String,
    /// Last day of absence, inclusive (`YYYY-MM-DD`).
    pub to_date: String,
}

/// One dated occurrence of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceInfo {
    /// The calendar date.
    pub date: String,
    /// The slot.
    pub schedule_slot_id: i64,
    /// Weekday number.
    pub weekday: u8,
    /// 0-based period index.
    pub period_index: u8,
    /// Subject taught.
    pub subject: String,
    /// Class and section taught.
    pub class_section: String,
}

impl From<&SlotOccurrence> for OccurrenceInfo {
    fn from(occurrence: &SlotOccurrence) -> Self {
        Self {
            date: format_date(occurrence.date),
            schedule_slot_id: occurrence.slot.slot_id,
            weekday: occurrence.slot.weekday.number(),
            period_index: occurrence.slot.period_index.value(),
            subject: occurrence.slot.subject.clone(),
            class_section: occurrence.slot.class_section.clone(),
        }
    }
}

/// A covered occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInfo {
    /// The stored substitution.
    pub substitution_id: i64,
    /// The covered occurrence.
    pub occurrence: OccurrenceInfo,
    /// The covering teacher.
    pub substitute_teacher_id: i64,
    /// The covering teacher's name.
    pub substitute_name: String,
}

impl From<&Assignment> for AssignmentInfo {
    fn from(assignment: &Assignment) -> Self {
        Self {
            substitution_id: assignment.substitution.substitution_id,
            occurrence: OccurrenceInfo {
                date: format_date(assignment.date),
                schedule_slot_id: assignment.slot.slot_id,
                weekday: assignment.slot.weekday.number(),
                period_index: assignment.slot.period_index.value(),
                subject: assignment.slot.subject.clone(),
                class_section: assignment.slot.class_section.clone(),
            },
            substitute_teacher_id: assignment.substitute.teacher_id,
            substitute_name: assignment.substitute.name.clone(),
        }
    }
}

/// Result of an assignment run.
///
/// `interrupted` is set when the store failed part way. `assignments` and
/// `uncovered` then hold what completed, and `untried` what did not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    /// The school.
    pub school_id: i64,
    /// The absent teacher.
    pub absent_teacher_id: i64,
    /// Covered occurrences in processing order.
    pub assignments: Vec<AssignmentInfo>,
    /// Occurrences nobody could take, in processing order.
    pub uncovered: Vec<OccurrenceInfo>,
    /// Occurrences never attempted because the run stopped.
    pub untried: Vec<OccurrenceInfo>,
    /// The failure that stopped the run.
    pub interrupted: Option<String>,
}

impl AssignmentResponse {
    /// Builds the response for a run that may have been interrupted.
    #[must_use]
    pub fn new(
        outcome: &AssignmentOutcome,
        untried: &[SlotOccurrence],
        interrupted: Option<String>,
    ) -> Self {
        Self {
            school_id: outcome.school_id,
            absent_teacher_id: outcome.absent_teacher_id,
            assignments: outcome.assignments.iter().map(AssignmentInfo::from).collect(),
            uncovered: outcome.uncovered.iter().map(OccurrenceInfo::from).collect(),
            untried: untried.iter().map(OccurrenceInfo::from).collect(),
            interrupted,
        }
    }
}

impl From<&AssignmentOutcome> for AssignmentResponse {
    fn from(outcome: &AssignmentOutcome) -> Self {
        Self::new(outcome, &[], None)
    }
}

/// A teacher with too many lectures on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverloadWarningInfo {
    /// The teacher.
    pub teacher_id: i64,
    /// The teacher's name.
    pub teacher_name: String,
    /// Weekday number.
    pub weekday: u8,
    /// Weekday name.
    pub weekday_name: String,
    /// Slots the teacher has that day.
    pub lecture_count: usize,
}

impl From<&OverloadWarning> for OverloadWarningInfo {
    fn from(warning: &OverloadWarning) -> Self {
        Self {
            teacher_id: warning.teacher_id,
            teacher_name: warning.teacher_name.clone(),
            weekday: warning.weekday.number(),
            weekday_name: warning.weekday.name().to_string(),
            lecture_count: warning.lecture_count,
        }
    }
}

/// A slot of an active teacher with no substitution on record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncoveredSlotInfo {
    /// The slot.
    pub schedule_slot_id: i64,
    /// The slot's teacher.
    pub teacher_id: i64,
    /// Weekday number.
    pub weekday: u8,
    /// 0-based period index.
    pub period_index: u8,
    /// Subject taught.
    pub subject: String,
    /// Class and section taught.
    pub class_section: String,
}

impl From<&UncoveredSlot> for UncoveredSlotInfo {
    fn from(slot: &UncoveredSlot) -> Self {
        Self {
            schedule_slot_id: slot.schedule_slot_id,
            teacher_id: slot.teacher_id,
            weekday: slot.weekday.number(),
            period_index: slot.period_index.value(),
            subject: slot.subject.clone(),
            class_section: slot.class_section.clone(),
        }
    }
}

/// Conflict report for one school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReportResponse {
    /// The school.
    pub school_id: i64,
    /// Overloaded teacher-days, by teacher then weekday.
    pub overload_warnings: Vec<OverloadWarningInfo>,
    /// Slots without a substitution, by slot id.
    pub uncovered_slots: Vec<UncoveredSlotInfo>,
}

impl From<&ConflictReport> for ConflictReportResponse {
    fn from(report: &ConflictReport) -> Self {
        Self {
            school_id: report.school_id,
            overload_warnings: report
                .overload_warnings
                .iter()
                .map(OverloadWarningInfo::from)
                .collect(),
            uncovered_slots: report
                .uncovered_slots
                .iter()
                .map(UncoveredSlotInfo::from)
                .collect(),
        }
    }
}

/// A school the conflict scan could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailureInfo {
    /// The school.
    pub school_id: i64,
    /// What went wrong.
    pub message: String,
}

/// Result of scanning every school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    /// Reports for the schools that were scanned.
    pub reports: Vec<ConflictReportResponse>,
    /// Schools that failed.
    pub failures: Vec<ScanFailureInfo>,
}

/// Query for a school's substitution history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionHistoryRequest {
    /// The school.
    pub school_id: i64,
    /// Only substitutions covered by this teacher.
    #[serde(default)]
    pub substitute_teacher_id: Option<i64>,
    /// Only substitutions recorded on or after this day (`YYYY-MM-DD`, UTC).
    #[serde(default)]
    pub from: Option<String>,
    /// Only substitutions recorded on or before this day (`YYYY-MM-DD`, UTC).
    #[serde(default)]
    pub to: Option<String>,
}

/// One stored substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRecordInfo {
    /// The stored substitution.
    pub substitution_id: i64,
    /// The absent teacher.
    pub original_teacher_id: i64,
    /// The absent teacher's name.
    pub original_teacher_name: String,
    /// The covering teacher.
    pub substitute_teacher_id: i64,
    /// The covering teacher's name.
    pub substitute_teacher_name: String,
    /// The covered slot.
    pub schedule_slot_id: i64,
    /// Weekday number.
    pub weekday: u8,
    /// Weekday name.
    pub weekday_name: String,
    /// 0-based period index.
    pub period_index: u8,
    /// Subject taught.
    pub subject: String,
    /// Class and section taught.
    pub class_section: String,
    /// Why the substitution exists.
    pub reason: String,
    /// When it was recorded (RFC 3339).
    pub assigned_at: String,
}

impl TryFrom<&SubstitutionRecord> for SubstitutionRecordInfo {
    type Error = time::error::Format;

    fn try_from(record: &SubstitutionRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            substitution_id: record.substitution.substitution_id,
            original_teacher_id: record.original_teacher.teacher_id,
            original_teacher_name: record.original_teacher.name.clone(),
            substitute_teacher_id: record.substitute.teacher_id,
            substitute_teacher_name: record.substitute.name.clone(),
            schedule_slot_id: record.slot.slot_id,
            weekday: record.slot.weekday.number(),
            weekday_name: record.slot.weekday.name().to_string(),
            period_index: record.slot.period_index.value(),
            subject: record.slot.subject.clone(),
            class_section: record.slot.class_section.clone(),
            reason: record.substitution.reason.clone(),
            assigned_at: record.substitution.assigned_at.format(&Rfc3339)?,
        })
    }
}

/// Substitution history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionHistoryResponse {
    /// Number of entries in `history`.
    pub count: usize,
    /// The substitutions.
    pub history: Vec<SubstitutionRecordInfo>,
}
