// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notices emitted by the engines and the leave workflow.
//!
//! The core never delivers anything. It returns notices to the caller,
//! which hands them to a [`NoticeSink`]. A failing sink cannot affect the
//! records already written.

use crate::assign::AssignmentOutcome;
use crate::conflicts::ConflictReport;
use autosub_domain::{
    LeaveRequest, LeaveStatus, PeriodIndex, School, Teacher, TimetableConfig, Weekday, format_date,
};
use serde::Serialize;

/// A message for a person or for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// A leave request was approved or rejected. Sent to the requesting teacher.
    LeaveDecided {
        /// The decided leave request.
        leave_id: i64,
        /// The requesting teacher.
        teacher_id: i64,
        /// Where to send the notice.
        recipient_email: String,
        /// Who the notice is addressed to.
        recipient_name: String,
        /// The decision.
        status: LeaveStatus,
        /// First day of leave, `YYYY-MM-DD`.
        from_date: String,
        /// Last day of leave, `YYYY-MM-DD`.
        to_date: String,
        /// The admin's comment, if any.
        admin_comment: Option<String>,
    },
    /// A teacher was assigned to cover a class. Sent to the substitute.
    SubstituteAssigned {
        /// The stored substitution.
        substitution_id: i64,
        /// The school.
        school_id: i64,
        /// The covering teacher.
        substitute_teacher_id: i64,
        /// Where to send the notice.
        recipient_email: String,
        /// Who the notice is addressed to.
        recipient_name: String,
        /// The date to cover, `YYYY-MM-DD`.
        date: String,
        /// Weekday of the class.
        weekday: Weekday,
        /// Period of the class (0-based).
        period_index: PeriodIndex,
        /// Subject taught.
        subject: String,
        /// Class taught.
        class_section: String,
        /// Wall-clock time of the period, e.g. `08:45-09:30`.
        period_window: Option<String>,
    },
    /// No substitute could be found for a class meeting.
    CoverageGap {
        /// The school.
        school_id: i64,
        /// The absent teacher.
        absent_teacher_id: i64,
        /// The uncovered slot.
        schedule_slot_id: i64,
        /// The date left uncovered, `YYYY-MM-DD`.
        date: String,
        /// Weekday of the class.
        weekday: Weekday,
        /// Period of the class (0-based).
        period_index: PeriodIndex,
        /// Subject taught.
        subject: String,
        /// Class taught.
        class_section: String,
    },
    /// Result of the periodic conflict scan. Sent to each admin of a school.
    ConflictSummary {
        /// The scanned school.
        school_id: i64,
        /// The school's name.
        school_name: String,
        /// The receiving admin.
        admin_id: i64,
        /// Where to send the notice.
        recipient_email: String,
        /// Who the notice is addressed to.
        recipient_name: String,
        /// Number of overload warnings.
        overload_count: usize,
        /// Number of uncovered slots.
        uncovered_count: usize,
    },
}

impl Notice {
    /// Builds the notice for a decided leave.
    #[must_use]
    pub fn leave_decided(leave: &LeaveRequest, teacher: &Teacher) -> Self {
        Self::LeaveDecided {
            leave_id: leave.leave_id,
            teacher_id: teacher.teacher_id,
            recipient_email: teacher.email.clone(),
            recipient_name: teacher.name.clone(),
            status: leave.status,
            from_date: format_date(leave.range.from()),
            to_date: format_date(leave.range.to()),
            admin_comment: leave.admin_comment.clone(),
        }
    }

    /// Builds the summary one admin receives for a school's conflict report.
    #[must_use]
    pub fn conflict_summary(school: &School, admin: &Teacher, report: &ConflictReport) -> Self {
        Self::ConflictSummary {
            school_id: school.school_id,
            school_name: school.name.clone(),
            admin_id: admin.teacher_id,
            recipient_email: admin.email.clone(),
            recipient_name: admin.name.clone(),
            overload_count: report.overload_warnings.len(),
            uncovered_count: report.uncovered_slots.len(),
        }
    }

    /// The subject line a delivery channel should use.
    #[must_use]
    pub fn subject_line(&self) -> String {
        match self {
            Self::LeaveDecided { status, .. } => format!("Your leave has been {status}"),
            Self::SubstituteAssigned {
                weekday,
                period_index,
                ..
            } => format!("You've been assigned as substitute on {weekday}, {period_index}"),
            Self::CoverageGap {
                date,
                period_index,
                class_section,
                ..
            } => format!("No substitute found for {class_section} on {date}, {period_index}"),
            Self::ConflictSummary {
                school_name,
                overload_count,
                uncovered_count,
                ..
            } => format!(
                "Conflict summary for {school_name}: {overload_count} overloaded, {uncovered_count} uncovered"
            ),
        }
    }

    /// The address the notice is meant for. Coverage gaps have none and
    /// are only shown on the live feed.
    #[must_use]
    pub fn recipient_email(&self) -> Option<&str> {
        match self {
            Self::LeaveDecided {
                recipient_email, ..
            }
            | Self::SubstituteAssigned {
                recipient_email, ..
            }
            | Self::ConflictSummary {
                recipient_email, ..
            } => Some(recipient_email),
            Self::CoverageGap { .. } => None,
        }
    }
}

/// Builds one notice per assignment and one per uncovered occurrence.
#[must_use]
pub fn assignment_notices(outcome: &AssignmentOutcome, timetable: &TimetableConfig) -> Vec<Notice> {
    let assigned = outcome.assignments.iter().map(|a| Notice::SubstituteAssigned {
        substitution_id: a.substitution.substitution_id,
        school_id: outcome.school_id,
        substitute_teacher_id: a.substitute.teacher_id,
        recipient_email: a.substitute.email.clone(),
        recipient_name: a.substitute.name.clone(),
        date: format_date(a.date),
        weekday: a.slot.weekday,
        period_index: a.slot.period_index,
        subject: a.slot.subject.clone(),
        class_section: a.slot.class_section.clone(),
        period_window: timetable
            .period_window(a.slot.period_index)
            .map(|w| w.to_string()),
    });
    let gaps = outcome.uncovered.iter().map(|u| Notice::CoverageGap {
        school_id: outcome.school_id,
        absent_teacher_id: outcome.absent_teacher_id,
        schedule_slot_id: u.slot.slot_id,
        date: format_date(u.date),
        weekday: u.slot.weekday,
        period_index: u.slot.period_index,
        subject: u.slot.subject.clone(),
        class_section: u.slot.class_section.clone(),
    });
    assigned.chain(gaps).collect()
}

/// Delivery seam for notices.
pub trait NoticeSink {
    /// Delivers one notice. Delivery failures are the sink's concern.
    fn publish(&self, notice: &Notice);

    /// Delivers notices in order.
    fn publish_all(&self, notices: &[Notice]) {
        for notice in notices {
            self.publish(notice);
        }
    }
}
