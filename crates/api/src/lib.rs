// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for AutoSubstitute.
//!
//! Request DTOs come in, validated domain values go to the engines and
//! the persistence adapter, response DTOs go out. Every lower-layer error
//! is translated into an [`ApiError`] before it leaves this crate.

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    apply_leave, assign_substitutes, create_schedule_slot, create_school, create_teacher,
    decide_leave, detect_conflicts, list_substitution_history, list_teacher_substitutions,
    run_conflict_scan, set_teacher_active,
};
pub use request_response::{
    ApplyLeaveRequest, AssignSubstitutesRequest, AssignmentInfo, AssignmentResponse,
    ConflictReportResponse, CreateScheduleSlotRequest, CreateSchoolRequest, CreateTeacherRequest,
    DecideLeaveRequest, DecideLeaveResponse, LeaveResponse, OccurrenceInfo, OverloadWarningInfo,
    ScanFailureInfo, ScanResponse, ScheduleSlotResponse, SchoolResponse, SetTeacherActiveRequest,
    SubstitutionHistoryRequest, SubstitutionHistoryResponse, SubstitutionRecordInfo,
    TeacherResponse, UncoveredSlotInfo, WithNotices,
};
