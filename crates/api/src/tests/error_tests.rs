// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use autosub::{AssignmentOutcome, CoreError, StoreError};
use autosub_domain::{DomainError, LeaveStatus};
use autosub_persistence::PersistenceError;
use time::macros::date;

use crate::{ApiError, translate_core_error, translate_domain_error};

#[test]
fn test_validation_errors_name_their_field() {
    let err: ApiError = translate_domain_error(DomainError::InvalidRange {
        from: date!(2026 - 03 - 05),
        to: date!(2026 - 03 - 02),
    });
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "to_date"));

    let err: ApiError = translate_domain_error(DomainError::InvalidWeekday(9));
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "weekday"));
}

#[test]
fn test_rule_violations_are_not_input_errors() {
    let err: ApiError = translate_domain_error(DomainError::LeaveAlreadyDecided {
        leave_id: 4,
        status: LeaveStatus::Approved,
    });
    assert!(matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "single_decision"));

    let err: ApiError = translate_domain_error(DomainError::OverlappingLeave {
        teacher_id: 1,
        existing_leave_id: 2,
    });
    assert!(
        matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "no_overlapping_leave")
    );
}

#[test]
fn test_core_not_found_names_the_entity() {
    let err: ApiError = translate_core_error(CoreError::NotFound {
        entity: "leave request",
        id: 12,
    });

    assert_eq!(
        err,
        ApiError::ResourceNotFound {
            resource_type: String::from("Leave request"),
            message: String::from("leave request 12 does not exist"),
        }
    );
}

#[test]
fn test_store_failures_are_internal_unless_constraint() {
    let unavailable: ApiError = translate_core_error(CoreError::StoreUnavailable(
        StoreError::Unavailable(String::from("disk full")),
    ));
    let conflict: ApiError = translate_core_error(CoreError::StoreUnavailable(StoreError::Conflict(
        String::from("UNIQUE constraint failed"),
    )));
    let interrupted: ApiError = translate_core_error(CoreError::Interrupted {
        partial: Box::new(AssignmentOutcome::default()),
        untried: Vec::new(),
        source: StoreError::Unavailable(String::from("locked")),
    });

    assert!(matches!(unavailable, ApiError::Internal { .. }));
    assert!(matches!(conflict, ApiError::DomainRuleViolation { .. }));
    assert!(matches!(interrupted, ApiError::Internal { .. }));
}

#[test]
fn test_persistence_errors_translate_by_kind() {
    assert!(matches!(
        ApiError::from(PersistenceError::ConstraintViolation(String::from("dup"))),
        ApiError::DomainRuleViolation { .. }
    ));
    assert!(matches!(
        ApiError::from(PersistenceError::NotFound(String::from("gone"))),
        ApiError::ResourceNotFound { .. }
    ));
    assert!(matches!(
        ApiError::from(PersistenceError::QueryFailed(String::from("syntax"))),
        ApiError::Internal { .. }
    ));
}
