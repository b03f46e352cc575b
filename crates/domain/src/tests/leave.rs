// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, LeaveRange, LeaveRequest, LeaveStatus, MAX_LEAVE_DAYS};
use std::str::FromStr;
use time::macros::date;

fn create_pending_leave() -> LeaveRequest {
    LeaveRequest {
        leave_id: 1,
        teacher_id: 10,
        school_id: 100,
        range: LeaveRange::new(date!(2026 - 03 - 02), date!(2026 - 03 - 03)).unwrap(),
        reason: String::from("Medical"),
        status: LeaveStatus::Pending,
        admin_comment: None,
    }
}

#[test]
fn test_range_rejects_end_before_start() {
    let result = LeaveRange::new(date!(2026 - 03 - 03), date!(2026 - 03 - 02));
    assert_eq!(
        result,
        Err(DomainError::InvalidRange {
            from: date!(2026 - 03 - 03),
            to: date!(2026 - 03 - 02),
        })
    );
}

#[test]
fn test_range_accepts_a_full_leap_year() {
    let range: LeaveRange = LeaveRange::new(date!(2028 - 01 - 01), date!(2028 - 12 - 31)).unwrap();
    assert_eq!(range.len_days(), MAX_LEAVE_DAYS);
}

#[test]
fn test_range_rejects_more_than_max_days() {
    let result = LeaveRange::new(date!(2026 - 03 - 02), date!(2027 - 03 - 03));
    assert_eq!(
        result,
        Err(DomainError::LeaveTooLong {
            days: 367,
            max_days: MAX_LEAVE_DAYS,
        })
    );

    let result = LeaveRange::new(date!(0 - 01 - 01), date!(9999 - 12 - 31));
    assert!(matches!(result, Err(DomainError::LeaveTooLong { .. })));
}

#[test]
fn test_range_overlap() {
    let first: LeaveRange = LeaveRange::new(date!(2026 - 03 - 02), date!(2026 - 03 - 05)).unwrap();
    let touching: LeaveRange =
        LeaveRange::new(date!(2026 - 03 - 05), date!(2026 - 03 - 06)).unwrap();
    let inside: LeaveRange = LeaveRange::new(date!(2026 - 03 - 03), date!(2026 - 03 - 03)).unwrap();
    let after: LeaveRange = LeaveRange::new(date!(2026 - 03 - 06), date!(2026 - 03 - 09)).unwrap();

    assert!(first.overlaps(&touching));
    assert!(first.overlaps(&inside));
    assert!(inside.overlaps(&first));
    assert!(!first.overlaps(&after));
    assert!(first.contains(date!(2026 - 03 - 05)));
    assert!(!first.contains(date!(2026 - 03 - 06)));
}

#[test]
fn test_leave_status_round_trips_through_strings() {
    for status in [
        LeaveStatus::Pending,
        LeaveStatus::Approved,
        LeaveStatus::Rejected,
    ] {
        assert_eq!(LeaveStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert!(matches!(
        LeaveStatus::from_str("cancelled"),
        Err(DomainError::InvalidLeaveStatus(_))
    ));
}

#[test]
fn test_parse_decision_only_accepts_terminal_states() {
    assert_eq!(
        LeaveStatus::parse_decision("approved").unwrap(),
        LeaveStatus::Approved
    );
    assert_eq!(
        LeaveStatus::parse_decision("rejected").unwrap(),
        LeaveStatus::Rejected
    );
    assert_eq!(
        LeaveStatus::parse_decision("pending"),
        Err(DomainError::InvalidDecision(String::from("pending")))
    );
}

#[test]
fn test_decide_approves_pending_leave() {
    let leave: LeaveRequest = create_pending_leave();
    let decided: LeaveRequest = leave
        .decide(LeaveStatus::Approved, Some(String::from("Get well")))
        .unwrap();

    assert_eq!(decided.status, LeaveStatus::Approved);
    assert_eq!(decided.admin_comment.as_deref(), Some("Get well"));
    assert_eq!(decided.range, leave.range);
}

#[test]
fn test_decide_drops_blank_comment() {
    let decided: LeaveRequest = create_pending_leave()
        .decide(LeaveStatus::Rejected, Some(String::from("   ")))
        .unwrap();
    assert_eq!(decided.admin_comment, None);
}

#[test]
fn test_decide_refuses_second_decision() {
    let decided: LeaveRequest = create_pending_leave()
        .decide(LeaveStatus::Approved, None)
        .unwrap();
    let result = decided.decide(LeaveStatus::Rejected, None);

    assert_eq!(
        result,
        Err(DomainError::LeaveAlreadyDecided {
            leave_id: 1,
            status: LeaveStatus::Approved,
        })
    );
}

#[test]
fn test_decide_refuses_pending_as_decision() {
    let result = create_pending_leave().decide(LeaveStatus::Pending, None);
    assert!(matches!(result, Err(DomainError::InvalidDecision(_))));
}
