// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, PeriodIndex, TimetableConfig, validate_email, validate_slot_within_timetable,
    validate_subject,
};

#[test]
fn test_valid_emails() {
    assert!(validate_email("teacher@school.test").is_ok());
    assert!(validate_email("first.last@sub.school.test").is_ok());
}

#[test]
fn test_invalid_emails() {
    for email in ["", "no-at-sign", "@school.test", "a@b", "a@b@c.test", "a@.test"] {
        assert!(
            matches!(validate_email(email), Err(DomainError::InvalidEmail(_))),
            "expected {email:?} to be rejected"
        );
    }
}

#[test]
fn test_subject_must_not_be_blank() {
    assert!(validate_subject("Physics").is_ok());
    assert!(matches!(
        validate_subject("   "),
        Err(DomainError::InvalidSubject(_))
    ));
}

#[test]
fn test_slot_period_must_fit_timetable() {
    let config: TimetableConfig = TimetableConfig::new(6, 45, 8, 0).unwrap();
    assert!(validate_slot_within_timetable(PeriodIndex::new(5), &config).is_ok());
    assert_eq!(
        validate_slot_within_timetable(PeriodIndex::new(6), &config),
        Err(DomainError::InvalidPeriodIndex {
            index: 6,
            period_count: 6,
        })
    );
}
