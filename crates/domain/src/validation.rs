// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::timetable::TimetableConfig;
use crate::types::PeriodIndex;

/// Validates that a display name is not empty.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty or whitespace.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates the shape of an email address.
///
/// This is a structural check only: one `@` with a non-empty local part
/// and a domain containing a dot.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is missing '@'"
        )));
    };

    if local.is_empty() || domain.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid address"
        )));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' has an invalid domain"
        )));
    }

    Ok(())
}

/// Validates that a subject is not empty.
///
/// # Errors
///
/// Returns `DomainError::InvalidSubject` if the subject is empty.
pub fn validate_subject(subject: &str) -> Result<(), DomainError> {
    if subject.trim().is_empty() {
        return Err(DomainError::InvalidSubject(String::from(
            "Subject cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that a class section is not empty.
///
/// # Errors
///
/// Returns `DomainError::InvalidClassSection` if the class section is empty.
pub fn validate_class_section(class_section: &str) -> Result<(), DomainError> {
    if class_section.trim().is_empty() {
        return Err(DomainError::InvalidClassSection(String::from(
            "Class section cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that a period index exists in a school's day.
///
/// # Errors
///
/// Returns `DomainError::InvalidPeriodIndex` if the period is past the last period.
pub fn validate_slot_within_timetable(
    period: PeriodIndex,
    timetable: &TimetableConfig,
) -> Result<(), DomainError> {
    if !timetable.contains(period) {
        return Err(DomainError::InvalidPeriodIndex {
            index: period.value(),
            period_count: timetable.period_count(),
        });
    }
    Ok(())
}
