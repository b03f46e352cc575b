// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use autosub::{CoreError, StoreError};
use autosub_domain::DomainError;
use autosub_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ConstraintViolation(message) => Self::DomainRuleViolation {
                rule: String::from("store_constraint"),
                message,
            },
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidRange { .. } | DomainError::LeaveTooLong { .. } => {
            invalid("to_date", &err)
        }
        DomainError::InvalidWeekday(_) => invalid("weekday", &err),
        DomainError::InvalidPeriodIndex { .. } => invalid("period_index", &err),
        DomainError::InvalidLeaveStatus(_) => invalid("status", &err),
        DomainError::InvalidDecision(_) => invalid("decision", &err),
        DomainError::InvalidRole(_) => invalid("role", &err),
        DomainError::InvalidName(_) => invalid("name", &err),
        DomainError::InvalidEmail(_) => invalid("email", &err),
        DomainError::InvalidSubject(_) => invalid("subject", &err),
        DomainError::InvalidClassSection(_) => invalid("class_section", &err),
        DomainError::InvalidTimetableConfig { .. } => invalid("timetable", &err),
        DomainError::DateArithmeticOverflow { .. } | DomainError::DateParseError { .. } => {
            invalid("date", &err)
        }
        DomainError::LeaveAlreadyDecided { .. } => ApiError::DomainRuleViolation {
            rule: String::from("single_decision"),
            message: err.to_string(),
        },
        DomainError::OverlappingLeave { .. } => ApiError::DomainRuleViolation {
            rule: String::from("no_overlapping_leave"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotFound { entity, id } => ApiError::ResourceNotFound {
            resource_type: capitalize(entity),
            message: format!("{entity} {id} does not exist"),
        },
        CoreError::StoreUnavailable(StoreError::Conflict(message)) => {
            ApiError::DomainRuleViolation {
                rule: String::from("store_constraint"),
                message,
            }
        }
        other @ (CoreError::StoreUnavailable(StoreError::Unavailable(_))
        | CoreError::Interrupted { .. }) => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
