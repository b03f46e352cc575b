// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::assign::{AssignmentOutcome, SlotOccurrence};
use autosub_domain::DomainError;

/// Errors reported by a store implementation at the port boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not complete the operation.
    Unavailable(String),
    /// The write would break a uniqueness or reference constraint.
    Conflict(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "Store unavailable: {msg}"),
            Self::Conflict(msg) => write!(f, "Store conflict: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors raised by the engines and the leave workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A referenced record does not exist. Raised before any write.
    NotFound {
        /// The kind of record (`school`, `teacher`, `leave request`).
        entity: &'static str,
        /// The identifier that was looked up.
        id: i64,
    },
    /// The store failed before any write was made.
    StoreUnavailable(StoreError),
    /// The store failed part way through an assignment run.
    ///
    /// Substitutions recorded before the failure stay in place.
    Interrupted {
        /// Assignments and uncovered slots completed before the failure.
        partial: Box<AssignmentOutcome>,
        /// `(date, slot)` pairs that were not completed, in processing order.
        untried: Vec<SlotOccurrence>,
        /// The store failure that stopped the run.
        source: StoreError,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
            Self::StoreUnavailable(err) => write!(f, "{err}"),
            Self::Interrupted {
                partial,
                untried,
                source,
            } => write!(
                f,
                "Assignment interrupted after {} assigned and {} uncovered, {} not attempted: {source}",
                partial.assignments.len(),
                partial.uncovered.len(),
                untried.len()
            ),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DomainViolation(err) => Some(err),
            Self::StoreUnavailable(err) | Self::Interrupted { source: err, .. } => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err)
    }
}
