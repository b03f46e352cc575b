// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave requests and their lifecycle.
//!
//! A leave request is created `pending` by a teacher and moves to exactly
//! one terminal state, `approved` or `rejected`, through a single admin
//! decision. Approval is what triggers substitute assignment.

use crate::calendar::LeaveDates;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Lifecycle state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Awaiting an admin decision.
    #[default]
    Pending,
    /// Approved. Substitutes have been assigned.
    Approved,
    /// Rejected.
    Rejected,
}

impl LeaveStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Whether a leave in this state blocks another overlapping request.
    #[must_use]
    pub const fn blocks_overlap(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Parses an admin decision. Only terminal states are decisions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDecision` for anything but `approved` or `rejected`.
    pub fn parse_decision(value: &str) -> Result<Self, DomainError> {
        match value {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidDecision(value.to_string())),
        }
    }
}

impl FromStr for LeaveStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidLeaveStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Longest leave a single request may cover, in days.
pub const MAX_LEAVE_DAYS: i64 = 366;

/// A closed interval of calendar dates, `from <= to`, at most
/// [`MAX_LEAVE_DAYS`] long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaveRange {
    from: Date,
    to: Date,
}

impl LeaveRange {
    /// Creates a validated date range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` if `to` is before `from`, or
    /// `DomainError::LeaveTooLong` if the range spans more than
    /// [`MAX_LEAVE_DAYS`] days.
    pub fn new(from: Date, to: Date) -> Result<Self, DomainError> {
        if to < from {
            return Err(DomainError::InvalidRange { from, to });
        }
        let days: i64 = (to - from).whole_days() + 1;
        if days > MAX_LEAVE_DAYS {
            return Err(DomainError::LeaveTooLong {
                days,
                max_days: MAX_LEAVE_DAYS,
            });
        }
        Ok(Self { from, to })
    }

    /// First day of leave.
    #[must_use]
    pub const fn from(&self) -> Date {
        self.from
    }

    /// Last day of leave (inclusive).
    #[must_use]
    pub const fn to(&self) -> Date {
        self.to
    }

    /// Every date in the range, ascending, one per day.
    #[must_use]
    pub const fn dates(&self) -> LeaveDates {
        LeaveDates::new(self.from, self.to)
    }

    /// Number of days in the range.
    #[must_use]
    pub fn len_days(&self) -> i64 {
        (self.to - self.from).whole_days() + 1
    }

    /// Whether `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.from <= date && date <= self.to
    }

    /// Whether the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.from <= other.to && other.from <= self.to
    }
}

/// A teacher's request to be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The canonical identifier.
    pub leave_id: i64,
    /// The absent teacher.
    pub teacher_id: i64,
    /// The teacher's school.
    pub school_id: i64,
    /// Requested dates.
    pub range: LeaveRange,
    /// Free-text reason supplied by the teacher.
    pub reason: String,
    /// Lifecycle state.
    pub status: LeaveStatus,
    /// Optional comment from the deciding admin.
    pub admin_comment: Option<String>,
}

impl LeaveRequest {
    /// Applies an admin decision, producing the decided request.
    ///
    /// # Arguments
    ///
    /// * `decision` - `Approved` or `Rejected`
    /// * `admin_comment` - Optional comment; blank comments are dropped
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the request is no longer pending
    /// - `decision` is `Pending`
    pub fn decide(
        &self,
        decision: LeaveStatus,
        admin_comment: Option<String>,
    ) -> Result<Self, DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::LeaveAlreadyDecided {
                leave_id: self.leave_id,
                status: self.status,
            });
        }
        if !decision.is_terminal() {
            return Err(DomainError::InvalidDecision(decision.to_string()));
        }

        let mut decided: Self = self.clone();
        decided.status = decision;
        decided.admin_comment = admin_comment.filter(|c| !c.trim().is_empty());
        Ok(decided)
    }
}

/// Input for submitting a leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaveRequest {
    /// The absent teacher.
    pub teacher_id: i64,
    /// The teacher's school.
    pub school_id: i64,
    /// Requested dates.
    pub range: LeaveRange,
    /// Free-text reason.
    pub reason: String,
}
