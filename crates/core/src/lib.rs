// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

//! Substitute assignment and conflict detection.
//!
//! The engines read and write through the [`TimetableStore`] and
//! [`LeaveStore`] ports and never deliver notifications themselves; they
//! return [`Notice`] values for a [`NoticeSink`] to handle.

mod assign;
mod conflicts;
mod error;
mod history;
mod memory;
mod notice;
mod resolver;
mod scan;
mod store;
mod workflow;

#[cfg(test)]
mod tests;

pub use assign::{
    Assignment, AssignmentOutcome, SUBSTITUTION_REASON, SlotOccurrence, affected_occurrences,
    assign_substitutes,
};
pub use conflicts::{
    ConflictReport, OVERLOAD_THRESHOLD, OverloadWarning, UncoveredSlot, detect_conflicts,
};
pub use error::{CoreError, StoreError};
pub use history::{HistoryFilter, SubstitutionRecord, substitution_history};
pub use memory::InMemoryStore;
pub use notice::{Notice, NoticeSink, assignment_notices};
pub use resolver::{CandidateResolver, find_substitute};
pub use scan::{ScanOutcome, SchoolScanFailure, scan_all_schools};
pub use store::{LeaveStore, TimetableStore};
pub use workflow::{LeaveDecisionOutcome, apply_for_leave, decide_leave};
