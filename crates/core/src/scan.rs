// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batch conflict scan across every school.

use crate::conflicts::{ConflictReport, detect_conflicts};
use crate::error::CoreError;
use crate::notice::Notice;
use crate::store::TimetableStore;
use autosub_domain::{School, Teacher};
use tracing::{error, info};

/// A school whose scan failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolScanFailure {
    /// The school that failed.
    pub school_id: i64,
    /// Why it failed.
    pub error: CoreError,
}

/// Result of scanning all schools.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanOutcome {
    /// One report per successfully scanned school, ascending by school id.
    pub reports: Vec<ConflictReport>,
    /// One `ConflictSummary` per admin per scanned school.
    pub notices: Vec<Notice>,
    /// Schools that could not be scanned.
    pub failures: Vec<SchoolScanFailure>,
}

/// Runs conflict detection for every school, in ascending school id.
///
/// A school that fails is recorded in `failures` and the scan moves on.
///
/// # Errors
///
/// Returns an error only if the list of schools cannot be read.
pub fn scan_all_schools<S>(store: &mut S) -> Result<ScanOutcome, CoreError>
where
    S: TimetableStore + ?Sized,
{
    let mut schools: Vec<School> = store.list_schools()?;
    schools.sort_by_key(|s| s.school_id);
    info!(schools = schools.len(), "Conflict scan starting");

    let mut outcome: ScanOutcome = ScanOutcome::default();
    for school in &schools {
        match scan_school(store, school) {
            Ok((report, notices)) => {
                outcome.reports.push(report);
                outcome.notices.extend(notices);
            }
            Err(err) => {
                error!(school_id = school.school_id, error = %err, "Conflict scan failed");
                outcome.failures.push(SchoolScanFailure {
                    school_id: school.school_id,
                    error: err,
                });
            }
        }
    }

    info!(
        scanned = outcome.reports.len(),
        failed = outcome.failures.len(),
        notices = outcome.notices.len(),
        "Conflict scan complete"
    );
    Ok(outcome)
}

fn scan_school<S>(store: &mut S, school: &School) -> Result<(ConflictReport, Vec<Notice>), CoreError>
where
    S: TimetableStore + ?Sized,
{
    let report: ConflictReport = detect_conflicts(store, school.school_id)?;
    let admins: Vec<Teacher> = store.list_admins(school.school_id)?;
    let notices: Vec<Notice> = admins
        .iter()
        .map(|admin| Notice::conflict_summary(school, admin, &report))
        .collect();
    Ok((report, notices))
}
