// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Substitution history.
//!
//! Stored substitutions of a school joined with both teachers and the
//! covered slot, newest first.

use crate::error::{CoreError, StoreError};
use crate::store::TimetableStore;
use autosub_domain::{DomainError, ScheduleSlot, Substitution, Teacher};
use std::collections::HashMap;
use time::{Date, UtcOffset};
use tracing::debug;

/// A stored substitution with the people and the class it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRecord {
    /// The stored substitution.
    pub substitution: Substitution,
    /// The absent teacher.
    pub original_teacher: Teacher,
    /// The covering teacher.
    pub substitute: Teacher,
    /// The covered slot.
    pub slot: ScheduleSlot,
}

/// Narrows a history listing. The default lists everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Only substitutions covered by this teacher.
    pub substitute_teacher_id: Option<i64>,
    /// Only substitutions recorded on or after this UTC day.
    pub assigned_from: Option<Date>,
    /// Only substitutions recorded on or before this UTC day.
    pub assigned_to: Option<Date>,
}

impl HistoryFilter {
    fn accepts(&self, substitution: &Substitution) -> bool {
        let day: Date = substitution.assigned_at.to_offset(UtcOffset::UTC).date();
        self.substitute_teacher_id
            .is_none_or(|id| substitution.substitute_teacher_id == id)
            && self.assigned_from.is_none_or(|from| day >= from)
            && self.assigned_to.is_none_or(|to| day <= to)
    }
}

fn missing(substitution: &Substitution, what: &str, id: i64) -> CoreError {
    CoreError::StoreUnavailable(StoreError::Unavailable(format!(
        "substitution {} references missing {what} {id}",
        substitution.substitution_id
    )))
}

/// Lists a school's substitutions, newest `assigned_at` first. Ties are
/// broken by descending `substitution_id`.
///
/// # Errors
///
/// Returns an error if:
/// - the school does not exist
/// - the filter names a substitute who is not on the school's staff
/// - `assigned_to` is before `assigned_from`
/// - the store fails or a substitution references a missing teacher or slot
pub fn substitution_history<S>(
    store: &mut S,
    school_id: i64,
    filter: &HistoryFilter,
) -> Result<Vec<SubstitutionRecord>, CoreError>
where
    S: TimetableStore + ?Sized,
{
    if let (Some(from), Some(to)) = (filter.assigned_from, filter.assigned_to)
        && to < from
    {
        return Err(DomainError::InvalidRange { from, to }.into());
    }
    if store.get_school(school_id)?.is_none() {
        return Err(CoreError::NotFound {
            entity: "school",
            id: school_id,
        });
    }

    let staff: HashMap<i64, Teacher> = store
        .list_teachers(school_id)?
        .into_iter()
        .map(|t| (t.teacher_id, t))
        .collect();
    if let Some(substitute_id) = filter.substitute_teacher_id
        && !staff.contains_key(&substitute_id)
    {
        return Err(CoreError::NotFound {
            entity: "teacher",
            id: substitute_id,
        });
    }
    let slots: HashMap<i64, ScheduleSlot> = store
        .get_school_schedule_slots(school_id)?
        .into_iter()
        .map(|s| (s.slot_id, s))
        .collect();

    let mut records: Vec<SubstitutionRecord> = store
        .get_school_substitutions(school_id)?
        .into_iter()
        .filter(|s| filter.accepts(s))
        .map(|substitution| {
            let original_teacher: Teacher = staff
                .get(&substitution.original_teacher_id)
                .cloned()
                .ok_or_else(|| {
                    missing(&substitution, "teacher", substitution.original_teacher_id)
                })?;
            let substitute: Teacher = staff
                .get(&substitution.substitute_teacher_id)
                .cloned()
                .ok_or_else(|| {
                    missing(&substitution, "teacher", substitution.substitute_teacher_id)
                })?;
            let slot: ScheduleSlot = slots
                .get(&substitution.schedule_slot_id)
                .cloned()
                .ok_or_else(|| missing(&substitution, "slot", substitution.schedule_slot_id))?;
            Ok(SubstitutionRecord {
                substitution,
                original_teacher,
                substitute,
                slot,
            })
        })
        .collect::<Result<_, CoreError>>()?;

    records.sort_by(|a, b| {
        b.substitution
            .assigned_at
            .cmp(&a.substitution.assigned_at)
            .then(b.substitution.substitution_id.cmp(&a.substitution.substitution_id))
    });

    debug!(school_id, records = records.len(), "Loaded substitution history");
    Ok(records)
}
