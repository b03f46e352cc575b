// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate Resolver.
//!
//! A substitute for a slot at `(weekday, period)` must be an active
//! teacher of the same school who neither teaches nor already substitutes
//! at that weekday and period. Candidates are tried in ascending
//! `teacher_id` order and the first eligible one wins.

use crate::error::StoreError;
use crate::store::TimetableStore;
use autosub_domain::{PeriodIndex, ScheduleSlot, Substitution, Teacher, Weekday};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Prefetched view of who is busy when, for one school.
///
/// Built once per run with a fixed number of store reads. Each assignment
/// made during the run must be fed back through [`Self::mark_busy`] so later
/// lookups in the same run see it.
#[derive(Debug, Clone)]
pub struct CandidateResolver {
    candidates: Vec<Teacher>,
    busy: HashMap<(Weekday, PeriodIndex), BTreeSet<i64>>,
}

impl CandidateResolver {
    /// Loads the candidate pool and busy index of a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<S>(store: &mut S, school_id: i64) -> Result<Self, StoreError>
    where
        S: TimetableStore + ?Sized,
    {
        let candidates: Vec<Teacher> = store.get_active_teachers(school_id, &[])?;
        let slots: Vec<ScheduleSlot> = store.get_school_schedule_slots(school_id)?;
        let substitutions: Vec<Substitution> = store.get_school_substitutions(school_id)?;

        let resolver: Self = Self::from_parts(candidates, &slots, &substitutions);
        debug!(
            school_id,
            candidates = resolver.candidates.len(),
            slots = slots.len(),
            substitutions = substitutions.len(),
            "Loaded candidate resolver"
        );
        Ok(resolver)
    }

    /// Builds a resolver from already-loaded records.
    ///
    /// Inactive staff and admins in `candidates` are ignored. A substitution
    /// whose slot is not in `slots` cannot be placed on the week and is skipped.
    #[must_use]
    pub fn from_parts(
        mut candidates: Vec<Teacher>,
        slots: &[ScheduleSlot],
        substitutions: &[Substitution],
    ) -> Self {
        candidates.retain(Teacher::is_candidate);
        candidates.sort_by_key(|t| t.teacher_id);

        let mut busy: HashMap<(Weekday, PeriodIndex), BTreeSet<i64>> = HashMap::new();
        let mut slot_times: HashMap<i64, (Weekday, PeriodIndex)> = HashMap::new();
        for slot in slots {
            let key: (Weekday, PeriodIndex) = (slot.weekday, slot.period_index);
            slot_times.insert(slot.slot_id, key);
            busy.entry(key).or_default().insert(slot.teacher_id);
        }
        for substitution in substitutions {
            if let Some(key) = slot_times.get(&substitution.schedule_slot_id) {
                busy.entry(*key)
                    .or_default()
                    .insert(substitution.substitute_teacher_id);
            }
        }

        Self { candidates, busy }
    }

    /// Returns the first eligible substitute, or `None` if every candidate
    /// is excluded or busy.
    #[must_use]
    pub fn find_substitute(
        &self,
        weekday: Weekday,
        period_index: PeriodIndex,
        excluded: &[i64],
    ) -> Option<&Teacher> {
        let busy: Option<&BTreeSet<i64>> = self.busy.get(&(weekday, period_index));
        self.candidates.iter().find(|candidate| {
            !excluded.contains(&candidate.teacher_id)
                && !busy.is_some_and(|ids| ids.contains(&candidate.teacher_id))
        })
    }

    /// Records that `teacher_id` is now committed at `weekday` and `period_index`.
    pub fn mark_busy(&mut self, teacher_id: i64, weekday: Weekday, period_index: PeriodIndex) {
        self.busy
            .entry((weekday, period_index))
            .or_default()
            .insert(teacher_id);
    }

    /// The candidate pool in resolution order.
    #[must_use]
    pub fn candidates(&self) -> &[Teacher] {
        &self.candidates
    }
}

/// Resolves a substitute by querying the store directly for each candidate.
///
/// Gives the same answer as a freshly loaded [`CandidateResolver`], at the
/// cost of two store reads per candidate. Suited to one-off lookups.
///
/// # Arguments
///
/// * `store` - The timetable store
/// * `school_id` - The school to search
/// * `weekday` - Weekday of the slot to cover
/// * `period_index` - Period of the slot to cover
/// * `excluded` - Teachers that must not be chosen, normally the absent one
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn find_substitute<S>(
    store: &mut S,
    school_id: i64,
    weekday: Weekday,
    period_index: PeriodIndex,
    excluded: &[i64],
) -> Result<Option<Teacher>, StoreError>
where
    S: TimetableStore + ?Sized,
{
    let mut candidates: Vec<Teacher> = store.get_active_teachers(school_id, excluded)?;
    candidates.sort_by_key(|t| t.teacher_id);

    for candidate in candidates {
        if store
            .find_schedule_slot(candidate.teacher_id, weekday, period_index)?
            .is_some()
        {
            continue;
        }
        if store
            .find_substitution_by_weekday_period(candidate.teacher_id, weekday, period_index)?
            .is_some()
        {
            continue;
        }
        return Ok(Some(candidate));
    }

    Ok(None)
}
