// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Substitute Assignment Engine.
//!
//! Expands a leave into the `(date, slot)` pairs the absent teacher would
//! have taught and gives each one a substitute where possible. Pairs are
//! processed in date order, then by period, then by slot id.

use crate::error::{CoreError, StoreError};
use crate::resolver::CandidateResolver;
use crate::store::TimetableStore;
use autosub_domain::{
    LeaveRange, NewSubstitution, PeriodIndex, ScheduleSlot, Substitution, Teacher, Weekday,
};
use std::collections::BTreeMap;
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

/// Reason recorded on every substitution created by the engine.
pub const SUBSTITUTION_REASON: &str = "Leave";

/// One concrete class meeting: a slot on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOccurrence {
    /// The calendar date the slot meets on.
    pub date: Date,
    /// The recurring slot.
    pub slot: ScheduleSlot,
}

/// A slot occurrence that was given a substitute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The calendar date covered.
    pub date: Date,
    /// The covered slot.
    pub slot: ScheduleSlot,
    /// The teacher covering it.
    pub substitute: Teacher,
    /// The stored substitution record.
    pub substitution: Substitution,
}

/// Result of one assignment run.
///
/// A non-empty `uncovered` list is a successful run that needs manual
/// follow-up, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentOutcome {
    /// The school the run was scoped to.
    pub school_id: i64,
    /// The absent teacher.
    pub absent_teacher_id: i64,
    /// Occurrences that received a substitute, in processing order.
    pub assignments: Vec<Assignment>,
    /// Occurrences no candidate could take, in processing order.
    pub uncovered: Vec<SlotOccurrence>,
}

impl AssignmentOutcome {
    /// Number of occurrences the run looked at.
    #[must_use]
    pub const fn total_affected(&self) -> usize {
        self.assignments.len() + self.uncovered.len()
    }

    /// Whether every occurrence was covered.
    #[must_use]
    pub const fn is_fully_covered(&self) -> bool {
        self.uncovered.is_empty()
    }
}

/// Lists the occurrences a leave affects, in processing order.
///
/// `slots` are the absent teacher's slots; they are grouped by weekday once
/// and matched against each date of the range.
#[must_use]
pub fn affected_occurrences(range: &LeaveRange, slots: &[ScheduleSlot]) -> Vec<SlotOccurrence> {
    let mut by_weekday: BTreeMap<Weekday, Vec<&ScheduleSlot>> = BTreeMap::new();
    for slot in slots {
        by_weekday.entry(slot.weekday).or_default().push(slot);
    }
    for day_slots in by_weekday.values_mut() {
        day_slots.sort_by_key(|s| (s.period_index, s.slot_id));
    }

    let mut occurrences: Vec<SlotOccurrence> = Vec::new();
    for date in range.dates() {
        if let Some(day_slots) = by_weekday.get(&Weekday::of(date)) {
            occurrences.extend(day_slots.iter().map(|slot| SlotOccurrence {
                date,
                slot: (*slot).clone(),
            }));
        }
    }
    occurrences
}

/// Assigns substitutes for every class an absent teacher misses during a leave.
///
/// Each substitution is written as soon as its substitute is chosen and is
/// not rolled back if a later write fails. Calling this twice for the same
/// leave records a second substitution for every slot; callers must make
/// sure it runs once per leave.
///
/// # Arguments
///
/// * `store` - The timetable store
/// * `school_id` - The school of the absent teacher
/// * `absent_teacher_id` - The teacher on leave
/// * `from` - First day of leave
/// * `to` - Last day of leave (inclusive)
///
/// # Errors
///
/// Returns an error if:
/// - `to` is before `from`
/// - the school or teacher does not exist (no writes are made)
/// - the store fails while loading (no writes are made)
/// - a substitution write fails, as `CoreError::Interrupted` carrying the
///   partial outcome and the occurrences that were not completed
pub fn assign_substitutes<S>(
    store: &mut S,
    school_id: i64,
    absent_teacher_id: i64,
    from: Date,
    to: Date,
) -> Result<AssignmentOutcome, CoreError>
where
    S: TimetableStore + ?Sized,
{
    let range: LeaveRange = LeaveRange::new(from, to)?;

    if store.get_school(school_id)?.is_none() {
        return Err(CoreError::NotFound {
            entity: "school",
            id: school_id,
        });
    }
    let absent: Teacher = store
        .get_teacher(absent_teacher_id)?
        .filter(|t| t.school_id == school_id)
        .ok_or(CoreError::NotFound {
            entity: "teacher",
            id: absent_teacher_id,
        })?;

    let own_slots: Vec<ScheduleSlot> =
        store.get_teacher_schedule_slots(absent.teacher_id, school_id)?;
    let occurrences: Vec<SlotOccurrence> = affected_occurrences(&range, &own_slots);
    let mut resolver: CandidateResolver = CandidateResolver::load(store, school_id)?;

    info!(
        school_id,
        absent_teacher_id,
        from = %from,
        to = %to,
        occurrences = occurrences.len(),
        "Assigning substitutes"
    );

    let mut outcome: AssignmentOutcome = AssignmentOutcome {
        school_id,
        absent_teacher_id,
        ..AssignmentOutcome::default()
    };
    let excluded: [i64; 1] = [absent_teacher_id];
    let mut pending = occurrences.into_iter();

    while let Some(occurrence) = pending.next() {
        let weekday: Weekday = occurrence.slot.weekday;
        let period: PeriodIndex = occurrence.slot.period_index;

        let Some(candidate) = resolver
            .find_substitute(weekday, period, &excluded)
            .cloned()
        else {
            warn!(
                school_id,
                absent_teacher_id,
                date = %occurrence.date,
                slot_id = occurrence.slot.slot_id,
                weekday = %weekday,
                period = %period,
                class_section = %occurrence.slot.class_section,
                "No substitute available"
            );
            outcome.uncovered.push(occurrence);
            continue;
        };

        let record: NewSubstitution = NewSubstitution {
            original_teacher_id: absent_teacher_id,
            substitute_teacher_id: candidate.teacher_id,
            schedule_slot_id: occurrence.slot.slot_id,
            school_id,
            reason: String::from(SUBSTITUTION_REASON),
            assigned_at: OffsetDateTime::now_utc(),
        };

        let substitution: Substitution = match store.create_substitution(record) {
            Ok(substitution) => substitution,
            Err(source) => return Err(interrupted(outcome, occurrence, pending, source)),
        };

        resolver.mark_busy(candidate.teacher_id, weekday, period);
        debug!(
            date = %occurrence.date,
            slot_id = occurrence.slot.slot_id,
            substitute_teacher_id = candidate.teacher_id,
            substitution_id = substitution.substitution_id,
            "Assigned substitute"
        );
        outcome.assignments.push(Assignment {
            date: occurrence.date,
            slot: occurrence.slot,
            substitute: candidate,
            substitution,
        });
    }

    info!(
        school_id,
        absent_teacher_id,
        assigned = outcome.assignments.len(),
        uncovered = outcome.uncovered.len(),
        "Substitute assignment complete"
    );
    Ok(outcome)
}

fn interrupted(
    partial: AssignmentOutcome,
    failed: SlotOccurrence,
    rest: impl Iterator<Item = SlotOccurrence>,
    source: StoreError,
) -> CoreError {
    let untried: Vec<SlotOccurrence> = std::iter::once(failed).chain(rest).collect();
    warn!(
        school_id = partial.school_id,
        absent_teacher_id = partial.absent_teacher_id,
        assigned = partial.assignments.len(),
        untried = untried.len(),
        error = %source,
        "Substitute assignment interrupted"
    );
    CoreError::Interrupted {
        partial: Box::new(partial),
        untried,
        source,
    }
}
