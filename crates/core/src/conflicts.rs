// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conflict Detection Engine.
//!
//! Two read-only passes over one school:
//!
//! - overload: an active teacher with more than [`OVERLOAD_THRESHOLD`]
//!   slots on a weekday
//! - coverage: a slot owned by an active teacher that no substitution
//!   has ever referenced
//!
//! The coverage pass does not look at leave requests. A slot whose teacher
//! has never been absent is reported as uncovered too.

use crate::error::CoreError;
use crate::store::TimetableStore;
use autosub_domain::{PeriodIndex, ScheduleSlot, Substitution, Teacher, Weekday};
use std::collections::{BTreeMap, HashSet};
use tracing::info;

/// Slots per weekday a teacher may have before being flagged.
pub const OVERLOAD_THRESHOLD: usize = 5;

/// A teacher with too many periods on one weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadWarning {
    /// The overloaded teacher.
    pub teacher_id: i64,
    /// The teacher's display name.
    pub teacher_name: String,
    /// The overloaded weekday.
    pub weekday: Weekday,
    /// Slots held that weekday.
    pub lecture_count: usize,
}

/// A slot without any recorded substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncoveredSlot {
    /// The slot.
    pub schedule_slot_id: i64,
    /// Its weekday.
    pub weekday: Weekday,
    /// Its period.
    pub period_index: PeriodIndex,
    /// Subject taught.
    pub subject: String,
    /// Class taught.
    pub class_section: String,
    /// The owning teacher.
    pub teacher_id: i64,
}

/// Conflicts found in one school.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    /// The scanned school.
    pub school_id: i64,
    /// Ascending by teacher id, then weekday.
    pub overload_warnings: Vec<OverloadWarning>,
    /// Ascending by slot id.
    pub uncovered_slots: Vec<UncoveredSlot>,
}

impl ConflictReport {
    /// Whether neither pass found anything.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        self.overload_warnings.is_empty() && self.uncovered_slots.is_empty()
    }
}

/// Scans a school for overloaded teachers and uncovered slots.
///
/// # Errors
///
/// Returns an error if the school does not exist or the store cannot be read.
pub fn detect_conflicts<S>(store: &mut S, school_id: i64) -> Result<ConflictReport, CoreError>
where
    S: TimetableStore + ?Sized,
{
    if store.get_school(school_id)?.is_none() {
        return Err(CoreError::NotFound {
            entity: "school",
            id: school_id,
        });
    }

    let staff: Vec<Teacher> = store.list_teachers(school_id)?;
    let active_teachers: Vec<Teacher> = store.get_active_teachers(school_id, &[])?;
    let slots: Vec<ScheduleSlot> = store.get_school_schedule_slots(school_id)?;
    let substitutions: Vec<Substitution> = store.get_school_substitutions(school_id)?;

    let overload_warnings: Vec<OverloadWarning> = overload_pass(&active_teachers, &slots);
    let uncovered_slots: Vec<UncoveredSlot> = coverage_pass(&staff, &slots, &substitutions);

    info!(
        school_id,
        overloads = overload_warnings.len(),
        uncovered = uncovered_slots.len(),
        "Conflict scan complete"
    );

    Ok(ConflictReport {
        school_id,
        overload_warnings,
        uncovered_slots,
    })
}

fn overload_pass(active_teachers: &[Teacher], slots: &[ScheduleSlot]) -> Vec<OverloadWarning> {
    let mut per_day: BTreeMap<(i64, Weekday), usize> = BTreeMap::new();
    for slot in slots {
        *per_day.entry((slot.teacher_id, slot.weekday)).or_default() += 1;
    }

    let mut teachers: Vec<&Teacher> = active_teachers.iter().collect();
    teachers.sort_by_key(|t| t.teacher_id);

    let mut warnings: Vec<OverloadWarning> = Vec::new();
    for teacher in teachers {
        let week = (teacher.teacher_id, Weekday::SUNDAY)..=(teacher.teacher_id, Weekday::SATURDAY);
        for (&(_, weekday), &lecture_count) in per_day.range(week) {
            if lecture_count > OVERLOAD_THRESHOLD {
                warnings.push(OverloadWarning {
                    teacher_id: teacher.teacher_id,
                    teacher_name: teacher.name.clone(),
                    weekday,
                    lecture_count,
                });
            }
        }
    }
    warnings
}

fn coverage_pass(
    staff: &[Teacher],
    slots: &[ScheduleSlot],
    substitutions: &[Substitution],
) -> Vec<UncoveredSlot> {
    let covered: HashSet<i64> = substitutions.iter().map(|s| s.schedule_slot_id).collect();
    let active_owners: HashSet<i64> = staff
        .iter()
        .filter(|t| t.is_active)
        .map(|t| t.teacher_id)
        .collect();

    let mut uncovered: Vec<UncoveredSlot> = slots
        .iter()
        .filter(|slot| !covered.contains(&slot.slot_id) && active_owners.contains(&slot.teacher_id))
        .map(|slot| UncoveredSlot {
            schedule_slot_id: slot.slot_id,
            weekday: slot.weekday,
            period_index: slot.period_index,
            subject: slot.subject.clone(),
            class_section: slot.class_section.clone(),
            teacher_id: slot.teacher_id,
        })
        .collect();
    uncovered.sort_by_key(|u| u.schedule_slot_id);
    uncovered
}
