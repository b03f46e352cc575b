// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-process store.
//!
//! Identifiers are assigned sequentially from 1 per record kind, so runs
//! against a freshly seeded store are fully reproducible.

use crate::error::StoreError;
use crate::store::{LeaveStore, TimetableStore};
use autosub_domain::{
    LeaveRange, LeaveRequest, LeaveStatus, NewLeaveRequest, NewScheduleSlot, NewSchool,
    NewSubstitution, NewTeacher, PeriodIndex, ScheduleSlot, School, Substitution, Teacher,
    TeacherRole, Weekday,
};
use std::collections::BTreeMap;

/// A store kept entirely in memory, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    schools: BTreeMap<i64, School>,
    teachers: BTreeMap<i64, Teacher>,
    slots: BTreeMap<i64, ScheduleSlot>,
    substitutions: BTreeMap<i64, Substitution>,
    leaves: BTreeMap<i64, LeaveRequest>,
}

fn next_id<T>(records: &BTreeMap<i64, T>) -> i64 {
    records.last_key_value().map_or(1, |(id, _)| id + 1)
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a school.
    pub fn create_school(&mut self, school: NewSchool) -> School {
        let school_id: i64 = next_id(&self.schools);
        let record: School = School {
            school_id,
            name: school.name,
            timetable: school.timetable,
        };
        self.schools.insert(school_id, record.clone());
        record
    }

    /// Adds a staff member. New staff are active.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the school does not exist or the
    /// email is already registered.
    pub fn create_teacher(&mut self, teacher: NewTeacher) -> Result<Teacher, StoreError> {
        if !self.schools.contains_key(&teacher.school_id) {
            return Err(StoreError::Conflict(format!(
                "school {} does not exist",
                teacher.school_id
            )));
        }
        if self.teachers.values().any(|t| t.email == teacher.email) {
            return Err(StoreError::Conflict(format!(
                "email {} is already registered",
                teacher.email
            )));
        }

        let teacher_id: i64 = next_id(&self.teachers);
        let record: Teacher = Teacher {
            teacher_id,
            school_id: teacher.school_id,
            name: teacher.name,
            email: teacher.email,
            role: teacher.role,
            is_active: true,
        };
        self.teachers.insert(teacher_id, record.clone());
        Ok(record)
    }

    /// Sets a staff member's active flag.
    ///
    /// Returns the updated record, or `None` if the teacher does not exist.
    pub fn set_teacher_active(&mut self, teacher_id: i64, is_active: bool) -> Option<Teacher> {
        let teacher: &mut Teacher = self.teachers.get_mut(&teacher_id)?;
        teacher.is_active = is_active;
        Some(teacher.clone())
    }

    /// Adds a schedule slot.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the teacher is not part of the
    /// school or already owns a slot at the same weekday and period.
    pub fn create_schedule_slot(
        &mut self,
        slot: NewScheduleSlot,
    ) -> Result<ScheduleSlot, StoreError> {
        let owned_by_school: bool = self
            .teachers
            .get(&slot.teacher_id)
            .is_some_and(|t| t.school_id == slot.school_id);
        if !owned_by_school {
            return Err(StoreError::Conflict(format!(
                "teacher {} is not part of school {}",
                slot.teacher_id, slot.school_id
            )));
        }
        let duplicate: bool = self.slots.values().any(|s| {
            s.teacher_id == slot.teacher_id
                && s.weekday == slot.weekday
                && s.period_index == slot.period_index
        });
        if duplicate {
            return Err(StoreError::Conflict(format!(
                "teacher {} already teaches on {} {}",
                slot.teacher_id, slot.weekday, slot.period_index
            )));
        }

        let slot_id: i64 = next_id(&self.slots);
        let record: ScheduleSlot = ScheduleSlot {
            slot_id,
            school_id: slot.school_id,
            teacher_id: slot.teacher_id,
            weekday: slot.weekday,
            period_index: slot.period_index,
            subject: slot.subject,
            class_section: slot.class_section,
        };
        self.slots.insert(slot_id, record.clone());
        Ok(record)
    }

    /// Every substitution recorded so far, ascending by id.
    #[must_use]
    pub fn substitutions(&self) -> impl Iterator<Item = &Substitution> {
        self.substitutions.values()
    }
}

impl TimetableStore for InMemoryStore {
    fn get_school(&mut self, school_id: i64) -> Result<Option<School>, StoreError> {
        Ok(self.schools.get(&school_id).cloned())
    }

    fn list_schools(&mut self) -> Result<Vec<School>, StoreError> {
        Ok(self.schools.values().cloned().collect())
    }

    fn get_teacher(&mut self, teacher_id: i64) -> Result<Option<Teacher>, StoreError> {
        Ok(self.teachers.get(&teacher_id).cloned())
    }

    fn list_teachers(&mut self, school_id: i64) -> Result<Vec<Teacher>, StoreError> {
        Ok(self
            .teachers
            .values()
            .filter(|t| t.school_id == school_id)
            .cloned()
            .collect())
    }

    fn list_admins(&mut self, school_id: i64) -> Result<Vec<Teacher>, StoreError> {
        Ok(self
            .teachers
            .values()
            .filter(|t| t.school_id == school_id && t.role == TeacherRole::Admin)
            .cloned()
            .collect())
    }

    fn get_active_teachers(
        &mut self,
        school_id: i64,
        excluding: &[i64],
    ) -> Result<Vec<Teacher>, StoreError> {
        Ok(self
            .teachers
            .values()
            .filter(|t| {
                t.school_id == school_id && t.is_candidate() && !excluding.contains(&t.teacher_id)
            })
            .cloned()
            .collect())
    }

    fn get_teacher_schedule_slots(
        &mut self,
        teacher_id: i64,
        school_id: i64,
    ) -> Result<Vec<ScheduleSlot>, StoreError> {
        Ok(self
            .slots
            .values()
            .filter(|s| s.teacher_id == teacher_id && s.school_id == school_id)
            .cloned()
            .collect())
    }

    fn get_school_schedule_slots(
        &mut self,
        school_id: i64,
    ) -> Result<Vec<ScheduleSlot>, StoreError> {
        Ok(self
            .slots
            .values()
            .filter(|s| s.school_id == school_id)
            .cloned()
            .collect())
    }

    fn find_schedule_slot(
        &mut self,
        teacher_id: i64,
        weekday: Weekday,
        period_index: PeriodIndex,
    ) -> Result<Option<ScheduleSlot>, StoreError> {
        Ok(self
            .slots
            .values()
            .find(|s| {
                s.teacher_id == teacher_id && s.weekday == weekday && s.period_index == period_index
            })
            .cloned())
    }

    fn find_substitution_by_weekday_period(
        &mut self,
        teacher_id: i64,
        weekday: Weekday,
        period_index: PeriodIndex,
    ) -> Result<Option<Substitution>, StoreError> {
        Ok(self
            .substitutions
            .values()
            .find(|sub| {
                sub.substitute_teacher_id == teacher_id
                    && self.slots.get(&sub.schedule_slot_id).is_some_and(|slot| {
                        slot.weekday == weekday && slot.period_index == period_index
                    })
            })
            .cloned())
    }

    fn create_substitution(&mut self, record: NewSubstitution) -> Result<Substitution, StoreError> {
        if !self.slots.contains_key(&record.schedule_slot_id) {
            return Err(StoreError::Conflict(format!(
                "schedule slot {} does not exist",
                record.schedule_slot_id
            )));
        }

        let substitution_id: i64 = next_id(&self.substitutions);
        let substitution: Substitution = Substitution {
            substitution_id,
            original_teacher_id: record.original_teacher_id,
            substitute_teacher_id: record.substitute_teacher_id,
            schedule_slot_id: record.schedule_slot_id,
            school_id: record.school_id,
            reason: record.reason,
            assigned_at: record.assigned_at,
        };
        self.substitutions
            .insert(substitution_id, substitution.clone());
        Ok(substitution)
    }

    fn substitution_exists_for_slot(&mut self, slot_id: i64) -> Result<bool, StoreError> {
        Ok(self
            .substitutions
            .values()
            .any(|s| s.schedule_slot_id == slot_id))
    }

    fn get_school_substitutions(
        &mut self,
        school_id: i64,
    ) -> Result<Vec<Substitution>, StoreError> {
        Ok(self
            .substitutions
            .values()
            .filter(|s| s.school_id == school_id)
            .cloned()
            .collect())
    }
}

impl LeaveStore for InMemoryStore {
    fn create_leave_request(
        &mut self,
        request: NewLeaveRequest,
    ) -> Result<LeaveRequest, StoreError> {
        let leave_id: i64 = next_id(&self.leaves);
        let record: LeaveRequest = LeaveRequest {
            leave_id,
            teacher_id: request.teacher_id,
            school_id: request.school_id,
            range: request.range,
            reason: request.reason,
            status: LeaveStatus::Pending,
            admin_comment: None,
        };
        self.leaves.insert(leave_id, record.clone());
        Ok(record)
    }

    fn get_leave_request(&mut self, leave_id: i64) -> Result<Option<LeaveRequest>, StoreError> {
        Ok(self.leaves.get(&leave_id).cloned())
    }

    fn find_overlapping_leave(
        &mut self,
        teacher_id: i64,
        range: &LeaveRange,
    ) -> Result<Option<LeaveRequest>, StoreError> {
        Ok(self
            .leaves
            .values()
            .find(|l| {
                l.teacher_id == teacher_id && l.status.blocks_overlap() && l.range.overlaps(range)
            })
            .cloned())
    }

    fn update_leave_status(&mut self, leave: &LeaveRequest) -> Result<(), StoreError> {
        let Some(stored) = self.leaves.get_mut(&leave.leave_id) else {
            return Err(StoreError::Conflict(format!(
                "leave request {} does not exist",
                leave.leave_id
            )));
        };
        stored.status = leave.status;
        stored.admin_comment.clone_from(&leave.admin_comment);
        Ok(())
    }
}
