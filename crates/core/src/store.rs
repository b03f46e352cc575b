// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store ports consumed by the engines.
//!
//! The engines own no records. Everything they read or write goes through
//! these traits, implemented by [`crate::InMemoryStore`] and by the SQLite
//! persistence layer.

use crate::error::StoreError;
use autosub_domain::{
    LeaveRange, LeaveRequest, NewLeaveRequest, NewSubstitution, PeriodIndex, ScheduleSlot, School,
    Substitution, Teacher, Weekday,
};

/// Read and write access to schools, teachers, slots and substitutions.
pub trait TimetableStore {
    /// Looks up a school by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_school(&mut self, school_id: i64) -> Result<Option<School>, StoreError>;

    /// Lists every school, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_schools(&mut self) -> Result<Vec<School>, StoreError>;

    /// Looks up a teacher by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_teacher(&mut self, teacher_id: i64) -> Result<Option<Teacher>, StoreError>;

    /// Lists all staff of a school regardless of role or active flag,
    /// ascending by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_teachers(&mut self, school_id: i64) -> Result<Vec<Teacher>, StoreError>;

    /// Lists the admins of a school, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_admins(&mut self, school_id: i64) -> Result<Vec<Teacher>, StoreError>;

    /// Lists the active teachers (role `teacher`) of a school, ascending by
    /// id, leaving out `excluding`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_active_teachers(
        &mut self,
        school_id: i64,
        excluding: &[i64],
    ) -> Result<Vec<Teacher>, StoreError>;

    /// Lists one teacher's slots within a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_teacher_schedule_slots(
        &mut self,
        teacher_id: i64,
        school_id: i64,
    ) -> Result<Vec<ScheduleSlot>, StoreError>;

    /// Lists every slot of a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_school_schedule_slots(&mut self, school_id: i64)
    -> Result<Vec<ScheduleSlot>, StoreError>;

    /// Finds the slot a teacher owns at a weekday and period.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_schedule_slot(
        &mut self,
        teacher_id: i64,
        weekday: Weekday,
        period_index: PeriodIndex,
    ) -> Result<Option<ScheduleSlot>, StoreError>;

    /// Finds a substitution where `teacher_id` is the substitute and the
    /// covered slot sits at `weekday` and `period_index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_substitution_by_weekday_period(
        &mut self,
        teacher_id: i64,
        weekday: Weekday,
        period_index: PeriodIndex,
    ) -> Result<Option<Substitution>, StoreError>;

    /// Records a substitution. The write is durable on return.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn create_substitution(&mut self, record: NewSubstitution) -> Result<Substitution, StoreError>;

    /// Whether any substitution references `slot_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn substitution_exists_for_slot(&mut self, slot_id: i64) -> Result<bool, StoreError>;

    /// Lists every substitution of a school, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_school_substitutions(&mut self, school_id: i64)
    -> Result<Vec<Substitution>, StoreError>;
}

/// Read and write access to leave requests.
pub trait LeaveStore {
    /// Stores a new pending leave request.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn create_leave_request(&mut self, request: NewLeaveRequest)
    -> Result<LeaveRequest, StoreError>;

    /// Looks up a leave request by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_leave_request(&mut self, leave_id: i64) -> Result<Option<LeaveRequest>, StoreError>;

    /// Finds a pending or approved leave of `teacher_id` sharing a day with `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_overlapping_leave(
        &mut self,
        teacher_id: i64,
        range: &LeaveRange,
    ) -> Result<Option<LeaveRequest>, StoreError>;

    /// Writes the status and admin comment of `leave`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or the request does not exist.
    fn update_leave_status(&mut self, leave: &LeaveRequest) -> Result<(), StoreError>;
}
