// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine store traits over the `SQLite` adapter.

use autosub::{LeaveStore, StoreError, TimetableStore};
use autosub_domain::{
    LeaveRange, LeaveRequest, NewLeaveRequest, NewSubstitution, PeriodIndex, ScheduleSlot, School,
    Substitution, Teacher, Weekday,
};

use crate::{Persistence, mutations, queries};

impl TimetableStore for Persistence {
    fn get_school(&mut self, school_id: i64) -> Result<Option<School>, StoreError> {
        Ok(queries::schools::get_school(&mut self.conn, school_id)?)
    }

    fn list_schools(&mut self) -> Result<Vec<School>, StoreError> {
        Ok(queries::schools::list_schools(&mut self.conn)?)
    }

    fn get_teacher(&mut self, teacher_id: i64) -> Result<Option<Teacher>, StoreError> {
        Ok(queries::teachers::get_teacher(&mut self.conn, teacher_id)?)
    }

    fn list_teachers(&mut self, school_id: i64) -> Result<Vec<Teacher>, StoreError> {
        Ok(queries::teachers::list_teachers(&mut self.conn, school_id)?)
    }

    fn list_admins(&mut self, school_id: i64) -> Result<Vec<Teacher>, StoreError> {
        Ok(queries::teachers::list_admins(&mut self.conn, school_id)?)
    }

    fn get_active_teachers(
        &mut self,
        school_id: i64,
        excluding: &[i64],
    ) -> Result<Vec<Teacher>, StoreError> {
        Ok(queries::teachers::get_active_teachers(
            &mut self.conn,
            school_id,
            excluding,
        )?)
    }

    fn get_teacher_schedule_slots(
        &mut self,
        teacher_id: i64,
        school_id: i64,
    ) -> Result<Vec<ScheduleSlot>, StoreError> {
        Ok(queries::slots::get_teacher_schedule_slots(
            &mut self.conn,
            teacher_id,
            school_id,
        )?)
    }

    fn get_school_schedule_slots(
        &mut self,
        school_id: i64,
    ) -> Result<Vec<ScheduleSlot>, StoreError> {
        Ok(queries::slots::get_school_schedule_slots(
            &mut self.conn,
            school_id,
        )?)
    }

    fn find_schedule_slot(
        &mut self,
        teacher_id: i64,
        weekday: Weekday,
        period_index: PeriodIndex,
    ) -> Result<Option<ScheduleSlot>, StoreError> {
        Ok(queries::slots::find_schedule_slot(
            &mut self.conn,
            teacher_id,
            weekday,
            period_index,
        )?)
    }

    fn find_substitution_by_weekday_period(
        &mut self,
        teacher_id: i64,
        weekday: Weekday,
        period_index: PeriodIndex,
    ) -> Result<Option<Substitution>, StoreError> {
        Ok(queries::substitutions::find_substitution_by_weekday_period(
            &mut self.conn,
            teacher_id,
            weekday,
            period_index,
        )?)
    }

    fn create_substitution(&mut self, record: NewSubstitution) -> Result<Substitution, StoreError> {
        Ok(mutations::substitutions::create_substitution(
            &mut self.conn,
            &record,
        )?)
    }

    fn substitution_exists_for_slot(&mut self, slot_id: i64) -> Result<bool, StoreError> {
        Ok(queries::substitutions::substitution_exists_for_slot(
            &mut self.conn,
            slot_id,
        )?)
    }

    fn get_school_substitutions(
        &mut self,
        school_id: i64,
    ) -> Result<Vec<Substitution>, StoreError> {
        Ok(queries::substitutions::get_school_substitutions(
            &mut self.conn,
            school_id,
        )?)
    }
}

impl LeaveStore for Persistence {
    fn create_leave_request(
        &mut self,
        request: NewLeaveRequest,
    ) -> Result<LeaveRequest, StoreError> {
        Ok(mutations::leaves::create_leave_request(
            &mut self.conn,
            &request,
        )?)
    }

    fn get_leave_request(&mut self, leave_id: i64) -> Result<Option<LeaveRequest>, StoreError> {
        Ok(queries::leaves::get_leave_request(&mut self.conn, leave_id)?)
    }

    fn find_overlapping_leave(
        &mut self,
        teacher_id: i64,
        range: &LeaveRange,
    ) -> Result<Option<LeaveRequest>, StoreError> {
        Ok(queries::leaves::find_overlapping_leave(
            &mut self.conn,
            teacher_id,
            range,
        )?)
    }

    fn update_leave_status(&mut self, leave: &LeaveRequest) -> Result<(), StoreError> {
        Ok(mutations::leaves::update_leave_status(&mut self.conn, leave)?)
    }
}
