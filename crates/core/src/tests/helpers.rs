// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{InMemoryStore, LeaveStore, Notice, NoticeSink, StoreError, TimetableStore};
use autosub_domain::{
    LeaveRange, LeaveRequest, NewLeaveRequest, NewScheduleSlot, NewSchool, NewSubstitution,
    NewTeacher, PeriodIndex, ScheduleSlot, School, Substitution, Teacher, TeacherRole,
    TimetableConfig, Weekday,
};
use std::sync::Mutex;

pub fn create_test_school(store: &mut InMemoryStore, name: &str) -> School {
    store.create_school(NewSchool::new(name, TimetableConfig::default()).unwrap())
}

pub fn add_teacher(store: &mut InMemoryStore, school_id: i64, name: &str) -> Teacher {
    add_staff(store, school_id, name, TeacherRole::Teacher)
}

pub fn add_admin(store: &mut InMemoryStore, school_id: i64, name: &str) -> Teacher {
    add_staff(store, school_id, name, TeacherRole::Admin)
}

fn add_staff(store: &mut InMemoryStore, school_id: i64, name: &str, role: TeacherRole) -> Teacher {
    let email: String = format!(
        "{}.{school_id}@school.test",
        name.to_lowercase().replace(' ', ".")
    );
    store
        .create_teacher(NewTeacher::new(school_id, name, &email, role).unwrap())
        .unwrap()
}

pub fn add_slot(
    store: &mut InMemoryStore,
    teacher: &Teacher,
    weekday: Weekday,
    period: u8,
    subject: &str,
    class_section: &str,
) -> ScheduleSlot {
    store
        .create_schedule_slot(
            NewScheduleSlot::new(
                teacher.school_id,
                teacher.teacher_id,
                weekday,
                PeriodIndex::new(period),
                subject,
                class_section,
            )
            .unwrap(),
        )
        .unwrap()
}

/// Fills a teacher's day with `count` consecutive periods starting at period 0.
pub fn fill_day(store: &mut InMemoryStore, teacher: &Teacher, weekday: Weekday, count: u8) {
    for period in 0..count {
        add_slot(store, teacher, weekday, period, "Math", "8A");
    }
}

/// Wraps an `InMemoryStore` and injects failures.
pub struct FailingStore {
    pub inner: InMemoryStore,
    /// Substitution writes allowed before every further write fails.
    pub writes_before_failure: usize,
    /// Slot reads for this school fail.
    pub unreadable_school: Option<i64>,
    writes: usize,
}

impl FailingStore {
    pub const fn new(inner: InMemoryStore, writes_before_failure: usize) -> Self {
        Self {
            inner,
            writes_before_failure,
            unreadable_school: None,
            writes: 0,
        }
    }
}

impl TimetableStore for FailingStore {
    fn get_school(&mut self, school_id: i64) -> Result<Option<School>, StoreError> {
        self.inner.get_school(school_id)
    }

    fn list_schools(&mut self) -> Result<Vec<School>, StoreError> {
        self.inner.list_schools()
    }

    fn get_teacher(&mut self, teacher_id: i64) -> Result<Option<Teacher>, StoreError> {
        self.inner.get_teacher(teacher_id)
    }

    fn list_teachers(&mut self, school_id: i64) -> Result<Vec<Teacher>, StoreError> {
        self.inner.list_teachers(school_id)
    }

    fn list_admins(&mut self, school_id: i64) -> Result<Vec<Teacher>, StoreError> {
        self.inner.list_admins(school_id)
    }

    fn get_active_teachers(
        &mut self,
        school_id: i64,
        excluding: &[i64],
    ) -> Result<Vec<Teacher>, StoreError> {
        self.inner.get_active_teachers(school_id, excluding)
    }

    fn get_teacher_schedule_slots(
        &mut self,
        teacher_id: i64,
        school_id: i64,
    ) -> Result<Vec<ScheduleSlot>, StoreError> {
        self.inner.get_teacher_schedule_slots(teacher_id, school_id)
    }

    fn get_school_schedule_slots(
        &mut self,
        school_id: i64,
    ) -> Result<Vec<ScheduleSlot>, StoreError> {
        if self.unreadable_school == Some(school_id) {
            return Err(StoreError::Unavailable(String::from("disk on fire")));
        }
        self.inner.get_school_schedule_slots(school_id)
    }

    fn find_schedule_slot(
        &mut self,
        teacher_id: i64,
        weekday: Weekday,
        period_index: PeriodIndex,
    ) -> Result<Option<ScheduleSlot>, StoreError> {
        self.inner
            .find_schedule_slot(teacher_id, weekday, period_index)
    }

    fn find_substitution_by_weekday_period(
        &mut self,
        teacher_id: i64,
        weekday: Weekday,
        period_index: PeriodIndex,
    ) -> Result<Option<Substitution>, StoreError> {
        self.inner
            .find_substitution_by_weekday_period(teacher_id, weekday, period_index)
    }

    fn create_substitution(&mut self, record: NewSubstitution) -> Result<Substitution, StoreError> {
        if self.writes >= self.writes_before_failure {
            return Err(StoreError::Unavailable(String::from("connection lost")));
        }
        self.writes += 1;
        self.inner.create_substitution(record)
    }

    fn substitution_exists_for_slot(&mut self, slot_id: i64) -> Result<bool, StoreError> {
        self.inner.substitution_exists_for_slot(slot_id)
    }

    fn get_school_substitutions(
        &mut self,
        school_id: i64,
    ) -> Result<Vec<Substitution>, StoreError> {
        self.inner.get_school_substitutions(school_id)
    }
}

impl LeaveStore for FailingStore {
    fn create_leave_request(
        &mut self,
        request: NewLeaveRequest,
    ) -> Result<LeaveRequest, StoreError> {
        self.inner.create_leave_request(request)
    }

    fn get_leave_request(&mut self, leave_id: i64) -> Result<Option<LeaveRequest>, StoreError> {
        self.inner.get_leave_request(leave_id)
    }

    fn find_overlapping_leave(
        &mut self,
        teacher_id: i64,
        range: &LeaveRange,
    ) -> Result<Option<LeaveRequest>, StoreError> {
        self.inner.find_overlapping_leave(teacher_id, range)
    }

    fn update_leave_status(&mut self, leave: &LeaveRequest) -> Result<(), StoreError> {
        self.inner.update_leave_status(leave)
    }
}

/// Collects published notices.
#[derive(Default)]
pub struct RecordingSink {
    pub notices: Mutex<Vec<Notice>>,
}

impl NoticeSink for RecordingSink {
    fn publish(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}
