// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use autosub_domain::{
    NewScheduleSlot, NewSchool, NewTeacher, PeriodIndex, ScheduleSlot, School, Teacher,
    TeacherRole, TimetableConfig, Weekday,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_school(persistence: &mut Persistence, name: &str) -> School {
    persistence
        .create_school(&NewSchool::new(name, TimetableConfig::default()).unwrap())
        .expect("Failed to create school")
}

pub fn add_staff(
    persistence: &mut Persistence,
    school_id: i64,
    name: &str,
    role: TeacherRole,
) -> Teacher {
    let email: String = format!(
        "{}.{school_id}@school.test",
        name.to_lowercase().replace(' ', ".")
    );
    persistence
        .create_teacher(&NewTeacher::new(school_id, name, &email, role).unwrap())
        .expect("Failed to create teacher")
}

pub fn add_teacher(persistence: &mut Persistence, school_id: i64, name: &str) -> Teacher {
    add_staff(persistence, school_id, name, TeacherRole::Teacher)
}

pub fn add_slot(
    persistence: &mut Persistence,
    teacher: &Teacher,
    weekday: Weekday,
    period: u8,
    subject: &str,
) -> ScheduleSlot {
    persistence
        .create_schedule_slot(
            &NewScheduleSlot::new(
                teacher.school_id,
                teacher.teacher_id,
                weekday,
                PeriodIndex::new(period),
                subject,
                "8A",
            )
            .unwrap(),
        )
        .expect("Failed to create schedule slot")
}
