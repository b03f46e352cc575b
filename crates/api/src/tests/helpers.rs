// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::path::PathBuf;

use autosub_persistence::Persistence;
use diesel::{Connection, RunQueryDsl, SqliteConnection};

use crate::{
    CreateScheduleSlotRequest, CreateSchoolRequest, CreateTeacherRequest, ScheduleSlotResponse,
    SchoolResponse, TeacherResponse, create_schedule_slot, create_school, create_teacher,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn school_request(name: &str) -> CreateSchoolRequest {
    CreateSchoolRequest {
        name: name.to_string(),
        period_count: None,
        period_duration_minutes: None,
        start_hour: None,
        start_minute: None,
    }
}

pub fn create_test_school(persistence: &mut Persistence) -> SchoolResponse {
    create_school(persistence, &school_request("Riverside")).unwrap()
}

pub fn create_test_teacher(
    persistence: &mut Persistence,
    school_id: i64,
    name: &str,
    role: Option<&str>,
) -> TeacherResponse {
    let email: String = format!("{}@riverside.test", name.to_lowercase().replace(' ', "."));
    create_teacher(
        persistence,
        &CreateTeacherRequest {
            school_id,
            name: name.to_string(),
            email,
            role: role.map(str::to_string),
        },
    )
    .unwrap()
}

pub fn slot_request(
    teacher: &TeacherResponse,
    weekday: u8,
    period_index: u8,
) -> CreateScheduleSlotRequest {
    CreateScheduleSlotRequest {
        school_id: teacher.school_id,
        teacher_id: teacher.teacher_id,
        weekday,
        period_index,
        subject: String::from("Math"),
        class_section: String::from("8A"),
    }
}

pub fn create_test_slot(
    persistence: &mut Persistence,
    teacher: &TeacherResponse,
    weekday: u8,
    period_index: u8,
) -> ScheduleSlotResponse {
    create_schedule_slot(persistence, &slot_request(teacher, weekday, period_index)).unwrap()
}

/// A database file under the temp dir, removed on drop.
pub struct FileDatabase {
    path: PathBuf,
}

impl FileDatabase {
    pub fn new(name: &str) -> Self {
        let path: PathBuf =
            std::env::temp_dir().join(format!("autosub_api_{name}_{}.db", std::process::id()));
        let database: Self = Self { path };
        database.remove_files();
        database
    }

    pub fn open(&self) -> Persistence {
        Persistence::new_with_file(&self.path).expect("Failed to open file persistence")
    }

    /// Makes every substitution insert fail once `allowed` rows exist.
    pub fn fail_substitution_writes_after(&self, allowed: usize) {
        let mut conn: SqliteConnection =
            SqliteConnection::establish(&self.path.display().to_string()).unwrap();
        diesel::sql_query(format!(
            "CREATE TRIGGER fail_substitution_writes BEFORE INSERT ON substitutions \
             WHEN (SELECT COUNT(*) FROM substitutions) >= {allowed} \
             BEGIN SELECT RAISE(ABORT, 'disk quota exceeded'); END"
        ))
        .execute(&mut conn)
        .unwrap();
    }

    fn remove_files(&self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", self.path.display()));
        }
    }
}

impl Drop for FileDatabase {
    fn drop(&mut self) {
        self.remove_files();
    }
}
