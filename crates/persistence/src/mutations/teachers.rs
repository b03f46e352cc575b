// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::teachers;
use crate::error::PersistenceError;
use crate::queries::teachers::get_teacher;
use autosub_domain::{NewTeacher, Teacher};

/// Inserts an active teacher.
///
/// # Errors
///
/// Returns `ConstraintViolation` if the email is taken or the school does
/// not exist.
pub fn create_teacher(
    conn: &mut SqliteConnection,
    teacher: &NewTeacher,
) -> Result<Teacher, PersistenceError> {
    diesel::insert_into(teachers::table)
        .values((
            teachers::school_id.eq(teacher.school_id),
            teachers::name.eq(&teacher.name),
            teachers::email.eq(&teacher.email),
            teachers::role.eq(teacher.role.as_str()),
            teachers::is_active.eq(1),
        ))
        .execute(conn)?;

    let teacher_id: i64 = get_last_insert_rowid(conn)?;
    info!(
        teacher_id,
        school_id = teacher.school_id,
        role = %teacher.role,
        "Created teacher"
    );

    Ok(Teacher {
        teacher_id,
        school_id: teacher.school_id,
        name: teacher.name.clone(),
        email: teacher.email.clone(),
        role: teacher.role,
        is_active: true,
    })
}

/// Activates or deactivates a teacher.
///
/// # Errors
///
/// Returns `NotFound` if the teacher does not exist.
pub fn set_teacher_active(
    conn: &mut SqliteConnection,
    teacher_id: i64,
    is_active: bool,
) -> Result<Teacher, PersistenceError> {
    let updated: usize = diesel::update(teachers::table.filter(teachers::teacher_id.eq(teacher_id)))
        .set(teachers::is_active.eq(i32::from(is_active)))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Teacher {teacher_id} not found"
        )));
    }

    info!(teacher_id, is_active, "Updated teacher status");
    get_teacher(conn, teacher_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Teacher {teacher_id} not found")))
}
