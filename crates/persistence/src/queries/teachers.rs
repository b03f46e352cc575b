// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{TeacherRow, decode_all};
use crate::diesel_schema::teachers;
use crate::error::PersistenceError;
use autosub_domain::{Teacher, TeacherRole};

/// Retrieves a teacher by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
/// Returns `Ok(None)` if the teacher is not found.
pub fn get_teacher(
    conn: &mut SqliteConnection,
    teacher_id: i64,
) -> Result<Option<Teacher>, PersistenceError> {
    debug!(teacher_id, "Looking up teacher");

    let row: Option<TeacherRow> = teachers::table
        .filter(teachers::teacher_id.eq(teacher_id))
        .select(TeacherRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(TeacherRow::into_domain).transpose()?)
}

/// Lists all staff of a school, any role, active or not.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_teachers(
    conn: &mut SqliteConnection,
    school_id: i64,
) -> Result<Vec<Teacher>, PersistenceError> {
    let rows: Vec<TeacherRow> = teachers::table
        .filter(teachers::school_id.eq(school_id))
        .order(teachers::teacher_id.asc())
        .select(TeacherRow::as_select())
        .load(conn)?;

    Ok(decode_all(rows, TeacherRow::into_domain)?)
}

/// Lists the admins of a school.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_admins(
    conn: &mut SqliteConnection,
    school_id: i64,
) -> Result<Vec<Teacher>, PersistenceError> {
    let rows: Vec<TeacherRow> = teachers::table
        .filter(teachers::school_id.eq(school_id))
        .filter(teachers::role.eq(TeacherRole::Admin.as_str()))
        .order(teachers::teacher_id.asc())
        .select(TeacherRow::as_select())
        .load(conn)?;

    Ok(decode_all(rows, TeacherRow::into_domain)?)
}

/// Lists the active teachers (role `teacher`) of a school, leaving out `excluding`.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn get_active_teachers(
    conn: &mut SqliteConnection,
    school_id: i64,
    excluding: &[i64],
) -> Result<Vec<Teacher>, PersistenceError> {
    let rows: Vec<TeacherRow> = teachers::table
        .filter(teachers::school_id.eq(school_id))
        .filter(teachers::role.eq(TeacherRole::Teacher.as_str()))
        .filter(teachers::is_active.ne(0))
        .filter(teachers::teacher_id.ne_all(excluding))
        .order(teachers::teacher_id.asc())
        .select(TeacherRow::as_select())
        .load(conn)?;

    debug!(school_id, candidates = rows.len(), "Loaded active teachers");
    Ok(decode_all(rows, TeacherRow::into_domain)?)
}
