// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{SubstitutionRow, decode_all};
use crate::diesel_schema::{schedule_slots, substitutions};
use crate::error::PersistenceError;
use autosub_domain::{PeriodIndex, Substitution, Weekday};

/// Finds a substitution where `teacher_id` is the substitute and the
/// covered slot sits at `weekday` and `period_index`.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn find_substitution_by_weekday_period(
    conn: &mut SqliteConnection,
    teacher_id: i64,
    weekday: Weekday,
    period_index: PeriodIndex,
) -> Result<Option<Substitution>, PersistenceError> {
    let row: Option<SubstitutionRow> = substitutions::table
        .inner_join(schedule_slots::table)
        .filter(substitutions::substitute_teacher_id.eq(teacher_id))
        .filter(schedule_slots::weekday.eq(i32::from(weekday.number())))
        .filter(schedule_slots::period_index.eq(i32::from(period_index.value())))
        .order(substitutions::substitution_id.asc())
        .select(SubstitutionRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(SubstitutionRow::into_domain).transpose()?)
}

/// Whether any substitution references a slot.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn substitution_exists_for_slot(
    conn: &mut SqliteConnection,
    slot_id: i64,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        substitutions::table.filter(substitutions::schedule_slot_id.eq(slot_id)),
    ))
    .get_result(conn)?)
}

/// Lists every substitution of a school.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn get_school_substitutions(
    conn: &mut SqliteConnection,
    school_id: i64,
) -> Result<Vec<Substitution>, PersistenceError> {
    let rows: Vec<SubstitutionRow> = substitutions::table
        .filter(substitutions::school_id.eq(school_id))
        .order(substitutions::substitution_id.asc())
        .select(SubstitutionRow::as_select())
        .load(conn)?;

    Ok(decode_all(rows, SubstitutionRow::into_domain)?)
}
