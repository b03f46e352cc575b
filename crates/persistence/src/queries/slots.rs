// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{ScheduleSlotRow, decode_all};
use crate::diesel_schema::schedule_slots;
use crate::error::PersistenceError;
use autosub_domain::{PeriodIndex, ScheduleSlot, Weekday};

/// Lists one teacher's slots in a school.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn get_teacher_schedule_slots(
    conn: &mut SqliteConnection,
    teacher_id: i64,
    school_id: i64,
) -> Result<Vec<ScheduleSlot>, PersistenceError> {
    let rows: Vec<ScheduleSlotRow> = schedule_slots::table
        .filter(schedule_slots::teacher_id.eq(teacher_id))
        .filter(schedule_slots::school_id.eq(school_id))
        .order(schedule_slots::slot_id.asc())
        .select(ScheduleSlotRow::as_select())
        .load(conn)?;

    Ok(decode_all(rows, ScheduleSlotRow::into_domain)?)
}

/// Lists every slot of a school.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn get_school_schedule_slots(
    conn: &mut SqliteConnection,
    school_id: i64,
) -> Result<Vec<ScheduleSlot>, PersistenceError> {
    let rows: Vec<ScheduleSlotRow> = schedule_slots::table
        .filter(schedule_slots::school_id.eq(school_id))
        .order(schedule_slots::slot_id.asc())
        .select(ScheduleSlotRow::as_select())
        .load(conn)?;

    Ok(decode_all(rows, ScheduleSlotRow::into_domain)?)
}

/// Finds the slot a teacher owns at a weekday and period.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn find_schedule_slot(
    conn: &mut SqliteConnection,
    teacher_id: i64,
    weekday: Weekday,
    period_index: PeriodIndex,
) -> Result<Option<ScheduleSlot>, PersistenceError> {
    let row: Option<ScheduleSlotRow> = schedule_slots::table
        .filter(schedule_slots::teacher_id.eq(teacher_id))
        .filter(schedule_slots::weekday.eq(i32::from(weekday.number())))
        .filter(schedule_slots::period_index.eq(i32::from(period_index.value())))
        .select(ScheduleSlotRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(ScheduleSlotRow::into_domain).transpose()?)
}
