// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{schedule_slots, teachers};
use crate::error::PersistenceError;
use autosub_domain::{NewScheduleSlot, ScheduleSlot};

/// Inserts a schedule slot.
///
/// # Errors
///
/// Returns `ConstraintViolation` if the teacher does not belong to the
/// school or already has a slot at that weekday and period.
pub fn create_schedule_slot(
    conn: &mut SqliteConnection,
    slot: &NewScheduleSlot,
) -> Result<ScheduleSlot, PersistenceError> {
    let owner_school: Option<i64> = teachers::table
        .filter(teachers::teacher_id.eq(slot.teacher_id))
        .select(teachers::school_id)
        .first(conn)
        .optional()?;
    if owner_school != Some(slot.school_id) {
        return Err(PersistenceError::ConstraintViolation(format!(
            "Teacher {} is not on the staff of school {}",
            slot.teacher_id, slot.school_id
        )));
    }

    diesel::insert_into(schedule_slots::table)
        .values((
            schedule_slots::school_id.eq(slot.school_id),
            schedule_slots::teacher_id.eq(slot.teacher_id),
            schedule_slots::weekday.eq(i32::from(slot.weekday.number())),
            schedule_slots::period_index.eq(i32::from(slot.period_index.value())),
            schedule_slots::subject.eq(&slot.subject),
            schedule_slots::class_section.eq(&slot.class_section),
        ))
        .execute(conn)?;

    let slot_id: i64 = get_last_insert_rowid(conn)?;
    debug!(slot_id, teacher_id = slot.teacher_id, "Created schedule slot");

    Ok(ScheduleSlot {
        slot_id,
        school_id: slot.school_id,
        teacher_id: slot.teacher_id,
        weekday: slot.weekday,
        period_index: slot.period_index,
        subject: slot.subject.clone(),
        class_section: slot.class_section.clone(),
    })
}
