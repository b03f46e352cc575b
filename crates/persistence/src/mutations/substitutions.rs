// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::format_timestamp;
use crate::diesel_schema::substitutions;
use crate::error::PersistenceError;
use autosub_domain::{NewSubstitution, Substitution};

/// Records a substitution.
///
/// # Errors
///
/// Returns `ConstraintViolation` if a referenced teacher, slot or school is
/// missing.
pub fn create_substitution(
    conn: &mut SqliteConnection,
    substitution: &NewSubstitution,
) -> Result<Substitution, PersistenceError> {
    let assigned_at: String = format_timestamp(substitution.assigned_at)?;

    diesel::insert_into(substitutions::table)
        .values((
            substitutions::original_teacher_id.eq(substitution.original_teacher_id),
            substitutions::substitute_teacher_id.eq(substitution.substitute_teacher_id),
            substitutions::schedule_slot_id.eq(substitution.schedule_slot_id),
            substitutions::school_id.eq(substitution.school_id),
            substitutions::reason.eq(&substitution.reason),
            substitutions::assigned_at.eq(&assigned_at),
        ))
        .execute(conn)?;

    let substitution_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        substitution_id,
        slot_id = substitution.schedule_slot_id,
        substitute = substitution.substitute_teacher_id,
        "Recorded substitution"
    );

    Ok(Substitution {
        substitution_id,
        original_teacher_id: substitution.original_teacher_id,
        substitute_teacher_id: substitution.substitute_teacher_id,
        schedule_slot_id: substitution.schedule_slot_id,
        school_id: substitution.school_id,
        reason: substitution.reason.clone(),
        assigned_at: substitution.assigned_at,
    })
}
