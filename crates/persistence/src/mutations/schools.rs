// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::schools;
use crate::error::PersistenceError;
use autosub_domain::{NewSchool, School};

/// Inserts a school.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_school(
    conn: &mut SqliteConnection,
    school: &NewSchool,
) -> Result<School, PersistenceError> {
    diesel::insert_into(schools::table)
        .values((
            schools::name.eq(&school.name),
            schools::period_count.eq(i32::from(school.timetable.period_count())),
            schools::period_duration_minutes
                .eq(i32::from(school.timetable.period_duration_minutes())),
            schools::start_hour.eq(i32::from(school.timetable.start_hour())),
            schools::start_minute.eq(i32::from(school.timetable.start_minute())),
        ))
        .execute(conn)?;

    let school_id: i64 = get_last_insert_rowid(conn)?;
    info!(school_id, name = %school.name, "Created school");

    Ok(School {
        school_id,
        name: school.name.clone(),
        timetable: school.timetable,
    })
}
