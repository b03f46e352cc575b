// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{SchoolRow, decode_all};
use crate::diesel_schema::schools;
use crate::error::PersistenceError;
use autosub_domain::School;

/// Retrieves a school by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
/// Returns `Ok(None)` if the school is not found.
pub fn get_school(
    conn: &mut SqliteConnection,
    school_id: i64,
) -> Result<Option<School>, PersistenceError> {
    debug!(school_id, "Looking up school");

    let row: Option<SchoolRow> = schools::table
        .filter(schools::school_id.eq(school_id))
        .select(SchoolRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(SchoolRow::into_domain).transpose()?)
}

/// Lists every school.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_schools(conn: &mut SqliteConnection) -> Result<Vec<School>, PersistenceError> {
    let rows: Vec<SchoolRow> = schools::table
        .order(schools::school_id.asc())
        .select(SchoolRow::as_select())
        .load(conn)?;

    Ok(decode_all(rows, SchoolRow::into_domain)?)
}
