// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for AutoSubstitute.
//!
//! [`Persistence`] owns a single Diesel connection and implements the
//! engine's [`TimetableStore`](autosub::TimetableStore) and
//! [`LeaveStore`](autosub::LeaveStore) traits, so the assignment and
//! conflict engines run unchanged against the database.
//!
//! Queries and mutations are plain functions over `&mut SqliteConnection`
//! in [`queries`] and [`mutations`]. The adapter only dispatches to them.
//!
//! ## Storage conventions
//!
//! - weekdays are `0` (Sunday) to `6` (Saturday)
//! - period indices are 0-based
//! - calendar dates are `YYYY-MM-DD` text
//! - `assigned_at` is RFC 3339 text

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use autosub_domain::{NewScheduleSlot, NewSchool, NewTeacher, ScheduleSlot, School, Teacher};

pub mod backend;
mod data_models;
mod diesel_schema;
mod error;
pub mod mutations;
pub mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::{PersistenceError, RowDecodeError};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over one `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Shared-cache name per call keeps tests isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::configure_file_database(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        info!(path = path_str, "Opened database file");
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Creates a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_school(&mut self, school: &NewSchool) -> Result<School, PersistenceError> {
        mutations::schools::create_school(&mut self.conn, school)
    }

    /// Creates an active staff member.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` if the email is taken or the school
    /// does not exist.
    pub fn create_teacher(&mut self, teacher: &NewTeacher) -> Result<Teacher, PersistenceError> {
        mutations::teachers::create_teacher(&mut self.conn, teacher)
    }

    /// Activates or deactivates a staff member.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the teacher does not exist.
    pub fn set_teacher_active(
        &mut self,
        teacher_id: i64,
        is_active: bool,
    ) -> Result<Teacher, PersistenceError> {
        mutations::teachers::set_teacher_active(&mut self.conn, teacher_id, is_active)
    }

    /// Creates a schedule slot.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` if the teacher is not on the school's
    /// staff or already teaches at that weekday and period.
    pub fn create_schedule_slot(
        &mut self,
        slot: &NewScheduleSlot,
    ) -> Result<ScheduleSlot, PersistenceError> {
        mutations::slots::create_schedule_slot(&mut self.conn, slot)
    }

    /// Retrieves a school by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_school(&mut self, school_id: i64) -> Result<Option<School>, PersistenceError> {
        queries::schools::get_school(&mut self.conn, school_id)
    }

    /// Retrieves a teacher by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_teacher(&mut self, teacher_id: i64) -> Result<Option<Teacher>, PersistenceError> {
        queries::teachers::get_teacher(&mut self.conn, teacher_id)
    }

    /// Lists all staff of a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_teachers(&mut self, school_id: i64) -> Result<Vec<Teacher>, PersistenceError> {
        queries::teachers::list_teachers(&mut self.conn, school_id)
    }

    /// Lists every slot of a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_schedule_slots(
        &mut self,
        school_id: i64,
    ) -> Result<Vec<ScheduleSlot>, PersistenceError> {
        queries::slots::get_school_schedule_slots(&mut self.conn, school_id)
    }
}
