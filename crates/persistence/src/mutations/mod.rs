// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes.
//!
//! Inserts return the stored record with the id `SQLite` assigned.
//! Uniqueness and foreign key failures surface as
//! `PersistenceError::ConstraintViolation`.

pub mod leaves;
pub mod schools;
pub mod slots;
pub mod substitutions;
pub mod teachers;
