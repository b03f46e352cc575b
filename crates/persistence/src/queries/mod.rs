// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every list is returned in ascending primary key order so the engines
//! see the same order regardless of how the rows were written.

pub mod leaves;
pub mod schools;
pub mod slots;
pub mod substitutions;
pub mod teachers;
