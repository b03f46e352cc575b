// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::Weekday;
use crate::error::DomainError;
use crate::timetable::TimetableConfig;
use crate::validation::{validate_class_section, validate_email, validate_name, validate_subject};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The role a staff member holds within a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeacherRole {
    /// A teaching staff member. Only teachers are considered as substitutes.
    #[default]
    Teacher,
    /// A school administrator. Receives conflict summaries.
    Admin,
}

impl TeacherRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for TeacherRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(Self::Teacher),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for TeacherRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 0-based position of a teaching period within a school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodIndex(u8);

impl PeriodIndex {
    /// Creates a period index.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the 0-based index.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the 1-based period number shown to people.
    #[must_use]
    pub const fn display_number(self) -> u16 {
        self.0 as u16 + 1
    }
}

impl std::fmt::Display for PeriodIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Period {}", self.display_number())
    }
}

/// A school: the scoping boundary for teachers, slots and substitutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    /// The canonical identifier.
    pub school_id: i64,
    /// Display name.
    pub name: String,
    /// School day configuration.
    pub timetable: TimetableConfig,
}

/// Validated input for creating a school.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    /// Display name.
    pub name: String,
    /// School day configuration.
    pub timetable: TimetableConfig,
}

impl NewSchool {
    /// Creates a validated school definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty.
    pub fn new(name: &str, timetable: TimetableConfig) -> Result<Self, DomainError> {
        let name: String = name.trim().to_string();
        validate_name(&name)?;
        Ok(Self { name, timetable })
    }
}

/// A staff member of a school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// The canonical identifier. Candidate order is ascending by this value.
    pub teacher_id: i64,
    /// The school the teacher belongs to.
    pub school_id: i64,
    /// Display name.
    pub name: String,
    /// Contact address for notices.
    pub email: String,
    /// Role within the school.
    pub role: TeacherRole,
    /// Inactive teachers are never substitutes and their slots are not reported.
    pub is_active: bool,
}

impl Teacher {
    /// Whether this staff member can be considered as a substitute.
    #[must_use]
    pub const fn is_candidate(&self) -> bool {
        self.is_active && matches!(self.role, TeacherRole::Teacher)
    }
}

/// Validated input for creating a teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeacher {
    /// The school the teacher belongs to.
    pub school_id: i64,
    /// Display name (trimmed).
    pub name: String,
    /// Contact address (trimmed, lowercased).
    pub email: String,
    /// Role within the school.
    pub role: TeacherRole,
}

impl NewTeacher {
    /// Creates a validated teacher definition.
    ///
    /// Email addresses are normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the email is malformed.
    pub fn new(
        school_id: i64,
        name: &str,
        email: &str,
        role: TeacherRole,
    ) -> Result<Self, DomainError> {
        let name: String = name.trim().to_string();
        let email: String = email.trim().to_lowercase();
        validate_name(&name)?;
        validate_email(&email)?;
        Ok(Self {
            school_id,
            name,
            email,
            role,
        })
    }
}

/// One teacher's recurring commitment at a weekday and period.
///
/// At most one slot exists per `(teacher, weekday, period_index)` within a school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// The canonical identifier.
    pub slot_id: i64,
    /// The school this slot belongs to.
    pub school_id: i64,
    /// The teacher who normally teaches this slot.
    pub teacher_id: i64,
    /// Day of the week.
    pub weekday: Weekday,
    /// Period within the day.
    pub period_index: PeriodIndex,
    /// Subject taught.
    pub subject: String,
    /// Class and section taught (e.g. `8A`).
    pub class_section: String,
}

/// Validated input for creating a schedule slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleSlot {
    /// The school this slot belongs to.
    pub school_id: i64,
    /// The teacher who teaches this slot.
    pub teacher_id: i64,
    /// Day of the week.
    pub weekday: Weekday,
    /// Period within the day.
    pub period_index: PeriodIndex,
    /// Subject taught.
    pub subject: String,
    /// Class and section taught.
    pub class_section: String,
}

impl NewScheduleSlot {
    /// Creates a validated slot definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject or class section is empty.
    pub fn new(
        school_id: i64,
        teacher_id: i64,
        weekday: Weekday,
        period_index: PeriodIndex,
        subject: &str,
        class_section: &str,
    ) -> Result<Self, DomainError> {
        let subject: String = subject.trim().to_string();
        let class_section: String = class_section.trim().to_string();
        validate_subject(&subject)?;
        validate_class_section(&class_section)?;
        Ok(Self {
            school_id,
            teacher_id,
            weekday,
            period_index,
            subject,
            class_section,
        })
    }
}

/// A record that a substitute covers a slot because its teacher is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// The canonical identifier.
    pub substitution_id: i64,
    /// The absent teacher.
    pub original_teacher_id: i64,
    /// The covering teacher.
    pub substitute_teacher_id: i64,
    /// The covered slot.
    pub schedule_slot_id: i64,
    /// The school.
    pub school_id: i64,
    /// Why the substitution exists.
    pub reason: String,
    /// When the substitution was recorded.
    pub assigned_at: OffsetDateTime,
}

/// Input for recording a substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubstitution {
    /// The absent teacher.
    pub original_teacher_id: i64,
    /// The covering teacher.
    pub substitute_teacher_id: i64,
    /// The covered slot.
    pub schedule_slot_id: i64,
    /// The school.
    pub school_id: i64,
    /// Why the substitution exists.
    pub reason: String,
    /// When the substitution was recorded.
    pub assigned_at: OffsetDateTime,
}
