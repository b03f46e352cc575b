// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{FailingStore, add_admin, add_slot, add_teacher, create_test_school};
use crate::{
    AssignmentOutcome, CoreError, InMemoryStore, SUBSTITUTION_REASON, TimetableStore,
    assign_substitutes,
};
use autosub_domain::{DomainError, PeriodIndex, School, Substitution, Teacher, Weekday};
use std::collections::HashSet;
use time::macros::date;

// 2026-03-02 is a Monday.

#[test]
fn test_leave_over_two_days_is_covered_by_free_teacher() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    let t2: Teacher = add_teacher(&mut store, school.school_id, "Ben Ode");
    add_slot(&mut store, &t1, Weekday::MONDAY, 0, "Math", "8A");
    add_slot(&mut store, &t1, Weekday::TUESDAY, 1, "Math", "8A");

    let outcome: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 03),
    )
    .unwrap();

    assert_eq!(outcome.assignments.len(), 2);
    assert!(outcome.uncovered.is_empty());
    assert!(outcome.is_fully_covered());
    for assignment in &outcome.assignments {
        assert_eq!(assignment.substitute.teacher_id, t2.teacher_id);
        assert_eq!(assignment.substitution.original_teacher_id, t1.teacher_id);
        assert_eq!(assignment.substitution.school_id, school.school_id);
        assert_eq!(assignment.substitution.reason, SUBSTITUTION_REASON);
    }
    assert_eq!(outcome.assignments[0].date, date!(2026 - 03 - 02));
    assert_eq!(outcome.assignments[1].date, date!(2026 - 03 - 03));
}

#[test]
fn test_slot_is_uncovered_when_only_candidate_teaches_then() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    let t2: Teacher = add_teacher(&mut store, school.school_id, "Ben Ode");
    let monday = add_slot(&mut store, &t1, Weekday::MONDAY, 0, "Math", "8A");
    add_slot(&mut store, &t1, Weekday::TUESDAY, 1, "Math", "8A");
    add_slot(&mut store, &t2, Weekday::MONDAY, 0, "Physics", "9B");

    let outcome: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 02),
    )
    .unwrap();

    assert!(outcome.assignments.is_empty());
    assert_eq!(outcome.uncovered.len(), 1);
    assert_eq!(outcome.uncovered[0].slot, monday);
    assert_eq!(outcome.uncovered[0].date, date!(2026 - 03 - 02));
    assert_eq!(store.substitutions().count(), 0);
}

#[test]
fn test_every_affected_occurrence_is_accounted_for() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    add_teacher(&mut store, school.school_id, "Ben Ode");
    add_slot(&mut store, &t1, Weekday::MONDAY, 0, "Math", "8A");
    add_slot(&mut store, &t1, Weekday::MONDAY, 1, "Math", "8B");
    add_slot(&mut store, &t1, Weekday::WEDNESDAY, 3, "Math", "9A");

    // Two full weeks: two Mondays and two Wednesdays.
    let outcome: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 15),
    )
    .unwrap();

    assert_eq!(outcome.total_affected(), 6);
    assert_eq!(
        outcome.assignments.len() + outcome.uncovered.len(),
        outcome.total_affected()
    );
}

#[test]
fn test_substitute_is_not_reused_for_same_weekday_period_across_weeks() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    let t2: Teacher = add_teacher(&mut store, school.school_id, "Ben Ode");
    add_slot(&mut store, &t1, Weekday::MONDAY, 0, "Math", "8A");

    let outcome: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 09),
    )
    .unwrap();

    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(outcome.assignments[0].substitute.teacher_id, t2.teacher_id);
    assert_eq!(outcome.uncovered.len(), 1);
    assert_eq!(outcome.uncovered[0].date, date!(2026 - 03 - 09));
}

#[test]
fn test_no_substitute_is_double_booked_within_a_run() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    add_teacher(&mut store, school.school_id, "Ben Ode");
    add_teacher(&mut store, school.school_id, "Cara Lim");
    add_slot(&mut store, &t1, Weekday::MONDAY, 0, "Math", "8A");
    add_slot(&mut store, &t1, Weekday::MONDAY, 2, "Math", "8B");
    add_slot(&mut store, &t1, Weekday::THURSDAY, 0, "Math", "9A");

    let outcome: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 15),
    )
    .unwrap();

    assert_eq!(outcome.assignments.len(), 6);
    let mut seen: HashSet<(Weekday, PeriodIndex, i64)> = HashSet::new();
    for assignment in &outcome.assignments {
        let key: (Weekday, PeriodIndex, i64) = (
            assignment.slot.weekday,
            assignment.slot.period_index,
            assignment.substitute.teacher_id,
        );
        assert!(seen.insert(key), "substitute double-booked: {key:?}");
    }
}

#[test]
fn test_candidate_teaching_at_same_time_is_skipped() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    let t2: Teacher = add_teacher(&mut store, school.school_id, "Ben Ode");
    let t3: Teacher = add_teacher(&mut store, school.school_id, "Cara Lim");
    add_slot(&mut store, &t1, Weekday::MONDAY, 4, "Math", "8A");
    add_slot(&mut store, &t2, Weekday::MONDAY, 4, "History", "7C");

    let outcome: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 02),
    )
    .unwrap();

    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(outcome.assignments[0].substitute.teacher_id, t3.teacher_id);
}

#[test]
fn test_candidates_are_tried_in_ascending_id_order() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    let t2: Teacher = add_teacher(&mut store, school.school_id, "Ben Ode");
    let t3: Teacher = add_teacher(&mut store, school.school_id, "Cara Lim");
    add_slot(&mut store, &t1, Weekday::FRIDAY, 0, "Math", "8A");

    let first: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 06),
        date!(2026 - 03 - 06),
    )
    .unwrap();
    assert_eq!(first.assignments[0].substitute.teacher_id, t2.teacher_id);

    store.set_teacher_active(t2.teacher_id, false).unwrap();
    add_slot(&mut store, &t1, Weekday::FRIDAY, 1, "Math", "8B");
    let t4: Teacher = add_teacher(&mut store, school.school_id, "Dev Shah");
    add_slot(&mut store, &t4, Weekday::FRIDAY, 1, "Art", "6A");

    let second: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t4.teacher_id,
        date!(2026 - 03 - 06),
        date!(2026 - 03 - 06),
    )
    .unwrap();
    assert_eq!(second.assignments[0].substitute.teacher_id, t3.teacher_id);
}

#[test]
fn test_admins_and_inactive_teachers_are_never_substitutes() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    add_admin(&mut store, school.school_id, "Head Office");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    let t2: Teacher = add_teacher(&mut store, school.school_id, "Ben Ode");
    store.set_teacher_active(t2.teacher_id, false).unwrap();
    add_slot(&mut store, &t1, Weekday::MONDAY, 0, "Math", "8A");

    let outcome: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 02),
    )
    .unwrap();

    assert!(outcome.assignments.is_empty());
    assert_eq!(outcome.uncovered.len(), 1);
}

#[test]
fn test_substitutions_from_earlier_runs_make_candidates_busy() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    let t2: Teacher = add_teacher(&mut store, school.school_id, "Ben Ode");
    let t3: Teacher = add_teacher(&mut store, school.school_id, "Cara Lim");
    let t4: Teacher = add_teacher(&mut store, school.school_id, "Dev Shah");
    add_slot(&mut store, &t1, Weekday::MONDAY, 0, "Math", "8A");
    add_slot(&mut store, &t4, Weekday::MONDAY, 0, "Art", "6A");

    let first: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 02),
    )
    .unwrap();
    assert_eq!(first.assignments[0].substitute.teacher_id, t2.teacher_id);

    let second: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t4.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 02),
    )
    .unwrap();
    assert_eq!(second.assignments[0].substitute.teacher_id, t3.teacher_id);
}

#[test]
fn test_running_twice_records_duplicate_substitutions() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    add_teacher(&mut store, school.school_id, "Ben Ode");
    add_teacher(&mut store, school.school_id, "Cara Lim");
    let monday = add_slot(&mut store, &t1, Weekday::MONDAY, 0, "Math", "8A");
    let tuesday = add_slot(&mut store, &t1, Weekday::TUESDAY, 1, "Math", "8A");

    for _ in 0..2 {
        assign_substitutes(
            &mut store,
            school.school_id,
            t1.teacher_id,
            date!(2026 - 03 - 02),
            date!(2026 - 03 - 03),
        )
        .unwrap();
    }

    let substitutions: Vec<&Substitution> = store.substitutions().collect();
    assert_eq!(substitutions.len(), 4);
    for slot in [&monday, &tuesday] {
        let per_slot: usize = substitutions
            .iter()
            .filter(|s| s.schedule_slot_id == slot.slot_id)
            .count();
        assert_eq!(per_slot, 2);
    }
}

#[test]
fn test_weekend_slots_are_included() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    add_teacher(&mut store, school.school_id, "Ben Ode");
    add_slot(&mut store, &t1, Weekday::SATURDAY, 0, "Sport", "8A");

    let outcome: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 07),
        date!(2026 - 03 - 08),
    )
    .unwrap();

    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(outcome.assignments[0].date, date!(2026 - 03 - 07));
}

#[test]
fn test_occurrences_are_processed_by_date_then_period() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    add_teacher(&mut store, school.school_id, "Ben Ode");
    add_teacher(&mut store, school.school_id, "Cara Lim");
    add_slot(&mut store, &t1, Weekday::TUESDAY, 5, "Math", "8A");
    add_slot(&mut store, &t1, Weekday::TUESDAY, 1, "Math", "8B");
    add_slot(&mut store, &t1, Weekday::MONDAY, 3, "Math", "9A");

    let outcome: AssignmentOutcome = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 03),
    )
    .unwrap();

    let order: Vec<(Weekday, u8)> = outcome
        .assignments
        .iter()
        .map(|a| (a.slot.weekday, a.slot.period_index.value()))
        .collect();
    assert_eq!(
        order,
        vec![
            (Weekday::MONDAY, 3),
            (Weekday::TUESDAY, 1),
            (Weekday::TUESDAY, 5)
        ]
    );
}

#[test]
fn test_invalid_range_is_rejected_before_any_write() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    add_teacher(&mut store, school.school_id, "Ben Ode");
    add_slot(&mut store, &t1, Weekday::MONDAY, 0, "Math", "8A");

    let result = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 03),
        date!(2026 - 03 - 02),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidRange { .. }))
    ));
    assert_eq!(store.substitutions().count(), 0);
}

#[test]
fn test_unknown_school_or_teacher_is_not_found() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let other: School = create_test_school(&mut store, "Hillcrest");
    let outsider: Teacher = add_teacher(&mut store, other.school_id, "Eve Park");

    assert_eq!(
        assign_substitutes(
            &mut store,
            99,
            outsider.teacher_id,
            date!(2026 - 03 - 02),
            date!(2026 - 03 - 02)
        ),
        Err(CoreError::NotFound {
            entity: "school",
            id: 99
        })
    );
    assert_eq!(
        assign_substitutes(
            &mut store,
            school.school_id,
            42,
            date!(2026 - 03 - 02),
            date!(2026 - 03 - 02)
        ),
        Err(CoreError::NotFound {
            entity: "teacher",
            id: 42
        })
    );
    assert_eq!(
        assign_substitutes(
            &mut store,
            school.school_id,
            outsider.teacher_id,
            date!(2026 - 03 - 02),
            date!(2026 - 03 - 02)
        ),
        Err(CoreError::NotFound {
            entity: "teacher",
            id: outsider.teacher_id
        })
    );
}

#[test]
fn test_write_failure_returns_partial_outcome_and_untried_occurrences() {
    let mut inner: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut inner, "Riverside");
    let t1: Teacher = add_teacher(&mut inner, school.school_id, "Asha Rao");
    add_teacher(&mut inner, school.school_id, "Ben Ode");
    add_slot(&mut inner, &t1, Weekday::MONDAY, 0, "Math", "8A");
    add_slot(&mut inner, &t1, Weekday::MONDAY, 1, "Math", "8B");
    add_slot(&mut inner, &t1, Weekday::MONDAY, 2, "Math", "8C");

    let mut store: FailingStore = FailingStore::new(inner, 1);
    let result = assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 02),
    );

    let (partial, untried) = match result {
        Err(CoreError::Interrupted {
            partial, untried, ..
        }) => (partial, untried),
        other => panic!("expected an interrupted run, got {other:?}"),
    };
    assert_eq!(partial.assignments.len(), 1);
    assert!(partial.uncovered.is_empty());
    assert_eq!(untried.len(), 2);
    assert_eq!(untried[0].slot.period_index, PeriodIndex::new(1));
    assert_eq!(untried[1].slot.period_index, PeriodIndex::new(2));

    // The first write stays in place.
    assert!(
        store
            .substitution_exists_for_slot(partial.assignments[0].slot.slot_id)
            .unwrap()
    );
}
