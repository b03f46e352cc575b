// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{add_admin, add_slot, add_teacher, create_test_school};
use crate::{
    CandidateResolver, InMemoryStore, TimetableStore, assign_substitutes, find_substitute,
};
use autosub_domain::{PeriodIndex, School, Teacher, Weekday};
use time::macros::date;

#[test]
fn test_empty_pool_finds_nobody() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");

    let resolver: CandidateResolver =
        CandidateResolver::load(&mut store, school.school_id).unwrap();

    assert!(
        resolver
            .find_substitute(Weekday::MONDAY, PeriodIndex::new(0), &[t1.teacher_id])
            .is_none()
    );
}

#[test]
fn test_candidate_pool_is_sorted_active_teachers() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    add_admin(&mut store, school.school_id, "Head Office");
    let t3: Teacher = add_teacher(&mut store, school.school_id, "Cara Lim");
    let t4: Teacher = add_teacher(&mut store, school.school_id, "Dev Shah");
    store.set_teacher_active(t3.teacher_id, false).unwrap();

    let resolver: CandidateResolver =
        CandidateResolver::load(&mut store, school.school_id).unwrap();
    let ids: Vec<i64> = resolver.candidates().iter().map(|t| t.teacher_id).collect();

    assert_eq!(ids, vec![t1.teacher_id, t4.teacher_id]);
}

#[test]
fn test_from_parts_sorts_unordered_input() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    let t2: Teacher = add_teacher(&mut store, school.school_id, "Ben Ode");

    let resolver: CandidateResolver =
        CandidateResolver::from_parts(vec![t2, t1.clone()], &[], &[]);
    let found: &Teacher = resolver
        .find_substitute(Weekday::MONDAY, PeriodIndex::new(0), &[])
        .unwrap();

    assert_eq!(found.teacher_id, t1.teacher_id);
}

#[test]
fn test_mark_busy_hides_candidate_for_that_time_only() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    let t2: Teacher = add_teacher(&mut store, school.school_id, "Ben Ode");

    let mut resolver: CandidateResolver =
        CandidateResolver::load(&mut store, school.school_id).unwrap();
    resolver.mark_busy(t1.teacher_id, Weekday::MONDAY, PeriodIndex::new(2));

    let busy_slot: &Teacher = resolver
        .find_substitute(Weekday::MONDAY, PeriodIndex::new(2), &[])
        .unwrap();
    assert_eq!(busy_slot.teacher_id, t2.teacher_id);

    let other_slot: &Teacher = resolver
        .find_substitute(Weekday::MONDAY, PeriodIndex::new(3), &[])
        .unwrap();
    assert_eq!(other_slot.teacher_id, t1.teacher_id);
}

#[test]
fn test_store_lookup_matches_prefetched_index() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let school: School = create_test_school(&mut store, "Riverside");
    let t1: Teacher = add_teacher(&mut store, school.school_id, "Asha Rao");
    let t2: Teacher = add_teacher(&mut store, school.school_id, "Ben Ode");
    let t3: Teacher = add_teacher(&mut store, school.school_id, "Cara Lim");
    let t4: Teacher = add_teacher(&mut store, school.school_id, "Dev Shah");
    add_slot(&mut store, &t1, Weekday::MONDAY, 0, "Math", "8A");
    add_slot(&mut store, &t2, Weekday::TUESDAY, 1, "Math", "8A");
    // t2 now substitutes Monday period 0.
    assign_substitutes(
        &mut store,
        school.school_id,
        t1.teacher_id,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 02),
    )
    .unwrap();
    add_slot(&mut store, &t3, Weekday::MONDAY, 0, "Art", "6A");

    let resolver: CandidateResolver =
        CandidateResolver::load(&mut store, school.school_id).unwrap();

    for weekday in [Weekday::MONDAY, Weekday::TUESDAY, Weekday::WEDNESDAY] {
        for period in 0..3 {
            let period: PeriodIndex = PeriodIndex::new(period);
            let indexed: Option<i64> = resolver
                .find_substitute(weekday, period, &[t1.teacher_id])
                .map(|t| t.teacher_id);
            let queried: Option<i64> =
                find_substitute(&mut store, school.school_id, weekday, period, &[t1.teacher_id])
                    .unwrap()
                    .map(|t| t.teacher_id);
            assert_eq!(indexed, queried, "{weekday} {period}");
        }
    }

    let monday_first: Option<Teacher> = find_substitute(
        &mut store,
        school.school_id,
        Weekday::MONDAY,
        PeriodIndex::new(0),
        &[t1.teacher_id],
    )
    .unwrap();
    assert_eq!(monday_first.map(|t| t.teacher_id), Some(t4.teacher_id));
    assert!(
        store
            .find_substitution_by_weekday_period(
                t2.teacher_id,
                Weekday::MONDAY,
                PeriodIndex::new(0)
            )
            .unwrap()
            .is_some()
    );
}
