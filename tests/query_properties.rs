//! Property-based tests for query composition
//!
//! Filters are generated as random subsets over synthetic records and checked
//! against a per-filter oracle.

use chrono::Utc;
use proptest::prelude::*;
use student_records::students::query::{
    FindQuery, SortField, SortOrder, StudentFilter, StudentQuery, StudentQueryParams,
};
use student_records::students::types::{NewStudent, StudentId, StudentRecord};

const COURSES: [&str; 4] = ["Physics", "Biology", "History", "Computer Science"];

fn record_strategy() -> impl Strategy<Value = StudentRecord> {
    (
        "[A-Z][a-z]{2,8}",
        0u32..40,
        prop::sample::select(COURSES.to_vec()),
        any::<bool>(),
    )
        .prop_map(|(name, age, course, active)| {
            NewStudent::new(&name, age, course)
                .with_active(active)
                .into_record(StudentId::new(), Utc::now())
        })
}

fn filter_strategy() -> impl Strategy<Value = StudentFilter> {
    prop_oneof![
        any::<bool>().prop_map(StudentFilter::Active),
        prop::sample::select(COURSES.to_vec()).prop_map(|c| StudentFilter::Course(c.to_string())),
        (0u32..40).prop_map(StudentFilter::MaxAge),
    ]
}

fn sort_strategy() -> impl Strategy<Value = (SortField, SortOrder)> {
    (
        prop_oneof![
            Just(SortField::Name),
            Just(SortField::Age),
            Just(SortField::Course)
        ],
        prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)],
    )
}

fn ids(records: &[StudentRecord]) -> Vec<StudentId> {
    records.iter().map(|r| r.id.clone()).collect()
}

/// Property: the result of a filtered query SHALL equal the intersection of
/// the records matched by each filter alone, in natural order.
#[test]
fn prop_filters_are_intersection_of_single_filters() {
    proptest!(|(
        records in prop::collection::vec(record_strategy(), 0..60),
        filters in prop::collection::vec(filter_strategy(), 0..4),
    )| {
        let query = filters
            .iter()
            .cloned()
            .fold(FindQuery::new(), |q, f| q.with_filter(f));

        let expected: Vec<StudentId> = records
            .iter()
            .filter(|record| {
                filters.iter().all(|filter| {
                    let alone = FindQuery::new().with_filter(filter.clone()).apply(std::slice::from_ref(*record));
                    alone.len() == 1
                })
            })
            .map(|r| r.id.clone())
            .collect();

        prop_assert_eq!(ids(&query.apply(&records)), expected);
    });
}

/// Property: reordering the filters SHALL NOT change the result.
#[test]
fn prop_filter_order_is_irrelevant() {
    proptest!(|(
        records in prop::collection::vec(record_strategy(), 0..60),
        filters in prop::collection::vec(filter_strategy(), 0..4),
    )| {
        let forward = filters
            .iter()
            .cloned()
            .fold(FindQuery::new(), |q, f| q.with_filter(f));
        let backward = filters
            .iter()
            .rev()
            .cloned()
            .fold(FindQuery::new(), |q, f| q.with_filter(f));

        prop_assert_eq!(ids(&forward.apply(&records)), ids(&backward.apply(&records)));
    });
}

/// Property: a sorted result SHALL be ordered on the chosen field and be a
/// permutation of the unsorted filtered result.
#[test]
fn prop_sort_orders_without_losing_records() {
    proptest!(|(
        records in prop::collection::vec(record_strategy(), 0..60),
        filters in prop::collection::vec(filter_strategy(), 0..3),
        (field, order) in sort_strategy(),
    )| {
        let unsorted = filters
            .iter()
            .cloned()
            .fold(FindQuery::new(), |q, f| q.with_filter(f));
        let sorted = unsorted.clone().sorted_by(field, order);

        let plain = unsorted.apply(&records);
        let ordered = sorted.apply(&records);

        let mut plain_ids: Vec<String> = plain.iter().map(|r| r.id.to_string()).collect();
        let mut ordered_ids: Vec<String> = ordered.iter().map(|r| r.id.to_string()).collect();
        plain_ids.sort();
        ordered_ids.sort();
        prop_assert_eq!(plain_ids, ordered_ids);

        for pair in ordered.windows(2) {
            let ordering = match field {
                SortField::Name => pair[0].name.cmp(&pair[1].name),
                SortField::Age => pair[0].age.cmp(&pair[1].age),
                SortField::Course => pair[0].course.cmp(&pair[1].course),
            };
            match order {
                SortOrder::Asc => prop_assert!(ordering.is_le()),
                SortOrder::Desc => prop_assert!(ordering.is_ge()),
            }
        }
    });
}

/// Property: any `id` parameter SHALL produce an id lookup, whatever else is set.
#[test]
fn prop_id_short_circuits() {
    proptest!(|(
        id in "[a-f0-9]{1,24}",
        active in proptest::option::of("[a-z]{0,5}"),
        course in proptest::option::of("[A-Za-z ]{0,12}"),
        age in proptest::option::of("[a-z0-9]{0,4}"),
        sort in proptest::option::of("[a-z]{0,6}"),
    )| {
        let params = StudentQueryParams {
            id: Some(id.clone()),
            sort,
            order: Some("desc".to_string()),
            active,
            course,
            age,
        };

        prop_assert_eq!(
            StudentQuery::from_params(&params),
            Ok(StudentQuery::ById(StudentId::from(id.as_str())))
        );
    });
}

/// Property: any non-negative integer age SHALL become an inclusive bound.
#[test]
fn prop_numeric_age_is_inclusive_bound() {
    proptest!(|(
        records in prop::collection::vec(record_strategy(), 0..60),
        max_age in 0u32..40,
    )| {
        let params = StudentQueryParams {
            age: Some(max_age.to_string()),
            ..StudentQueryParams::default()
        };

        let StudentQuery::Find(query) = StudentQuery::from_params(&params).unwrap() else {
            panic!("age alone must not produce an id lookup");
        };

        let results = query.apply(&records);
        prop_assert!(results.iter().all(|r| r.age <= max_age));
        prop_assert_eq!(
            results.len(),
            records.iter().filter(|r| r.age <= max_age).count()
        );
    });
}
