//! Property-based tests for `ReservationRecord`.

use super::{ReservationRecord, RESERVED_ATTRIBUTE_KEYS};
use crate::ListingName;
use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::Value;

// Strategy for generating calendar dates between 2000 and 2040
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2040, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

// Strategy for generating scalar attribute values
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z ]{0,20}".prop_map(Value::from),
    ]
}

// Strategy for generating attribute maps that avoid the record's own fields
fn attributes_strategy() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec(("[a-z][a-zA-Z]{0,12}", value_strategy()), 0..6).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(k, _)| !RESERVED_ATTRIBUTE_KEYS.contains(&k.as_str()))
            .collect()
    })
}

fn build(dates: &[NaiveDate], attributes: Vec<(String, Value)>) -> ReservationRecord {
    ReservationRecord::builder(ListingName::new("Infinite Views").unwrap())
        .dates(dates.iter().copied())
        .attributes(attributes)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Attribute insertion order never changes the stored document
    #[test]
    fn document_independent_of_attribute_order(
        dates in prop::collection::vec(date_strategy(), 1..5),
        attributes in attributes_strategy(),
    ) {
        // Later duplicates win in a map, so dedupe keys before comparing
        let mut seen = std::collections::HashSet::new();
        let unique: Vec<_> = attributes
            .into_iter()
            .filter(|(k, _)| seen.insert(k.clone()))
            .collect();
        let mut unique_reversed = unique.clone();
        unique_reversed.reverse();

        let a = build(&dates, unique);
        let b = build(&dates, unique_reversed);
        prop_assert_eq!(a.to_document().unwrap(), b.to_document().unwrap());
    }

    // Document equality coincides with record equality
    #[test]
    fn document_equality_matches_record_equality(
        dates_a in prop::collection::vec(date_strategy(), 1..4),
        dates_b in prop::collection::vec(date_strategy(), 1..4),
        attributes_a in attributes_strategy(),
        attributes_b in attributes_strategy(),
    ) {
        let a = build(&dates_a, attributes_a);
        let b = build(&dates_b, attributes_b);
        prop_assert_eq!(a == b, a.to_document().unwrap() == b.to_document().unwrap());
    }

    // Decoding a stored document yields the same record
    #[test]
    fn decoded_document_equals_record(
        dates in prop::collection::vec(date_strategy(), 1..5),
        attributes in attributes_strategy(),
    ) {
        let record = build(&dates, attributes);
        let decoded = ReservationRecord::from_document(&record.to_document().unwrap()).unwrap();
        prop_assert_eq!(decoded, record);
    }
}
