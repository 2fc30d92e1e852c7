use crate::model::network::{AttributeBag, AttributeValue, Scalar};
use itertools::Itertools;
use std::collections::BTreeMap;

/// merges the attribute bags of consecutive edges along a path into one bag.
///
/// for each key the values are gathered in traversal order. accumulator keys
/// keep the full list, with a null standing in for an edge that lacks the key
/// so that positions line up with the constituent segments. every other key
/// collapses to a scalar when all gathered values agree and otherwise keeps
/// the distinct values in order of first appearance. values that are already
/// lists (edges merged in an earlier pass) are flattened.
pub fn merge_attributes(bags: &[&AttributeBag], accumulator_keys: &[&str]) -> AttributeBag {
    let mut gathered: BTreeMap<&str, Vec<Scalar>> = BTreeMap::new();
    for bag in bags.iter() {
        for (key, value) in bag.iter() {
            if accumulator_keys.contains(&key.as_str()) {
                continue;
            }
            gathered
                .entry(key.as_str())
                .or_default()
                .extend(value.values().iter().cloned());
        }
    }
    let mut merged: AttributeBag = gathered
        .into_iter()
        .map(|(key, values)| (String::from(key), collapse(values)))
        .collect();

    for key in accumulator_keys.iter() {
        if !bags.iter().any(|b| b.contains_key(key)) {
            continue;
        }
        let values = bags
            .iter()
            .flat_map(|b| match b.get(key) {
                Some(value) => value.values().to_vec(),
                None => vec![Scalar::Null],
            })
            .collect_vec();
        let _ = merged.insert(*key, AttributeValue::List(values));
    }
    merged
}

/// a single distinct value becomes a scalar, several stay a list.
fn collapse(values: Vec<Scalar>) -> AttributeValue {
    let mut unique = values.into_iter().unique().collect_vec();
    if unique.len() == 1 {
        match unique.pop() {
            Some(value) => AttributeValue::Scalar(value),
            None => AttributeValue::null(),
        }
    } else {
        AttributeValue::List(unique)
    }
}
