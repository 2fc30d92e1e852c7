use super::speed_limit::planar_length;
use crate::{
    config::ColumnNames,
    model::network::{AttributeBag, AttributeValue, EdgeRow, Scalar},
};
use itertools::Itertools;
use uom::si::length::meter;

/// finalizes the edges of the second simplification pass: sums the travel
/// time lists, recomputes the length from the merged geometry, optionally
/// reduces the speed limit list to a single value and drops the junction
/// flag columns.
pub fn aggregate_edges(edges: &mut [EdgeRow], columns: &ColumnNames, harmonize_speed_limits: bool) {
    for edge in edges.iter_mut() {
        let attributes = &mut edge.attributes;
        for key in columns.summed_keys() {
            sum_list_value(attributes, key);
        }
        if harmonize_speed_limits {
            if let Some(speed) = harmonized_speed_limit(attributes, columns) {
                let _ = attributes.insert(columns.speed_limit.as_str(), speed);
            }
        }
        attributes.set_f64(
            &columns.length,
            Some(planar_length(&edge.geometry).get::<meter>()),
        );
        for key in columns.junction_keys() {
            let _ = attributes.remove(key);
        }
    }
}

/// replaces a list value with the sum of its numeric entries, ignoring nulls.
/// scalars are left as they are.
pub fn sum_list_value(attributes: &mut AttributeBag, key: &str) {
    if let Some(value @ AttributeValue::List(_)) = attributes.get(key) {
        let sum = value.sum_f64();
        attributes.set_f64(key, sum);
    }
}

/// the speed limit of a merged edge: the only value when all segments agree,
/// otherwise the limit of the longest segment. None when the edge has no
/// speed limit list or its lengths do not line up with it.
pub fn harmonized_speed_limit(attributes: &AttributeBag, columns: &ColumnNames) -> Option<Scalar> {
    let speeds = match attributes.get(&columns.speed_limit)? {
        AttributeValue::Scalar(_) => return None,
        AttributeValue::List(values) => values,
    };
    let unique = speeds.iter().unique().collect_vec();
    if unique.len() == 1 {
        return unique.first().map(|s| (*s).clone());
    }
    let lengths = attributes.get(&columns.length)?.values();
    if lengths.len() != speeds.len() {
        log::warn!(
            "cannot harmonize speed limits: {} speeds but {} lengths",
            speeds.len(),
            lengths.len()
        );
        return None;
    }
    let longest = lengths
        .iter()
        .enumerate()
        .filter_map(|(i, l)| l.as_f64().map(|l| (i, l)))
        .fold(None, |acc: Option<(usize, f64)>, (i, l)| match acc {
            Some((_, best)) if best >= l => acc,
            _ => Some((i, l)),
        })?;
    speeds.get(longest.0).cloned()
}

#[cfg(test)]
mod tests {
    use super::{aggregate_edges, harmonized_speed_limit, sum_list_value};
    use crate::{
        config::ColumnNames,
        model::network::{AttributeBag, AttributeValue, CoordKey, EdgeRow, Scalar},
    };
    use geo::line_string;

    fn list(values: &[f64]) -> AttributeValue {
        AttributeValue::List(values.iter().map(|v| Scalar::Float(*v)).collect())
    }

    #[test]
    fn test_sum_ignores_nulls() {
        let mut bag = AttributeBag::new();
        let _ = bag.insert(
            "t",
            AttributeValue::List(vec![Scalar::Float(1.0), Scalar::Null, Scalar::Float(2.5)]),
        );
        let _ = bag.insert("s", 4.0);
        sum_list_value(&mut bag, "t");
        sum_list_value(&mut bag, "s");
        assert_eq!(bag.get_f64("t"), Some(3.5));
        assert_eq!(bag.get_f64("s"), Some(4.0));
    }

    #[test]
    fn test_longest_segment_speed() {
        let columns = ColumnNames::default();
        let mut bag = AttributeBag::new();
        let _ = bag.insert(columns.speed_limit.as_str(), list(&[50.0, 80.0, 60.0]));
        let _ = bag.insert(columns.length.as_str(), list(&[10.0, 300.0, 120.0]));
        assert_eq!(harmonized_speed_limit(&bag, &columns), Some(Scalar::Float(80.0)));

        let _ = bag.insert(columns.speed_limit.as_str(), list(&[40.0, 40.0, 40.0]));
        assert_eq!(harmonized_speed_limit(&bag, &columns), Some(Scalar::Float(40.0)));
    }

    #[test]
    fn test_aggregate_edges() {
        let columns = ColumnNames::default();
        let mut attributes = AttributeBag::new();
        let _ = attributes.insert(columns.free_flow_time.as_str(), list(&[0.5, 0.25]));
        let _ = attributes.insert(columns.rush_hour_time.as_str(), list(&[1.0, 0.5]));
        let _ = attributes.insert(columns.speed_limit.as_str(), list(&[50.0, 60.0]));
        let _ = attributes.insert(columns.length.as_str(), list(&[3.0, 2.0]));
        let _ = attributes.insert(columns.signal.as_str(), 1_i64);
        let mut edges = vec![EdgeRow {
            src: CoordKey::new(0.0, 0.0),
            dst: CoordKey::new(3.0, 4.0),
            attributes,
            geometry: line_string![(x: 0.0, y: 0.0), (x: 3.0, y: 4.0)],
        }];
        aggregate_edges(&mut edges, &columns, true);
        let a = &edges[0].attributes;
        assert_eq!(a.get_f64(&columns.free_flow_time), Some(0.75));
        assert_eq!(a.get_f64(&columns.rush_hour_time), Some(1.5));
        assert_eq!(a.get_f64(&columns.length), Some(5.0));
        assert_eq!(a.get_f64(&columns.speed_limit), Some(50.0));
        assert!(!a.contains_key(&columns.signal));
    }
}
