use super::{JunctionFlags, PenaltyError};
use crate::{
    config::ColumnNames,
    model::network::{AttributeBag, AttributeValue, Scalar},
};

/// the fields of a link record that select and parameterize a penalty rule.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PenaltyRow {
    pub road_class: Option<i64>,
    pub element_type: Option<i64>,
    /// km/h
    pub speed_limit: Option<f64>,
    pub flags: JunctionFlags,
    /// minutes
    pub free_flow: Option<f64>,
}

impl PenaltyRow {
    /// reads a row from a link attribute bag. missing or null junction flags
    /// are read as 0 and a missing junction sum is computed from the flags.
    pub fn from_attributes(
        attributes: &AttributeBag,
        columns: &ColumnNames,
    ) -> Result<PenaltyRow, PenaltyError> {
        let signal = read_i64(attributes, &columns.signal)?.unwrap_or_default();
        let intersecting = read_i64(attributes, &columns.intersecting)?.unwrap_or_default();
        let slip_road = read_i64(attributes, &columns.slip_road)?.unwrap_or_default();
        let pedestrian = read_i64(attributes, &columns.pedestrian)?.unwrap_or_default();
        let sum = read_i64(attributes, &columns.junction_sum)?
            .unwrap_or(signal + intersecting + slip_road + pedestrian);
        Ok(PenaltyRow {
            road_class: read_i64(attributes, &columns.road_type)?,
            element_type: read_i64(attributes, &columns.element_type)?,
            speed_limit: read_f64(attributes, &columns.speed_limit)?,
            flags: JunctionFlags {
                signal,
                intersecting,
                slip_road,
                pedestrian,
                sum,
            },
            free_flow: read_f64(attributes, &columns.free_flow_time)?,
        })
    }
}

fn read_scalar<'a>(attributes: &'a AttributeBag, key: &str) -> Result<Option<&'a Scalar>, PenaltyError> {
    match attributes.get(key) {
        None => Ok(None),
        Some(AttributeValue::Scalar(Scalar::Null)) => Ok(None),
        Some(AttributeValue::Scalar(s)) => Ok(Some(s)),
        Some(AttributeValue::List(values)) => Err(PenaltyError::InvalidAttribute {
            key: String::from(key),
            message: format!("expected a single value, found a list of {}", values.len()),
        }),
    }
}

fn read_i64(attributes: &AttributeBag, key: &str) -> Result<Option<i64>, PenaltyError> {
    match read_scalar(attributes, key)? {
        None => Ok(None),
        Some(s) => s.as_i64().map(Some).ok_or_else(|| PenaltyError::InvalidAttribute {
            key: String::from(key),
            message: format!("expected an integer, found '{s}'"),
        }),
    }
}

fn read_f64(attributes: &AttributeBag, key: &str) -> Result<Option<f64>, PenaltyError> {
    match read_scalar(attributes, key)? {
        None => Ok(None),
        Some(s) => s.as_f64().map(Some).ok_or_else(|| PenaltyError::InvalidAttribute {
            key: String::from(key),
            message: format!("expected a number, found '{s}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::PenaltyRow;
    use crate::{
        config::ColumnNames,
        model::{
            network::{AttributeBag, AttributeValue, Scalar},
            penalty::PenaltyError,
        },
    };

    #[test]
    fn test_read_row() {
        let columns = ColumnNames::default();
        let mut bag = AttributeBag::new();
        let _ = bag.insert(columns.road_type.as_str(), 3_i64);
        let _ = bag.insert(columns.speed_limit.as_str(), 50.0);
        let _ = bag.insert(columns.free_flow_time.as_str(), 0.6);
        let _ = bag.insert(columns.signal.as_str(), 1_i64);
        let _ = bag.insert(columns.intersecting.as_str(), Scalar::Null);
        let row = PenaltyRow::from_attributes(&bag, &columns).unwrap();
        assert_eq!(row.road_class, Some(3));
        assert_eq!(row.element_type, None);
        assert_eq!(row.speed_limit, Some(50.0));
        assert_eq!(row.flags.signal, 1);
        assert_eq!(row.flags.intersecting, 0);
        assert_eq!(row.flags.sum, 1);
    }

    #[test]
    fn test_list_valued_column_rejected() {
        let columns = ColumnNames::default();
        let mut bag = AttributeBag::new();
        let _ = bag.insert(
            columns.speed_limit.as_str(),
            AttributeValue::List(vec![Scalar::Int(50), Scalar::Int(60)]),
        );
        assert!(matches!(
            PenaltyRow::from_attributes(&bag, &columns),
            Err(PenaltyError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_text_road_class_rejected() {
        let columns = ColumnNames::default();
        let mut bag = AttributeBag::new();
        let _ = bag.insert(columns.road_type.as_str(), "motorway");
        assert!(PenaltyRow::from_attributes(&bag, &columns).is_err());
    }
}
