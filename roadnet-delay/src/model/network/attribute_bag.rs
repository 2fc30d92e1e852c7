use super::{AttributeValue, Scalar};
use std::collections::{btree_map, BTreeMap};

/// string-keyed attribute collection for a road link, node or merged edge.
/// keys are kept sorted so that iteration and serialization are
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeBag(BTreeMap<String, AttributeValue>);

impl AttributeBag {
    pub fn new() -> AttributeBag {
        AttributeBag(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.0.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, AttributeValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// scalar at some key, or None if the key is missing or holds a list.
    pub fn get_scalar(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key).and_then(AttributeValue::as_scalar)
    }

    /// numeric value at some key. missing keys, nulls, lists and text are None.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get_scalar(key).and_then(Scalar::as_f64)
    }

    /// integral value at some key. missing keys, nulls, lists, text and
    /// fractional numbers are None.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_scalar(key).and_then(Scalar::as_i64)
    }

    /// writes a nullable float, storing [`Scalar::Null`] for None.
    pub fn set_f64(&mut self, key: &str, value: Option<f64>) {
        let _ = self.insert(key, Scalar::from(value));
    }
}

impl FromIterator<(String, AttributeValue)> for AttributeBag {
    fn from_iter<T: IntoIterator<Item = (String, AttributeValue)>>(iter: T) -> Self {
        AttributeBag(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AttributeBag {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = btree_map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for AttributeBag {
    type Item = (String, AttributeValue);
    type IntoIter = btree_map::IntoIter<String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::AttributeBag;
    use crate::model::network::{AttributeValue, Scalar};

    #[test]
    fn test_numeric_access() {
        let mut bag = AttributeBag::new();
        let _ = bag.insert("road_type", 3_i64);
        let _ = bag.insert("speed_limit", 50.0);
        let _ = bag.insert("name", "Hämeentie");
        let _ = bag.insert(
            "length",
            AttributeValue::List(vec![Scalar::Float(1.0), Scalar::Float(2.0)]),
        );
        assert_eq!(bag.get_i64("road_type"), Some(3));
        assert_eq!(bag.get_f64("speed_limit"), Some(50.0));
        assert_eq!(bag.get_i64("speed_limit"), Some(50));
        assert_eq!(bag.get_f64("name"), None);
        assert_eq!(bag.get_f64("length"), None, "lists have no scalar view");
        assert_eq!(bag.get_f64("missing"), None);
    }

    #[test]
    fn test_set_none_writes_null() {
        let mut bag = AttributeBag::new();
        bag.set_f64("free_flow_time", None);
        assert!(bag.get("free_flow_time").map(|v| v.is_null()).unwrap_or(false));
    }
}
