//! Data records bound to diagram parts.
//!
//! A record is a free-form JSON object owned by the application. Tools
//! read it through typed accessors that fall back to defaults, and only
//! ever write it through [`Model::set_data_property`](crate::model::Model::set_data_property).

use serde::Deserialize;
use serde_json::{Map, Value};

/// Deserializes from any JSON object, so hosts can load records straight
/// from their documents.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DataRecord(Map<String, Value>);

impl DataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON value. Non-object values give `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, property: &str) -> Option<&Value> {
        self.0.get(property)
    }

    /// A property as a finite number. Missing, non-numeric and NaN or
    /// infinite values all read as `None`.
    pub fn number(&self, property: &str) -> Option<f64> {
        self.0
            .get(property)
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite())
    }

    /// Raw write, returning the previous value. Hosts route edits through
    /// the model so they are recorded.
    pub(crate) fn insert(&mut self, property: &str, value: Value) -> Option<Value> {
        self.0.insert(property.to_string(), value)
    }

    pub(crate) fn remove(&mut self, property: &str) -> Option<Value> {
        self.0.remove(property)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn number_rejects_non_numbers() {
        let rec = DataRecord::from_value(json!({
            "radius": 40,
            "angle": "north",
            "sweep": null,
            "scale": 1.5,
        }))
        .unwrap();
        assert_eq!(rec.number("radius"), Some(40.0));
        assert_eq!(rec.number("scale"), Some(1.5));
        assert_eq!(rec.number("angle"), None);
        assert_eq!(rec.number("sweep"), None);
        assert_eq!(rec.number("missing"), None);
    }

    #[test]
    fn only_objects_become_records() {
        assert!(DataRecord::from_value(json!([1, 2])).is_none());
        assert!(DataRecord::from_value(json!(3)).is_none());
        assert!(DataRecord::from_value(json!({})).unwrap().is_empty());
    }

    #[test]
    fn deserializes_only_from_objects() {
        let rec: DataRecord = serde_json::from_value(json!({ "radius": 12 })).unwrap();
        assert_eq!(rec.number("radius"), Some(12.0));
        assert!(serde_json::from_value::<DataRecord>(json!("pie")).is_err());
    }

    #[test]
    fn insert_returns_previous_value() {
        let mut rec = DataRecord::new();
        assert_eq!(rec.insert("sweep", json!(90)), None);
        assert_eq!(rec.insert("sweep", json!(120)), Some(json!(90)));
        assert_eq!(rec.len(), 1);
        assert_eq!(rec.remove("sweep"), Some(json!(120)));
    }
}
