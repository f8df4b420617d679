use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One normalized chart datum.
///
/// `name` and `label` always carry the same non-empty text and `value` is
/// always finite. Every other field of the source record survives in `extra`
/// in its original order, which is how multi-series payloads keep their
/// per-series numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub name: String,
    pub label: String,
    pub value: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChartRecord {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            value: if value.is_finite() { value } else { 0.0 },
            extra: Map::new(),
        }
    }

    /// Keys of pass-through fields holding numbers.
    pub fn series_keys(&self) -> impl Iterator<Item = &str> {
        self.extra
            .iter()
            .filter(|(_, value)| value.is_number())
            .map(|(key, _)| key.as_str())
    }

    pub fn is_multi_series(&self) -> bool {
        self.series_keys().next().is_some()
    }

    /// Numeric pass-through field, if present.
    pub fn series_value(&self, key: &str) -> Option<f64> {
        self.extra.get(key).and_then(Value::as_f64)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub items: Vec<ChartRecord>,
}

impl ChartCollection {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_multi_series(&self) -> bool {
        self.items.iter().any(ChartRecord::is_multi_series)
    }

    /// Union of numeric pass-through keys across all items, first-seen order.
    pub fn series_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for item in &self.items {
            for key in item.series_keys() {
                if !keys.iter().any(|existing| existing == key) {
                    keys.push(key.to_string());
                }
            }
        }
        keys
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordItem {
    pub name: String,
    pub value: f64,
}

impl WordItem {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn from_chart(collection: &ChartCollection) -> Vec<WordItem> {
        collection
            .items
            .iter()
            .map(|item| WordItem::new(item.name.clone(), item.value))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedWord {
    pub word: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub color: String,
    pub rotation: f64,
}

/// A word whose spiral search ran out of attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedWord {
    pub word: String,
    pub value: f64,
    pub font_size: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_serializes_flat() {
        let mut record = ChartRecord::new("Q1", 10.0);
        record.extra.insert("sales".to_string(), json!(4));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"name": "Q1", "label": "Q1", "value": 10.0, "sales": 4})
        );
    }

    #[test]
    fn series_keys_only_count_numbers() {
        let mut first = ChartRecord::new("A", 1.0);
        first.extra.insert("color".to_string(), json!("red"));
        first.extra.insert("y".to_string(), json!(3));
        let mut second = ChartRecord::new("B", 2.0);
        second.extra.insert("z".to_string(), json!(1.5));
        second.extra.insert("y".to_string(), json!(7));
        let collection = ChartCollection {
            title: None,
            desc: None,
            items: vec![first, second],
        };
        assert!(collection.is_multi_series());
        assert_eq!(collection.series_keys(), vec!["y", "z"]);
        assert_eq!(collection.items[1].series_value("z"), Some(1.5));
    }

    #[test]
    fn non_finite_record_value_is_zeroed() {
        assert_eq!(ChartRecord::new("A", f64::NAN).value, 0.0);
    }
}
