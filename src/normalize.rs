use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::ir::{ChartCollection, ChartRecord};

const RESERVED_FIELDS: [&str; 3] = ["name", "label", "value"];

static NON_NUMERIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.\-]").unwrap());
static FLOAT_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(?:\d+(?:\.\d+)?|\.\d+)").unwrap());

/// Payload shapes accepted for chart data.
///
/// Detection happens once at the boundary; nothing past `detect` looks at
/// the raw JSON shape again.
#[derive(Debug, Clone, Copy)]
pub enum ChartInput<'a> {
    /// A bare array of records.
    Items(&'a [Value]),
    /// `{ title?, desc?, items: [...] }`.
    Titled {
        title: Option<&'a Value>,
        desc: Option<&'a Value>,
        items: &'a [Value],
    },
}

impl<'a> ChartInput<'a> {
    pub fn detect(raw: &'a Value) -> Option<Self> {
        match raw {
            Value::Array(items) => Some(ChartInput::Items(items)),
            Value::Object(map) => match map.get("items") {
                Some(Value::Array(items)) => Some(ChartInput::Titled {
                    title: map.get("title"),
                    desc: map.get("desc"),
                    items,
                }),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn items(&self) -> &'a [Value] {
        match *self {
            ChartInput::Items(items) => items,
            ChartInput::Titled { items, .. } => items,
        }
    }

    fn into_collection(self, items: Vec<ChartRecord>) -> ChartCollection {
        match self {
            ChartInput::Items(_) => ChartCollection {
                title: None,
                desc: None,
                items,
            },
            ChartInput::Titled { title, desc, .. } => ChartCollection {
                title: title.and_then(passthrough_text),
                desc: desc.and_then(passthrough_text),
                items,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Lenient,
    Strict,
}

/// Normalizes any accepted chart payload into a [`ChartCollection`].
///
/// Returns `None` for `null` and for shapes that are neither an array nor an
/// object with an `items` array. Each record gets `name`/`label` from
/// `label ?? name` and a finite `value`; all other fields are copied as-is.
pub fn normalize_chart_data(raw: &Value) -> Option<ChartCollection> {
    normalize_with(raw, Mode::Lenient)
}

/// Stricter normalization used by simple bar and pie displays.
///
/// On top of [`normalize_chart_data`], records without explicit fields borrow
/// the first string property as their name and the first number property as
/// their value, and records whose value is not strictly positive are removed.
pub fn normalize_chart_data_strict(raw: &Value) -> Option<ChartCollection> {
    normalize_with(raw, Mode::Strict)
}

fn normalize_with(raw: &Value, mode: Mode) -> Option<ChartCollection> {
    let Some(input) = ChartInput::detect(raw) else {
        if !raw.is_null() {
            debug!(kind = value_kind(raw), "chart payload shape not recognized");
        }
        return None;
    };

    let mut items: Vec<ChartRecord> = input
        .items()
        .iter()
        .enumerate()
        .map(|(idx, entry)| normalize_record(entry, idx, mode))
        .collect();

    if mode == Mode::Strict {
        let before = items.len();
        items.retain(|item| item.value > 0.0);
        if items.len() < before {
            debug!(
                removed = before - items.len(),
                kept = items.len(),
                "dropped chart records without a positive value"
            );
        }
    }

    Some(input.into_collection(items))
}

fn normalize_record(entry: &Value, idx: usize, mode: Mode) -> ChartRecord {
    match entry {
        Value::Object(map) => normalize_object(map, idx, mode),
        Value::Number(number) => {
            ChartRecord::new(placeholder_name(idx), number.as_f64().unwrap_or(0.0))
        }
        Value::String(text) if !text.trim().is_empty() => ChartRecord::new(text.clone(), 0.0),
        _ => ChartRecord::new(placeholder_name(idx), 0.0),
    }
}

fn normalize_object(map: &Map<String, Value>, idx: usize, mode: Mode) -> ChartRecord {
    let mut name = label_text(map.get("label")).or_else(|| label_text(map.get("name")));
    if name.is_none() && mode == Mode::Strict {
        name = first_string_property(map);
    }
    let name = name.unwrap_or_else(|| placeholder_name(idx));

    let value = match map.get("value") {
        Some(raw) if !raw.is_null() => coerce_value(raw),
        _ if mode == Mode::Strict => first_number_property(map).unwrap_or(0.0),
        _ => 0.0,
    };

    let extra: Map<String, Value> = map
        .iter()
        .filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    ChartRecord {
        label: name.clone(),
        name,
        value,
        extra,
    }
}

fn placeholder_name(idx: usize) -> String {
    format!("Item {}", idx + 1)
}

fn label_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn passthrough_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn first_string_property(map: &Map<String, Value>) -> Option<String> {
    map.values().find_map(|value| match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        _ => None,
    })
}

fn first_number_property(map: &Map<String, Value>) -> Option<f64> {
    map.values()
        .find_map(Value::as_f64)
        .filter(|value| value.is_finite())
}

fn coerce_value(raw: &Value) -> f64 {
    match raw {
        Value::Number(number) => number
            .as_f64()
            .filter(|value| value.is_finite())
            .unwrap_or(0.0),
        Value::String(text) => coerce_number(text),
        _ => 0.0,
    }
}

/// Best-effort numeric coercion for textual values.
///
/// Everything except ASCII digits, `.` and `-` is stripped, then the longest
/// leading float (`-?digits(.digits)?`) is parsed. Yields `0.0` when nothing
/// parses.
pub fn coerce_number(text: &str) -> f64 {
    let cleaned = NON_NUMERIC_RE.replace_all(text, "");
    FLOAT_PREFIX_RE
        .find(&cleaned)
        .and_then(|prefix| prefix.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_unknown_shapes() {
        for raw in [json!(null), json!({}), json!("text"), json!(42), json!({"items": 3})] {
            assert!(normalize_chart_data(&raw).is_none(), "{raw}");
            assert!(normalize_chart_data_strict(&raw).is_none(), "{raw}");
        }
    }

    #[test]
    fn empty_array_is_an_empty_collection() {
        let collection = normalize_chart_data(&json!([])).unwrap();
        assert!(collection.is_empty());
        assert!(collection.title.is_none());
    }

    #[test]
    fn label_wins_over_name() {
        let collection =
            normalize_chart_data(&json!([{"label": "Shown", "name": "hidden", "value": 3}]))
                .unwrap();
        let item = &collection.items[0];
        assert_eq!(item.name, "Shown");
        assert_eq!(item.label, "Shown");
        assert_eq!(item.value, 3.0);
        assert!(item.extra.is_empty());
    }

    #[test]
    fn titled_payload_keeps_title_and_desc() {
        let raw = json!({
            "title": "Revenue",
            "desc": "By quarter",
            "items": [{"name": "Q1", "value": 1}]
        });
        let collection = normalize_chart_data(&raw).unwrap();
        assert_eq!(collection.title.as_deref(), Some("Revenue"));
        assert_eq!(collection.desc.as_deref(), Some("By quarter"));
        assert_eq!(collection.items.len(), 1);
    }

    #[test]
    fn missing_name_gets_placeholder() {
        let collection = normalize_chart_data(&json!([{"value": 1}, {"label": "  "}])).unwrap();
        assert_eq!(collection.items[0].name, "Item 1");
        assert_eq!(collection.items[1].name, "Item 2");
        assert_eq!(collection.items[1].value, 0.0);
    }

    #[test]
    fn scalar_entries_become_records() {
        let collection = normalize_chart_data(&json!([5, "Alpha", true])).unwrap();
        assert_eq!(collection.items[0].name, "Item 1");
        assert_eq!(collection.items[0].value, 5.0);
        assert_eq!(collection.items[1].name, "Alpha");
        assert_eq!(collection.items[2].name, "Item 3");
    }

    #[test]
    fn coerces_numeric_text() {
        assert_eq!(coerce_number("$1,234.5"), 1234.5);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("-12%"), -12.0);
        assert_eq!(coerce_number("1.2.3"), 1.2);
        assert_eq!(coerce_number(".5"), 0.5);
        assert_eq!(coerce_number("7."), 7.0);
        assert_eq!(coerce_number("--5"), 0.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("-.25"), -0.25);
        assert_eq!(coerce_number("12-3"), 12.0);
        assert_eq!(coerce_number("-"), 0.0);
    }

    #[test]
    fn strict_falls_back_to_first_typed_properties() {
        let raw = json!([
            {"region": "North", "code": "N", "sales": 12, "growth": 3},
            {"region": "South", "sales": 0}
        ]);
        let collection = normalize_chart_data_strict(&raw).unwrap();
        assert_eq!(collection.items.len(), 1);
        let item = &collection.items[0];
        assert_eq!(item.name, "North");
        assert_eq!(item.value, 12.0);
        assert_eq!(item.extra.get("sales"), Some(&json!(12)));
    }

    #[test]
    fn strict_drops_non_positive_values() {
        let raw = json!([
            {"name": "A", "value": "abc"},
            {"name": "B", "value": -4},
            {"name": "C", "value": "$1,234.5"}
        ]);
        let collection = normalize_chart_data_strict(&raw).unwrap();
        assert_eq!(collection.items.len(), 1);
        assert_eq!(collection.items[0].name, "C");
        assert_eq!(collection.items[0].value, 1234.5);
    }

    #[test]
    fn lenient_keeps_zero_values() {
        let collection = normalize_chart_data(&json!([{"name": "A", "value": "abc"}])).unwrap();
        assert_eq!(collection.items[0].value, 0.0);
    }

    #[test]
    fn detect_reports_items() {
        let raw = json!({"items": [1, 2, 3]});
        let input = ChartInput::detect(&raw).unwrap();
        assert_eq!(input.items().len(), 3);
        assert!(matches!(input, ChartInput::Titled { title: None, .. }));
    }
}
