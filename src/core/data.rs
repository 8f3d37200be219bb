use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// One input row: an ordered mapping from key (x key or series key) to value.
///
/// Rows are never mutated after ingestion; attaching new data replaces the
/// whole set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataRow {
    values: IndexMap<String, f64>,
}

impl DataRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Returns the value stored under `key`, or NaN when the row has none.
    #[must_use]
    pub fn get(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(f64::NAN)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        let values = object
            .iter()
            .map(|(key, value)| (key.clone(), json_number(value)))
            .collect();
        Self { values }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for DataRow {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Parses a JSON array of row objects.
///
/// Values may be numbers or numeric strings; anything else reads as NaN so
/// that a bad cell degrades the geometry instead of rejecting the set.
pub fn rows_from_json_str(input: &str) -> ChartResult<Vec<DataRow>> {
    let payload: Value = serde_json::from_str(input)?;
    let Value::Array(items) = payload else {
        return Err(ChartError::InvalidData(
            "data payload must be a JSON array of objects".to_owned(),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(DataRow::from_json_object(object)),
            _ => Err(ChartError::InvalidData(format!(
                "row #{index} must be a JSON object"
            ))),
        })
        .collect()
}

fn json_number(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => parse_leading_float(text),
        _ => f64::NAN,
    }
}

/// Float parse that accepts a numeric prefix ("12.5px" -> 12.5).
fn parse_leading_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    if let Ok(value) = trimmed.parse::<f64>() {
        return value;
    }

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => seen_digit = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }

    if !seen_digit {
        return f64::NAN;
    }
    trimmed[..end].parse::<f64>().unwrap_or(f64::NAN)
}
