//! Caller-supplied filter criteria

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ConfigError;

/// A single filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionValue {
    /// Free text.
    Text(String),
    /// A number, kept in its textual form.
    Number(String),
    /// Several values, used for set membership.
    List(Vec<String>),
    /// A calendar date, rendered as a floating timestamp.
    Date(NaiveDate),
}

impl CriterionValue {
    /// Returns the value as the text that appears inside a literal.
    ///
    /// Lists render comma-separated.
    pub fn to_text(&self) -> String {
        match self {
            CriterionValue::Text(s) | CriterionValue::Number(s) => s.clone(),
            CriterionValue::List(items) => items.join(","),
            CriterionValue::Date(d) => d.format("%Y-%m-%dT00:00:00.000").to_string(),
        }
    }

    /// Returns `true` if the value actually filters something.
    ///
    /// Blank text and empty lists are treated as if the key were absent.
    pub fn is_present(&self) -> bool {
        match self {
            CriterionValue::Text(s) | CriterionValue::Number(s) => !s.trim().is_empty(),
            CriterionValue::List(items) => items.iter().any(|s| !s.trim().is_empty()),
            CriterionValue::Date(_) => true,
        }
    }
}

impl From<&str> for CriterionValue {
    fn from(s: &str) -> Self {
        CriterionValue::Text(s.to_string())
    }
}

impl From<String> for CriterionValue {
    fn from(s: String) -> Self {
        CriterionValue::Text(s)
    }
}

impl From<i32> for CriterionValue {
    fn from(n: i32) -> Self {
        CriterionValue::Number(n.to_string())
    }
}

impl From<i64> for CriterionValue {
    fn from(n: i64) -> Self {
        CriterionValue::Number(n.to_string())
    }
}

impl From<NaiveDate> for CriterionValue {
    fn from(d: NaiveDate) -> Self {
        CriterionValue::Date(d)
    }
}

impl From<Vec<String>> for CriterionValue {
    fn from(items: Vec<String>) -> Self {
        CriterionValue::List(items)
    }
}

impl From<Vec<&str>> for CriterionValue {
    fn from(items: Vec<&str>) -> Self {
        CriterionValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Filter criteria: a mapping from filter key to value.
///
/// Keys a dataset does not recognize are ignored when its predicates are built, so one
/// criteria object can be handed to several datasets.
///
/// # Example
///
/// ```
/// use acris_lib::model::FilterCriteria;
///
/// let criteria = FilterCriteria::new()
///     .with("ssn_lien_file_number", "12345")
///     .with("borough", "1");
/// assert!(criteria.contains("borough"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    values: BTreeMap<String, CriterionValue>,
}

impl FilterCriteria {
    /// Creates empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CriterionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CriterionValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the value for `key` if present and non-blank.
    pub fn get(&self, key: &str) -> Option<&CriterionValue> {
        self.values.get(key).filter(|v| v.is_present())
    }

    /// Returns `true` if `key` has a non-blank value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if no key has a non-blank value.
    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| !v.is_present())
    }

    /// Iterates over all keys and values, including blank ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CriterionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl TryFrom<Value> for FilterCriteria {
    type Error = ConfigError;

    /// Converts a plain JSON object, as received from the route layer.
    ///
    /// Strings become text, numbers and booleans keep their textual form, arrays become
    /// lists and `null` is skipped. Nested objects are rejected.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = value else {
            return Err(ConfigError::InvalidCriteria(
                "expected a JSON object".to_string(),
            ));
        };

        let mut criteria = FilterCriteria::new();
        for (key, value) in map {
            let converted = match value {
                Value::Null => continue,
                Value::String(s) => CriterionValue::Text(s),
                Value::Number(n) => CriterionValue::Number(n.to_string()),
                Value::Bool(b) => CriterionValue::Text(b.to_string()),
                Value::Array(items) => CriterionValue::List(
                    items
                        .into_iter()
                        .map(|item| scalar_text(&key, item))
                        .collect::<Result<_, _>>()?,
                ),
                Value::Object(_) => {
                    return Err(ConfigError::InvalidCriteria(format!(
                        "nested object under '{}'",
                        key
                    )));
                }
            };
            criteria.values.insert(key, converted);
        }
        Ok(criteria)
    }
}

fn scalar_text(key: &str, value: Value) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ConfigError::InvalidCriteria(format!(
            "list under '{}' must hold scalars",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json() {
        let criteria = FilterCriteria::try_from(json!({
            "borough": 1,
            "doc_type": ["DEED", "MTGE"],
            "name": "SMITH",
            "unit": null
        }))
        .unwrap();

        assert_eq!(criteria.get("borough"), Some(&CriterionValue::Number("1".to_string())));
        assert_eq!(
            criteria.get("doc_type"),
            Some(&CriterionValue::List(vec!["DEED".to_string(), "MTGE".to_string()]))
        );
        assert!(!criteria.contains("unit"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            FilterCriteria::try_from(json!(["borough"])),
            Err(ConfigError::InvalidCriteria(_))
        ));
        assert!(matches!(
            FilterCriteria::try_from(json!({"borough": {"eq": 1}})),
            Err(ConfigError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn test_blank_values_absent() {
        let criteria = FilterCriteria::new()
            .with("name", "   ")
            .with("doc_type", Vec::<String>::new());
        assert!(criteria.is_empty());
        assert!(criteria.get("name").is_none());
    }

    #[test]
    fn test_date_text() {
        let value = CriterionValue::from(NaiveDate::from_ymd_opt(2019, 7, 4).unwrap());
        assert_eq!(value.to_text(), "2019-07-04T00:00:00.000");
    }
}
