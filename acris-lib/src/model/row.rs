//! Dataset row

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::FieldError;

/// Column holding the cross-dataset join key.
pub const DOCUMENT_ID: &str = "document_id";

/// One row returned by an ACRIS dataset.
///
/// The open-data API returns rows as flat JSON objects and omits columns that are null,
/// so rows hold their fields as a JSON map. Typed getters provide safe access.
///
/// # Example
///
/// ```
/// use acris_lib::model::Row;
///
/// let row = Row::new()
///     .set("document_id", "2023012300123001")
///     .set("borough", "1");
///
/// assert_eq!(row.document_id(), Some("2023012300123001"));
/// assert_eq!(row.get_i64("borough").unwrap(), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: Map<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the row and returns its fields.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Returns the document identifier, if the row carries one.
    pub fn document_id(&self) -> Option<&str> {
        self.fields.get(DOCUMENT_ID).and_then(Value::as_str)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_str(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "string", type_name(other))),
        }
    }

    /// Gets an integer field value.
    ///
    /// The API serializes numbers as strings, so numeric strings are accepted.
    pub fn get_i64(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| FieldError::type_mismatch(field, "integer", "float")),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| FieldError::type_mismatch(field, "integer", "string")),
            Some(other) => Err(FieldError::type_mismatch(field, "integer", type_name(other))),
        }
    }

    /// Gets a floating point field value, accepting numeric strings.
    pub fn get_f64(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| FieldError::type_mismatch(field, "float", "string")),
            Some(other) => Err(FieldError::type_mismatch(field, "float", type_name(other))),
        }
    }
}

impl From<Map<String, Value>> for Row {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

fn type_name(value: &Value) -> &'static str {
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
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_api_row() {
        let row: Row = serde_json::from_value(json!({
            "document_id": "FT_1000000012345",
            "borough": "3",
            "document_amt": "125000.50",
            "remark_text": null
        }))
        .unwrap();

        assert_eq!(row.document_id(), Some("FT_1000000012345"));
        assert_eq!(row.get_i64("borough").unwrap(), Some(3));
        assert_eq!(row.get_f64("document_amt").unwrap(), Some(125000.5));
        assert_eq!(row.get_str("remark_text").unwrap(), None);
    }

    #[test]
    fn test_missing_and_mismatch() {
        let row = Row::new().set("lot", "A12").set("block", 7);
        assert!(matches!(row.get_str("unit"), Err(FieldError::Missing { .. })));
        assert!(matches!(
            row.get_i64("lot"),
            Err(FieldError::TypeMismatch { expected: "integer", .. })
        ));
        assert!(matches!(
            row.get_str("block"),
            Err(FieldError::TypeMismatch { actual: "number", .. })
        ));
    }

    #[test]
    fn test_serializes_flat() {
        let row = Row::new().set("document_id", "D1");
        assert_eq!(serde_json::to_value(&row).unwrap(), json!({"document_id": "D1"}));
    }
}
