//! Row column access errors

/// Raised by the typed getters on [`Row`](crate::model::Row).
///
/// The open-data API omits null columns and sends numbers as strings, so a column can be
/// absent from one row and present in the next, and a numeric getter may reject text
/// that does not parse.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FieldError {
    /// The row has no such column.
    #[error("column '{field}' is absent from the row")]
    Missing { field: String },

    /// The column holds a value the getter cannot convert.
    #[error("column '{field}' holds {actual}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub(crate) fn type_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    #[test]
    fn test_messages_name_the_column() {
        let row = Row::new().set("borough", "MANHATTAN");
        assert_eq!(
            row.get_i64("borough").unwrap_err().to_string(),
            "column 'borough' holds string, expected integer"
        );
        assert_eq!(
            row.get_str("lot").unwrap_err().to_string(),
            "column 'lot' is absent from the row"
        );
    }
}
