//! Dataset descriptors and filter vocabularies.

use crate::api::query::FilterExpression;
use crate::api::query::Literal;
use crate::api::query::Predicate;
use crate::error::ConfigError;
use crate::model::CriterionValue;
use crate::model::FilterCriteria;

use super::Dataset;

/// How an incoming filter value is compared against a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `column='value'`, or `IN (...)` when several values are supplied.
    Exact,
    /// `column LIKE 'value%'`
    Prefix,
    /// `column like '%value%'`
    Substring,
    /// `column between 'start' and 'end'` from `<key>_start` / `<key>_end`.
    Range,
    /// `column IN ('a','b')` from a list or comma-separated text.
    Membership,
}

/// One recognized filter key of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    /// The key callers use in filter criteria.
    pub key: &'static str,
    /// The dataset column the key filters on.
    pub column: &'static str,
    /// How values are compared.
    pub comparison: Comparison,
    /// Numeric columns take unquoted literals.
    pub numeric: bool,
}

impl Attribute {
    /// An attribute whose key is the column name.
    pub const fn new(column: &'static str, comparison: Comparison) -> Self {
        Self {
            key: column,
            column,
            comparison,
            numeric: false,
        }
    }

    /// An attribute exposed under a different key than its column.
    pub const fn mapped(key: &'static str, column: &'static str, comparison: Comparison) -> Self {
        Self {
            key,
            column,
            comparison,
            numeric: false,
        }
    }

    /// Marks the attribute as numeric.
    pub const fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }
}

/// Static description of one dataset.
#[derive(Debug)]
pub struct DatasetDescriptor {
    /// The dataset this descriptor belongs to.
    pub dataset: Dataset,
    /// Snake-case dispatch key.
    pub key: &'static str,
    /// Human readable name.
    pub name: &'static str,
    /// Resource identifier on the open-data portal.
    pub resource_id: &'static str,
    /// Column joining rows across the datasets of one property type.
    pub id_column: &'static str,
    /// Recognized filter keys, in predicate order.
    pub vocabulary: &'static [Attribute],
}

impl DatasetDescriptor {
    /// Returns the attribute recognized under `key`, if any.
    pub fn attribute(&self, key: &str) -> Option<&'static Attribute> {
        self.vocabulary.iter().find(|a| a.key == key)
    }

    /// Returns `true` if `key` filters this dataset, including range suffixes.
    pub fn recognizes(&self, key: &str) -> bool {
        self.vocabulary.iter().any(|a| {
            a.key == key
                || (a.comparison == Comparison::Range
                    && (key.strip_suffix("_start") == Some(a.key)
                        || key.strip_suffix("_end") == Some(a.key)))
        })
    }

    /// Translates filter criteria into this dataset's predicates.
    ///
    /// Keys outside the vocabulary are ignored. Predicates follow vocabulary order, so the
    /// result does not depend on how the criteria were assembled. An empty expression
    /// matches every row.
    pub fn build_predicates(&self, criteria: &FilterCriteria) -> Result<FilterExpression, ConfigError> {
        let mut expression = FilterExpression::new();

        for attr in self.vocabulary {
            if let Some(value) = criteria.get(attr.key) {
                expression.push(predicate_for(attr, value)?);
            }

            if attr.comparison == Comparison::Range {
                let start = criteria.get(&format!("{}_start", attr.key));
                let end = criteria.get(&format!("{}_end", attr.key));
                if let Some(predicate) = range_predicate(attr, start, end)? {
                    expression.push(predicate);
                }
            }
        }

        Ok(expression)
    }
}

fn predicate_for(attr: &Attribute, value: &CriterionValue) -> Result<Predicate, ConfigError> {
    let column = attr.column;
    match attr.comparison {
        Comparison::Exact | Comparison::Range => match value {
            CriterionValue::List(items) => {
                Ok(Predicate::is_in(column, literals(attr, &list_items(items))?))
            }
            _ => Ok(Predicate::eq(column, literal(attr, &value.to_text())?)),
        },
        Comparison::Membership => {
            let items: Vec<String> = match value {
                CriterionValue::List(items) => list_items(items),
                CriterionValue::Text(text) => list_items(text.split(',')),
                other => vec![other.to_text()],
            };
            if items.is_empty() {
                return Err(ConfigError::invalid_value(attr.key, value.to_text(), "no values in list"));
            }
            Ok(Predicate::is_in(column, literals(attr, &items)?))
        }
        Comparison::Prefix => Ok(Predicate::starts_with(column, pattern_text(attr, value)?)),
        Comparison::Substring => Ok(Predicate::like(column, pattern_text(attr, value)?)),
    }
}

fn range_predicate(
    attr: &Attribute,
    start: Option<&CriterionValue>,
    end: Option<&CriterionValue>,
) -> Result<Option<Predicate>, ConfigError> {
    let bound = |value: &CriterionValue| match value {
        CriterionValue::List(_) => Err(ConfigError::invalid_value(
            attr.key,
            value.to_text(),
            "range bounds take a single value",
        )),
        _ => literal(attr, &value.to_text()),
    };

    let predicate = match (start, end) {
        (Some(start), Some(end)) => Some(Predicate::between(attr.column, bound(start)?, bound(end)?)),
        (Some(start), None) => Some(Predicate::ge(attr.column, bound(start)?)),
        (None, Some(end)) => Some(Predicate::le(attr.column, bound(end)?)),
        (None, None) => None,
    };
    Ok(predicate)
}

fn pattern_text(attr: &Attribute, value: &CriterionValue) -> Result<String, ConfigError> {
    match value {
        CriterionValue::List(_) => Err(ConfigError::invalid_value(
            attr.key,
            value.to_text(),
            "pattern match takes a single value",
        )),
        _ => Ok(value.to_text()),
    }
}

/// Trims list entries and drops the blank ones.
fn list_items<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .filter_map(|item| {
            let item = item.as_ref().trim();
            (!item.is_empty()).then(|| item.to_string())
        })
        .collect()
}

fn literals(attr: &Attribute, items: &[String]) -> Result<Vec<Literal>, ConfigError> {
    items.iter().map(|item| literal(attr, item)).collect()
}

fn literal(attr: &Attribute, raw: &str) -> Result<Literal, ConfigError> {
    if !attr.numeric {
        return Ok(Literal::text(raw));
    }
    let trimmed = raw.trim();
    if is_numeric_literal(trimmed) {
        Ok(Literal::Number(trimmed.to_string()))
    } else {
        Err(ConfigError::invalid_value(attr.key, raw, "expected a number"))
    }
}

/// Accepts `-?digits(.digits)?`, the only form allowed in an unquoted slot.
fn is_numeric_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.is_none_or(all_digits)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    fn soql(dataset: Dataset, criteria: &FilterCriteria) -> String {
        dataset.descriptor().build_predicates(criteria).unwrap().to_soql()
    }

    #[test]
    fn test_unknown_keys_match_all() {
        let criteria = FilterCriteria::new()
            .with("favourite_colour", "blue")
            .with("page", "3");
        let expression = Dataset::RealPropertyMaster
            .descriptor()
            .build_predicates(&criteria)
            .unwrap();
        assert!(expression.is_empty());
    }

    #[test]
    fn test_exact_and_numeric() {
        let criteria = FilterCriteria::new().with("borough", "1").with("street_number", "12");
        assert_eq!(
            soql(Dataset::RealPropertyLegals, &criteria),
            "borough=1 AND street_number='12'"
        );
    }

    #[test]
    fn test_mapped_key() {
        let criteria = FilterCriteria::new().with("ssn_lien_file_number", "12345");
        assert_eq!(
            soql(Dataset::PersonalPropertyMaster, &criteria),
            "file_nbr='12345'"
        );
    }

    #[test]
    fn test_prefix_and_substring() {
        let criteria = FilterCriteria::new().with("document_id", "2023");
        assert_eq!(
            soql(Dataset::RealPropertyMaster, &criteria),
            "document_id LIKE '2023%'"
        );

        let criteria = FilterCriteria::new().with("name", "O'BRIEN");
        assert_eq!(
            soql(Dataset::RealPropertyParties, &criteria),
            "name like '%O''BRIEN%'"
        );
    }

    #[test]
    fn test_membership_from_text_and_list() {
        let criteria = FilterCriteria::new().with("doc_type", "DEED, MTGE,,");
        assert_eq!(
            soql(Dataset::RealPropertyMaster, &criteria),
            "doc_type IN ('DEED','MTGE')"
        );

        let criteria = FilterCriteria::new().with("doc_type", vec!["DEED", "AGMT"]);
        assert_eq!(
            soql(Dataset::RealPropertyMaster, &criteria),
            "doc_type IN ('DEED','AGMT')"
        );
    }

    #[test]
    fn test_blank_list_entries_are_dropped() {
        let criteria = FilterCriteria::try_from(json!({"doc_type": ["DEED", "", " MTGE "]})).unwrap();
        assert_eq!(
            soql(Dataset::RealPropertyMaster, &criteria),
            "doc_type IN ('DEED','MTGE')"
        );

        let criteria = FilterCriteria::try_from(json!({"borough": ["1", " "]})).unwrap();
        assert_eq!(soql(Dataset::RealPropertyLegals, &criteria), "borough IN (1)");

        let criteria = FilterCriteria::new().with("doc_type", vec!["", "  "]);
        assert_eq!(soql(Dataset::RealPropertyMaster, &criteria), "");
    }

    #[test]
    fn test_exact_with_list_renders_in() {
        let criteria = FilterCriteria::new().with("borough", vec!["1", "3"]);
        assert_eq!(soql(Dataset::RealPropertyLegals, &criteria), "borough IN (1,3)");
    }

    #[test]
    fn test_ranges() {
        let criteria = FilterCriteria::new()
            .with("document_date_start", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
            .with("document_date_end", NaiveDate::from_ymd_opt(2020, 12, 31).unwrap());
        assert_eq!(
            soql(Dataset::RealPropertyMaster, &criteria),
            "document_date between '2020-01-01T00:00:00.000' and '2020-12-31T00:00:00.000'"
        );

        let criteria = FilterCriteria::new().with("document_amt_start", 100_000);
        assert_eq!(
            soql(Dataset::RealPropertyMaster, &criteria),
            "document_amt >= 100000"
        );

        let criteria = FilterCriteria::new().with("recorded_datetime_end", "2021-06-01");
        assert_eq!(
            soql(Dataset::RealPropertyMaster, &criteria),
            "recorded_datetime <= '2021-06-01'"
        );
    }

    #[test]
    fn test_order_follows_vocabulary() {
        let a = FilterCriteria::new().with("lot", "7").with("borough", "1").with("block", "100");
        let b = FilterCriteria::new().with("block", "100").with("lot", "7").with("borough", "1");
        assert_eq!(soql(Dataset::RealPropertyLegals, &a), soql(Dataset::RealPropertyLegals, &b));
        assert_eq!(
            soql(Dataset::RealPropertyLegals, &a),
            "borough=1 AND block=100 AND lot=7"
        );
    }

    #[test]
    fn test_numeric_attribute_rejects_text() {
        let criteria = FilterCriteria::new().with("borough", "1 OR 1=1");
        let err = Dataset::RealPropertyLegals
            .descriptor()
            .build_predicates(&criteria)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFilterValue { ref key, .. } if key == "borough"));
    }

    #[test]
    fn test_blank_values_are_absent() {
        let criteria = FilterCriteria::new().with("borough", "  ").with("block", "");
        assert!(
            Dataset::RealPropertyLegals
                .descriptor()
                .build_predicates(&criteria)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_recognizes_range_suffixes() {
        let descriptor = Dataset::RealPropertyMaster.descriptor();
        assert!(descriptor.recognizes("document_date_start"));
        assert!(descriptor.recognizes("doc_type"));
        assert!(!descriptor.recognizes("doc_type_start"));
        assert!(!descriptor.recognizes("borough"));
    }

    #[test]
    fn test_is_numeric_literal() {
        assert!(is_numeric_literal("42"));
        assert!(is_numeric_literal("-3.5"));
        assert!(!is_numeric_literal("inf"));
        assert!(!is_numeric_literal("1."));
        assert!(!is_numeric_literal(""));
        assert!(!is_numeric_literal("1e5"));
    }
}
