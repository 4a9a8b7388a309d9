//! SoQL rendering of predicates.

use super::Literal;
use super::Predicate;

/// Converts a `Predicate` to a SoQL `$where` fragment.
pub fn predicate_to_soql(predicate: &Predicate) -> String {
    match predicate {
        Predicate::Eq(column, value) => format!("{}={}", column, literal_to_soql(value)),
        Predicate::Like(column, value) => {
            format!("{} like {}", column, quote(&format!("%{}%", value)))
        }
        Predicate::StartsWith(column, value) => {
            format!("{} LIKE {}", column, quote(&format!("{}%", value)))
        }
        Predicate::In(column, values) => {
            let parts: Vec<_> = values.iter().map(literal_to_soql).collect();
            format!("{} IN ({})", column, parts.join(","))
        }
        Predicate::Between(column, start, end) => format!(
            "{} between {} and {}",
            column,
            literal_to_soql(start),
            literal_to_soql(end)
        ),
        Predicate::Ge(column, value) => format!("{} >= {}", column, literal_to_soql(value)),
        Predicate::Le(column, value) => format!("{} <= {}", column, literal_to_soql(value)),
    }
}

/// Converts a `Literal` to its SoQL representation.
pub fn literal_to_soql(literal: &Literal) -> String {
    match literal {
        Literal::Text(s) => quote(s),
        Literal::Number(n) => n.clone(),
    }
}

/// Quotes a string for use in SoQL.
///
/// SoQL strings are enclosed in single quotes, with internal single quotes doubled.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Strips the outer quotes and checks that every inner quote is part of a doubled pair.
    fn is_balanced_literal(rendered: &str) -> bool {
        let Some(inner) = rendered
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
        else {
            return false;
        };
        let mut chars = inner.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\'' && chars.next() != Some('\'') {
                return false;
            }
        }
        true
    }

    #[test]
    fn test_simple_predicates() {
        assert_eq!(predicate_to_soql(&Predicate::eq("crfn", "2019000123")), "crfn='2019000123'");
        assert_eq!(predicate_to_soql(&Predicate::eq("borough", 3)), "borough=3");
        assert_eq!(predicate_to_soql(&Predicate::ge("document_amt", 500)), "document_amt >= 500");
        assert_eq!(
            predicate_to_soql(&Predicate::le("recorded_datetime", "2020-01-01")),
            "recorded_datetime <= '2020-01-01'"
        );
    }

    #[test]
    fn test_pattern_predicates() {
        assert_eq!(
            predicate_to_soql(&Predicate::like("name", "SMITH")),
            "name like '%SMITH%'"
        );
        assert_eq!(
            predicate_to_soql(&Predicate::starts_with("document_id", "FT_")),
            "document_id LIKE 'FT_%'"
        );
    }

    #[test]
    fn test_membership_and_range() {
        assert_eq!(
            predicate_to_soql(&Predicate::is_in("document_id", ["D1", "D2"])),
            "document_id IN ('D1','D2')"
        );
        assert_eq!(
            predicate_to_soql(&Predicate::between("document_date", "2020-01-01", "2020-12-31")),
            "document_date between '2020-01-01' and '2020-12-31'"
        );
    }

    #[test]
    fn test_quote_doubling() {
        assert_eq!(quote("O'Brien"), "'O''Brien'");
        assert_eq!(
            predicate_to_soql(&Predicate::like("name", "D'ANGELO'S")),
            "name like '%D''ANGELO''S%'"
        );

        for value in ["'", "''", "a'b'c", "'leading", "trailing'", "x' OR '1'='1"] {
            let rendered = quote(value);
            assert_eq!(
                rendered.matches('\'').count(),
                2 + 2 * value.matches('\'').count()
            );
            assert!(is_balanced_literal(&rendered), "unbalanced: {}", rendered);
        }
    }

    #[test]
    fn test_numbers_are_not_quoted() {
        assert_eq!(literal_to_soql(&Literal::Number("42".to_string())), "42");
        assert_eq!(literal_to_soql(&Literal::text("42")), "'42'");
    }
}
