//! Composite records assembled from a cross-reference.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::dataset::Dataset;
use crate::dataset::RecordKind;
use crate::error::FetchFailed;

use super::Row;

/// One document with its rows from every dataset of a property type.
///
/// A record kind whose bulk fetch failed is listed in `unavailable` and contributes an
/// empty row list, so "no matching rows" and "could not fetch" stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeRecord {
    pub document_id: String,
    pub master_records: Vec<Row>,
    pub legals_records: Vec<Row>,
    pub parties_records: Vec<Row>,
    pub references_records: Vec<Row>,
    pub remarks_records: Vec<Row>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unavailable: Vec<RecordKind>,
}

impl CompositeRecord {
    /// Creates an empty composite record for a document.
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            ..Default::default()
        }
    }

    /// Returns the rows of one record kind.
    pub fn rows(&self, kind: RecordKind) -> &[Row] {
        match kind {
            RecordKind::Master => &self.master_records,
            RecordKind::Legals => &self.legals_records,
            RecordKind::Parties => &self.parties_records,
            RecordKind::References => &self.references_records,
            RecordKind::Remarks => &self.remarks_records,
        }
    }

    fn rows_mut(&mut self, kind: RecordKind) -> &mut Vec<Row> {
        match kind {
            RecordKind::Master => &mut self.master_records,
            RecordKind::Legals => &mut self.legals_records,
            RecordKind::Parties => &mut self.parties_records,
            RecordKind::References => &mut self.references_records,
            RecordKind::Remarks => &mut self.remarks_records,
        }
    }

    /// Returns `true` if the fetch for `kind` failed.
    pub fn is_unavailable(&self, kind: RecordKind) -> bool {
        self.unavailable.contains(&kind)
    }

    /// Returns `true` if every record kind was fetched.
    pub fn is_complete(&self) -> bool {
        self.unavailable.is_empty()
    }
}

/// Groups fetched rows into one composite record per document identifier.
///
/// Each dataset's rows are matched on that dataset's identifier column. Records come out
/// in the order of `ids`. Rows whose identifier is not in `ids` are dropped.
pub fn group_by_document(
    ids: &[String],
    results: Vec<(Dataset, Result<Vec<Row>, FetchFailed>)>,
) -> Vec<CompositeRecord> {
    let mut records: Vec<CompositeRecord> = ids.iter().map(CompositeRecord::new).collect();
    let index: HashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    for (dataset, result) in results {
        let kind = dataset.kind();
        match result {
            Ok(rows) => {
                let id_column = dataset.descriptor().id_column;
                for row in rows {
                    let id = row.get(id_column).and_then(Value::as_str);
                    let Some(&i) = id.and_then(|id| index.get(id)) else {
                        continue;
                    };
                    records[i].rows_mut(kind).push(row);
                }
            }
            Err(_) => {
                for record in &mut records {
                    record.unavailable.push(kind);
                }
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(id: &str) -> Row {
        Row::new().set("document_id", id)
    }

    #[test]
    fn test_assemble_groups_by_document() {
        let ids = vec!["D1".to_string(), "D2".to_string()];
        let results = vec![
            (Dataset::RealPropertyMaster, Ok(vec![row("D2"), row("D1")])),
            (Dataset::RealPropertyParties, Ok(vec![row("D1"), row("D1"), row("D9")])),
            (Dataset::RealPropertyLegals, Ok(vec![])),
        ];

        let records = group_by_document(&ids, results);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].document_id, "D1");
        assert_eq!(records[0].master_records.len(), 1);
        assert_eq!(records[0].parties_records.len(), 2);
        assert!(records[0].legals_records.is_empty());
        assert_eq!(records[1].master_records.len(), 1);
        assert!(records[1].parties_records.is_empty());
        assert!(records.iter().all(CompositeRecord::is_complete));
    }

    #[test]
    fn test_assemble_marks_failed_kind() {
        let ids = vec!["D1".to_string()];
        let results = vec![
            (Dataset::RealPropertyMaster, Ok(vec![row("D1")])),
            (
                Dataset::RealPropertyRemarks,
                Err(FetchFailed {
                    dataset: Dataset::RealPropertyRemarks,
                }),
            ),
        ];

        let records = group_by_document(&ids, results);
        assert!(records[0].is_unavailable(RecordKind::Remarks));
        assert!(records[0].remarks_records.is_empty());
        assert!(!records[0].is_unavailable(RecordKind::Master));
    }

    #[test]
    fn test_rows_join_on_identifier_column() {
        let ids = vec!["D1".to_string()];
        let id_column = Dataset::PersonalPropertyParties.descriptor().id_column;
        let results = vec![(
            Dataset::PersonalPropertyParties,
            Ok(vec![
                Row::new().set(id_column, "D1").set("name", "ACME CORP"),
                Row::new().set("name", "NO IDENTIFIER"),
                Row::new().set(id_column, 42),
            ]),
        )];

        let records = group_by_document(&ids, results);
        assert_eq!(records[0].parties_records.len(), 1);
        assert_eq!(records[0].parties_records[0].get_str("name").unwrap(), Some("ACME CORP"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let record = CompositeRecord::new("D1");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "documentId": "D1",
                "masterRecords": [],
                "legalsRecords": [],
                "partiesRecords": [],
                "referencesRecords": [],
                "remarksRecords": []
            })
        );
    }
}
