//! Splitting identifier sets into bounded requests.

use crate::error::ConfigError;

use super::FilterExpression;
use super::PageWindow;
use super::Predicate;
use super::RequestDescriptor;

/// Default number of identifiers per request.
///
/// Keeps generated URLs within the length the open-data API accepts.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Builds one request per batch of identifiers.
///
/// Each descriptor carries `base`'s predicates plus `<id_column> IN (batch)`, and
/// otherwise copies the dataset, endpoint, projection and window of `template`.
/// Batches are contiguous and keep input order; the last one may be short. No
/// identifiers yields no requests.
pub fn plan_batches(
    template: &RequestDescriptor,
    base: &FilterExpression,
    ids: &[String],
    batch_size: usize,
) -> Result<Vec<RequestDescriptor>, ConfigError> {
    if batch_size == 0 {
        return Err(ConfigError::InvalidBatchSize(batch_size));
    }

    let id_column = template.dataset().descriptor().id_column;

    Ok(ids
        .chunks(batch_size)
        .map(|batch| {
            let filter = base
                .clone()
                .and(Predicate::is_in(id_column, batch.iter().map(String::as_str)));
            RequestDescriptor::new(
                template.dataset(),
                template.endpoint(),
                filter,
                template.projection().clone(),
                template.window(),
            )
        })
        .collect())
}

/// Returns how many identifiers a batch request is restricted to.
pub(crate) fn batch_members(request: &RequestDescriptor) -> usize {
    let id_column = request.dataset().descriptor().id_column;
    request
        .filter()
        .predicates()
        .iter()
        .filter_map(|p| match p {
            Predicate::In(column, values) if column == id_column => Some(values.len()),
            _ => None,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::Literal;
    use crate::api::query::Projection;
    use crate::dataset::Dataset;

    fn template() -> RequestDescriptor {
        RequestDescriptor::new(
            Dataset::RealPropertyParties,
            "http://test/parties.json",
            FilterExpression::new(),
            Projection::All,
            PageWindow::default(),
        )
    }

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("D{}", i)).collect()
    }

    fn members(request: &RequestDescriptor) -> Vec<String> {
        request
            .filter()
            .predicates()
            .iter()
            .find_map(|p| match p {
                Predicate::In(_, values) => Some(
                    values
                        .iter()
                        .map(|v| match v {
                            Literal::Text(s) | Literal::Number(s) => s.clone(),
                        })
                        .collect(),
                ),
                _ => None,
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_batches_partition_in_order() {
        for (n, size) in [(0, 500), (1, 500), (500, 500), (501, 500), (1234, 100), (7, 3), (5, 1)] {
            let input = ids(n);
            let requests = plan_batches(&template(), &FilterExpression::new(), &input, size).unwrap();

            assert_eq!(requests.len(), n.div_ceil(size), "n={} size={}", n, size);
            assert!(requests.iter().all(|r| batch_members(r) <= size));

            let rejoined: Vec<String> = requests.iter().flat_map(members).collect();
            assert_eq!(rejoined, input);
        }
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert_eq!(
            plan_batches(&template(), &FilterExpression::new(), &ids(3), 0).unwrap_err(),
            ConfigError::InvalidBatchSize(0)
        );
    }

    #[test]
    fn test_base_predicates_kept() {
        let base = FilterExpression::new().and(Predicate::like("name", "SMITH"));
        let requests = plan_batches(&template(), &base, &ids(3), 2).unwrap();
        assert_eq!(
            requests[0].filter().to_soql(),
            "name like '%SMITH%' AND document_id IN ('D0','D1')"
        );
        assert_eq!(
            requests[1].filter().to_soql(),
            "name like '%SMITH%' AND document_id IN ('D2')"
        );
    }

    #[test]
    fn test_quotes_in_ids_escaped() {
        let requests =
            plan_batches(&template(), &FilterExpression::new(), &["A'B".to_string()], 10).unwrap();
        assert_eq!(requests[0].filter().to_soql(), "document_id IN ('A''B')");
    }
}
