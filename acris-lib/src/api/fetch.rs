//! Paginated fetching
//!
//! Every fetch walks the pages of one request until the dataset reports exhaustion:
//! a page shorter than the page size, or an empty page. Pages of one request are
//! fetched strictly in sequence since each offset depends on the previous page.
//! Batched requests are fetched one after another and concatenated.
//!
//! Transport failures are logged here and surface as [`FetchError::Failed`], which names
//! the dataset but carries no transport detail. Nothing is retried.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;
use tracing::warn;

use crate::AcrisClient;
use crate::api::query::FilterExpression;
use crate::api::query::Page;
use crate::api::query::PageStep;
use crate::api::query::PageWindow;
use crate::api::query::Predicate;
use crate::api::query::Projection;
use crate::api::query::RequestDescriptor;
use crate::api::query::assemble;
use crate::api::query::batch_members;
use crate::api::query::plan_batches;
use crate::dataset::Dataset;
use crate::error::ConfigError;
use crate::error::Error;
use crate::error::FetchError;
use crate::error::FetchFailed;
use crate::model::FilterCriteria;
use crate::model::Row;

impl AcrisClient {
    /// Builds a request for `dataset` from filter criteria.
    ///
    /// Unrecognized criteria keys are ignored; with no recognized keys the request matches
    /// every row.
    pub fn request(
        &self,
        dataset: Dataset,
        criteria: &FilterCriteria,
        projection: Projection,
        window: PageWindow,
    ) -> Result<RequestDescriptor, ConfigError> {
        let filter = dataset.descriptor().build_predicates(criteria)?;
        assemble(self.registry(), dataset, filter, projection, window)
    }

    /// Builds one request per batch of identifiers, each restricted to its batch and to
    /// `base`.
    pub fn plan_id_batches(
        &self,
        dataset: Dataset,
        base: &FilterExpression,
        ids: &[String],
        projection: Projection,
    ) -> Result<Vec<RequestDescriptor>, ConfigError> {
        let template = assemble(
            self.registry(),
            dataset,
            FilterExpression::new(),
            projection,
            PageWindow::default(),
        )?;
        plan_batches(&template, base, ids, self.batch_size())
    }

    /// Fetches every row matching the request.
    ///
    /// An empty result is a valid answer.
    pub async fn fetch_rows(&self, request: &RequestDescriptor) -> Result<Vec<Row>, FetchError> {
        let mut rows = Vec::new();
        self.paginate(request, |page| rows.extend(page)).await?;
        Ok(rows)
    }

    /// Fetches every row matching the request, failing with
    /// [`FetchError::NotFound`] if there are none.
    pub async fn find_rows(&self, request: &RequestDescriptor) -> Result<Vec<Row>, FetchError> {
        let rows = self.fetch_rows(request).await?;
        if rows.is_empty() {
            return Err(FetchError::not_found(request.dataset()));
        }
        Ok(rows)
    }

    /// Fetches the distinct document identifiers of the matching rows, in first-seen order.
    pub async fn fetch_ids(&self, request: &RequestDescriptor) -> Result<Vec<String>, FetchError> {
        self.fetch_batched_ids(std::slice::from_ref(request)).await
    }

    /// Counts the rows matching the request's filter with a single aggregate request.
    pub async fn fetch_count(&self, request: &RequestDescriptor) -> Result<u64, FetchError> {
        let dataset = request.dataset();
        let count_request = RequestDescriptor::new(
            dataset,
            request.endpoint(),
            request.filter().clone(),
            Projection::Count,
            PageWindow::default(),
        );

        let rows = self.fetch_page(&count_request).await?;
        rows.first()
            .and_then(count_value)
            .ok_or_else(|| {
                warn!(dataset = %dataset, "count response held no count");
                FetchError::failed(dataset)
            })
    }

    /// Fetches every row of every request, concatenated in request order.
    pub async fn fetch_batched_rows(&self, requests: &[RequestDescriptor]) -> Result<Vec<Row>, FetchError> {
        let mut rows = Vec::new();
        for request in requests {
            debug!(
                dataset = %request.dataset(),
                ids = batch_members(request),
                "fetching batch"
            );
            self.paginate(request, |page| rows.extend(page)).await?;
        }
        Ok(rows)
    }

    /// Fetches the distinct document identifiers across every request.
    pub async fn fetch_batched_ids(&self, requests: &[RequestDescriptor]) -> Result<Vec<String>, FetchError> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for request in requests {
            let id_column = request.dataset().descriptor().id_column;
            let request = if self.orders_id_pages() {
                request.with_order(id_column)
            } else {
                request.clone()
            };
            self.paginate(&request, |page| {
                for row in page {
                    let Some(id) = row.get(id_column).and_then(Value::as_str) else {
                        continue;
                    };
                    if seen.insert(id.to_string()) {
                        ids.push(id.to_string());
                    }
                }
            })
            .await?;
        }

        Ok(ids)
    }

    /// Fetches every row of `dataset` belonging to the given documents.
    ///
    /// Used for fan-out where partial results are acceptable: any failure is logged and
    /// reported as the [`FetchFailed`] sentinel instead of an error chain. No identifiers
    /// means no request.
    pub async fn fetch_records_by_ids(&self, dataset: Dataset, ids: &[String]) -> Result<Vec<Row>, FetchFailed> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let requests = self
            .plan_id_batches(dataset, &FilterExpression::new(), ids, Projection::All)
            .map_err(|e| {
                warn!(dataset = %dataset, error = %e, "could not plan bulk fetch");
                FetchFailed { dataset }
            })?;

        self.fetch_batched_rows(&requests).await.map_err(|e| {
            warn!(dataset = %dataset, error = %e, "bulk fetch failed, continuing without rows");
            FetchFailed { dataset }
        })
    }

    /// Fetches every row of one document, failing with a not found error if it has none.
    pub async fn document(&self, dataset: Dataset, document_id: &str) -> Result<Vec<Row>, Error> {
        let id_column = dataset.descriptor().id_column;
        let filter = FilterExpression::new().and(Predicate::eq(id_column, document_id));
        let request = assemble(self.registry(), dataset, filter, Projection::All, PageWindow::default())?;
        Ok(self.find_rows(&request).await?)
    }

    /// Walks the pages of one request, handing each page's rows to `absorb`.
    async fn paginate<F>(&self, request: &RequestDescriptor, mut absorb: F) -> Result<(), FetchError>
    where
        F: FnMut(Vec<Row>),
    {
        let window = request.window();
        let page_size = window.limit.unwrap_or(self.page_size());
        let mut offset = window.offset.unwrap_or(0);

        loop {
            let page_request = request.with_window(PageWindow::new(page_size, offset));
            let page = Page::new(self.fetch_page(&page_request).await?, offset, page_size);
            debug!(
                dataset = %request.dataset(),
                offset,
                rows = page.len(),
                "fetched page"
            );

            let step = page.next_step();
            if !page.is_empty() {
                absorb(page.into_rows());
            }
            match step {
                PageStep::Continue { offset: next } => offset = next,
                PageStep::Done => return Ok(()),
            }
        }
    }

    /// Issues one request, normalizing transport failures.
    pub(crate) async fn fetch_page(&self, request: &RequestDescriptor) -> Result<Vec<Row>, FetchError> {
        let url = request.url();
        self.transport().get(&url).await.map_err(|e| {
            warn!(dataset = %request.dataset(), url = %url, error = %e, "request failed");
            FetchError::failed(request.dataset())
        })
    }
}

/// Reads the aggregate from a `count(*)` row, which the API returns as `{"count": "N"}`.
fn count_value(row: &Row) -> Option<u64> {
    let value = row
        .get("count")
        .or_else(|| row.fields().values().next())?;
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
