//! Fluent query builder.

use crate::AcrisClient;
use crate::dataset::Dataset;
use crate::error::Error;
use crate::error::FetchError;
use crate::model::FilterCriteria;
use crate::model::Row;

use super::PageWindow;
use super::Projection;
use super::RequestDescriptor;

/// Builder for a query against one dataset.
///
/// Use [`AcrisClient::query`] to create a query builder.
///
/// # Example
///
/// ```ignore
/// let criteria = FilterCriteria::new()
///     .with("doc_type", "DEED,MTGE")
///     .with("recorded_borough", 1);
///
/// let rows = client.query(Dataset::RealPropertyMaster)
///     .criteria(&criteria)
///     .select(Projection::fields(&["document_id", "doc_type"]))
///     .rows()
///     .await?;
/// ```
pub struct QueryBuilder<'a> {
    client: &'a AcrisClient,
    dataset: Dataset,
    criteria: FilterCriteria,
    projection: Projection,
    window: PageWindow,
}

impl<'a> QueryBuilder<'a> {
    /// Creates a new query builder for the given dataset.
    pub(crate) fn new(client: &'a AcrisClient, dataset: Dataset) -> Self {
        Self {
            client,
            dataset,
            criteria: FilterCriteria::new(),
            projection: Projection::All,
            window: PageWindow::default(),
        }
    }

    /// Sets the filter criteria.
    ///
    /// Keys outside the dataset's vocabulary are ignored.
    pub fn criteria(mut self, criteria: &FilterCriteria) -> Self {
        self.criteria = criteria.clone();
        self
    }

    /// Adds a single criterion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<crate::model::CriterionValue>) -> Self {
        self.criteria.insert(key, value);
        self
    }

    /// Specifies which columns to return.
    ///
    /// If not called, all columns are returned.
    pub fn select(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Sets the page size used while paginating.
    pub fn limit(mut self, n: usize) -> Self {
        self.window.limit = Some(n);
        self
    }

    /// Sets the offset pagination starts from.
    pub fn offset(mut self, n: usize) -> Self {
        self.window.offset = Some(n);
        self
    }

    /// Builds the request descriptor without sending anything.
    pub fn build(&self) -> Result<RequestDescriptor, Error> {
        Ok(self
            .client
            .request(self.dataset, &self.criteria, self.projection.clone(), self.window)?)
    }

    /// Fetches every matching row.
    pub async fn rows(self) -> Result<Vec<Row>, Error> {
        let request = self.build()?;
        Ok(self.client.fetch_rows(&request).await?)
    }

    /// Fetches every matching row, failing with a not found error if there are none.
    pub async fn find(self) -> Result<Vec<Row>, Error> {
        let request = self.build()?;
        Ok(self.client.find_rows(&request).await?)
    }

    /// Fetches the distinct document identifiers of the matching rows.
    ///
    /// Overrides any projection with the dataset's identifier column.
    pub async fn document_ids(mut self) -> Result<Vec<String>, Error> {
        self.projection = Projection::field(self.dataset.descriptor().id_column);
        let request = self.build()?;
        Ok(self.client.fetch_ids(&request).await?)
    }

    /// Counts the matching rows.
    pub async fn count(mut self) -> Result<u64, Error> {
        self.projection = Projection::Count;
        let request = self.build()?;
        Ok(self.client.fetch_count(&request).await?)
    }

    /// Fetches the first matching row with a single request.
    pub async fn first(mut self) -> Result<Row, Error> {
        self.window.limit = Some(1);
        let request = self.build()?;
        let rows = self.client.fetch_page(&request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| FetchError::not_found(self.dataset).into())
    }
}

impl AcrisClient {
    /// Starts a query against a dataset.
    pub fn query(&self, dataset: Dataset) -> QueryBuilder<'_> {
        QueryBuilder::new(self, dataset)
    }
}
