//! Request descriptors and URL assembly.

use crate::dataset::Dataset;
use crate::dataset::DatasetRegistry;
use crate::error::ConfigError;

use super::FilterExpression;

/// Which columns a request returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    /// Every column; no `$select` clause.
    #[default]
    All,
    /// A single aggregate row holding the number of matches.
    Count,
    /// One column.
    Field(String),
    /// Several columns.
    Fields(Vec<String>),
}

impl Projection {
    /// Creates a single-column projection.
    pub fn field(name: impl Into<String>) -> Self {
        Projection::Field(name.into())
    }

    /// Creates a multi-column projection.
    pub fn fields(names: &[&str]) -> Self {
        Projection::Fields(names.iter().map(|s| (*s).to_string()).collect())
    }

    /// Returns `true` for the count projection.
    pub fn is_count(&self) -> bool {
        matches!(self, Projection::Count)
    }

    fn to_select(&self) -> Option<String> {
        match self {
            Projection::All => None,
            Projection::Count => Some("count(*)".to_string()),
            Projection::Field(field) => Some(field.clone()),
            Projection::Fields(fields) if fields.is_empty() => None,
            Projection::Fields(fields) => Some(fields.join(",")),
        }
    }
}

/// A page window: `$limit` and `$offset`, each optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl PageWindow {
    /// Creates a window with both limit and offset.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }
}

/// A fully formed request against one dataset.
///
/// The descriptor keeps its parts so the fetcher can move the page window; [`url`]
/// renders the final request URL.
///
/// [`url`]: RequestDescriptor::url
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    dataset: Dataset,
    endpoint: String,
    filter: FilterExpression,
    projection: Projection,
    window: PageWindow,
    order: Option<String>,
}

impl RequestDescriptor {
    /// Creates a descriptor.
    ///
    /// A count projection drops the window, since pagination has no meaning for an
    /// aggregate.
    pub fn new(
        dataset: Dataset,
        endpoint: impl Into<String>,
        filter: FilterExpression,
        projection: Projection,
        window: PageWindow,
    ) -> Self {
        let window = if projection.is_count() {
            PageWindow::default()
        } else {
            window
        };
        Self {
            dataset,
            endpoint: endpoint.into(),
            filter,
            projection,
            window,
            order: None,
        }
    }

    /// Returns the dataset.
    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the filter expression.
    pub fn filter(&self) -> &FilterExpression {
        &self.filter
    }

    /// Returns the projection.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Returns the page window.
    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Returns the column results are ordered by, if any.
    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    /// Returns a copy of this descriptor with a different page window.
    pub fn with_window(&self, window: PageWindow) -> Self {
        let mut request = Self::new(
            self.dataset,
            self.endpoint.clone(),
            self.filter.clone(),
            self.projection.clone(),
            window,
        );
        request.order = self.order.clone();
        request
    }

    /// Returns a copy of this descriptor ordered by `column`.
    ///
    /// The API only guarantees a stable row order across `$offset` pages when one is
    /// requested. Ignored for count requests.
    pub fn with_order(&self, column: impl Into<String>) -> Self {
        let mut request = self.clone();
        request.order = Some(column.into());
        request
    }

    /// Renders the request URL.
    ///
    /// `<endpoint>?[$select=..&][$where=..][&$order=..][&$limit=n][&$offset=n]`, with the
    /// select, where and order clauses percent-encoded. Identical descriptors render
    /// byte-identical URLs.
    pub fn url(&self) -> String {
        let mut params = Vec::new();

        // $select
        if let Some(select) = self.projection.to_select() {
            params.push(format!("$select={}", urlencoding::encode(&select)));
        }

        // $where
        if !self.filter.is_empty() {
            params.push(format!("$where={}", urlencoding::encode(&self.filter.to_soql())));
        }

        if !self.projection.is_count() {
            if let Some(order) = &self.order {
                params.push(format!("$order={}", urlencoding::encode(order)));
            }
            if let Some(limit) = self.window.limit {
                params.push(format!("$limit={}", limit));
            }
            if let Some(offset) = self.window.offset {
                params.push(format!("$offset={}", offset));
            }
        }

        if params.is_empty() {
            self.endpoint.clone()
        } else {
            format!("{}?{}", self.endpoint, params.join("&"))
        }
    }
}

/// Assembles a request descriptor, resolving the dataset endpoint through the registry.
pub fn assemble(
    registry: &DatasetRegistry,
    dataset: Dataset,
    filter: FilterExpression,
    projection: Projection,
    window: PageWindow,
) -> Result<RequestDescriptor, ConfigError> {
    let endpoint = registry.resolve(dataset)?;
    Ok(RequestDescriptor::new(dataset, endpoint, filter, projection, window))
}
