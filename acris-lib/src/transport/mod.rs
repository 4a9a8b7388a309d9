//! Transport to the open-data API.
//!
//! The fetcher only needs one capability: GET a URL and receive a page of rows.
//! [`HttpTransport`] implements it over HTTPS; tests substitute in-memory transports.

mod http;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::model::Row;

pub use http::HttpTransport;

/// Issues read-only requests against dataset endpoints.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the rows returned for `url`.
    async fn get(&self, url: &str) -> Result<Vec<Row>, TransportError>;
}
