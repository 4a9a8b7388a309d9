//! Error types

mod auth;
mod config;
mod fetch;
mod field;
mod transport;

pub use auth::*;
pub use config::*;
pub use fetch::*;
pub use field::*;
pub use transport::*;

/// Top-level error returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Misconfiguration or invalid caller input, raised before any request is sent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A query against a single dataset failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// One of the mandatory stages of a cross-reference failed.
    #[error(transparent)]
    CrossReference(#[from] CrossReferenceError),
}

impl Error {
    /// Returns `true` if the query ran but matched nothing where a row was expected.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_not_found(),
            Self::CrossReference(e) => e.source_error().is_not_found(),
            _ => false,
        }
    }
}
