//! Resource API operations

mod crossref;
mod fetch;
pub mod query;

pub use crossref::*;
