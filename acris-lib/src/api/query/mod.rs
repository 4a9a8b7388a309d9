//! Query construction for the ACRIS resource API.
//!
//! A query goes through three pure steps before anything is sent:
//!
//! - [`FilterExpression`] - predicates built from filter criteria, rendered as a SoQL
//!   `$where` clause
//! - [`RequestDescriptor`] - endpoint, filter, [`Projection`] and [`PageWindow`], rendered
//!   as the request URL by [`assemble`]
//! - [`plan_batches`] - one descriptor per bounded batch of document identifiers
//!
//! [`QueryBuilder`] wraps them behind a fluent interface on the client.

mod batch;
mod builder;
mod filter;
mod page;
mod request;
mod soql;

pub use batch::DEFAULT_BATCH_SIZE;
pub use batch::plan_batches;
pub(crate) use batch::batch_members;
pub use builder::QueryBuilder;
pub use filter::FilterExpression;
pub use filter::Literal;
pub use filter::Predicate;
pub use page::DEFAULT_PAGE_SIZE;
pub use page::Page;
pub use page::PageStep;
pub use page::next_step;
pub use request::PageWindow;
pub use request::Projection;
pub use request::RequestDescriptor;
pub use request::assemble;
pub use soql::quote;
