//! Typed models

mod composite;
mod criteria;
mod row;

pub use composite::*;
pub use criteria::*;
pub use row::*;
