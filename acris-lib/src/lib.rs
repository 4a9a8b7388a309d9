//! ACRIS land records client library
//!
//! A Rust async client for the NYC ACRIS datasets published on the city's open-data
//! portal. It builds filtered queries per dataset, pages through results, and
//! cross-references datasets on their shared document identifier.

pub mod api;
pub mod auth;
pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod transport;

mod client;

pub use client::*;
