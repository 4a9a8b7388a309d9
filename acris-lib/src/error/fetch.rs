//! Fetch and cross-reference error types

use std::fmt;

use crate::dataset::Dataset;

/// Errors raised at the fetch boundary for a single dataset.
///
/// Transport details are logged where they occur and never carried here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// A request against the dataset failed.
    #[error("failed to fetch from {dataset}")]
    Failed { dataset: Dataset },

    /// The query succeeded but matched no rows where at least one was expected.
    #[error("{dataset}: not found for this query")]
    NotFound { dataset: Dataset },
}

impl FetchError {
    /// Creates a failed fetch error.
    pub fn failed(dataset: Dataset) -> Self {
        Self::Failed { dataset }
    }

    /// Creates a not found error.
    pub fn not_found(dataset: Dataset) -> Self {
        Self::NotFound { dataset }
    }

    /// Returns the dataset the error refers to.
    pub fn dataset(&self) -> Dataset {
        match self {
            Self::Failed { dataset } | Self::NotFound { dataset } => *dataset,
        }
    }

    /// Returns `true` for the not found case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Sentinel for a bulk fetch that failed.
///
/// Used where partial results across datasets are acceptable: the caller records the
/// failure and carries on with the other datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no data from {dataset}")]
pub struct FetchFailed {
    pub dataset: Dataset,
}

/// The mandatory stage of a cross-reference that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Collecting identifiers from the anchor dataset.
    Anchor,
    /// Restricting the filter dataset to the anchor identifiers.
    CrossReference,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Anchor => f.write_str("anchor lookup"),
            Stage::CrossReference => f.write_str("cross-reference"),
        }
    }
}

/// A cross-reference aborted during one of its mandatory stages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cross-reference {anchor} -> {filter} failed during {stage}")]
pub struct CrossReferenceError {
    /// The stage that failed.
    pub stage: Stage,
    /// The anchor dataset of the pair.
    pub anchor: Dataset,
    /// The filter dataset of the pair.
    pub filter: Dataset,
    #[source]
    source: FetchError,
}

impl CrossReferenceError {
    /// Creates a new cross-reference error.
    pub fn new(stage: Stage, anchor: Dataset, filter: Dataset, source: FetchError) -> Self {
        Self {
            stage,
            anchor,
            filter,
            source,
        }
    }

    /// Returns the underlying fetch error.
    pub fn source_error(&self) -> &FetchError {
        &self.source
    }
}
