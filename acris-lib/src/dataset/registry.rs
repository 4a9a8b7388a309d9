//! Dataset endpoint registry.

use std::collections::HashMap;

use url::Url;

use crate::error::ConfigError;

use super::Dataset;

/// Base URL of the NYC open-data resource API.
pub const DEFAULT_BASE_URL: &str = "https://data.cityofnewyork.us/resource/";

/// Maps datasets to the endpoint URLs requests are sent to.
///
/// By default every dataset resolves to `<base>/<resource-id>.json`. Individual datasets
/// can be pointed elsewhere with [`DatasetRegistry::with_endpoint`].
///
/// # Example
///
/// ```
/// use acris_lib::dataset::{Dataset, DatasetRegistry};
///
/// let registry = DatasetRegistry::default();
/// assert_eq!(
///     registry.resolve(Dataset::RealPropertyMaster).unwrap(),
///     "https://data.cityofnewyork.us/resource/bnx9-e6tj.json"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    base: Url,
    overrides: HashMap<Dataset, String>,
}

impl DatasetRegistry {
    /// Creates a registry rooted at the given base URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base = Url::parse(&normalized).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }
        Ok(Self {
            base,
            overrides: HashMap::new(),
        })
    }

    /// Overrides the endpoint of a single dataset.
    pub fn with_endpoint(mut self, dataset: Dataset, url: impl Into<String>) -> Self {
        self.overrides.insert(dataset, url.into());
        self
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Resolves the endpoint URL of a dataset.
    pub fn resolve(&self, dataset: Dataset) -> Result<String, ConfigError> {
        if let Some(url) = self.overrides.get(&dataset) {
            return Ok(url.clone());
        }
        let resource = format!("{}.json", dataset.descriptor().resource_id);
        self.base
            .join(&resource)
            .map(String::from)
            .map_err(|_| ConfigError::UnresolvedEndpoint { dataset })
    }

    /// Resolves the endpoint URL of a dataset given its dispatch key.
    pub fn resolve_name(&self, name: &str) -> Result<String, ConfigError> {
        self.resolve(name.parse()?)
    }
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("default base URL is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default() {
        let registry = DatasetRegistry::default();
        assert_eq!(
            registry.resolve(Dataset::PersonalPropertyMaster).unwrap(),
            "https://data.cityofnewyork.us/resource/sv7x-dduq.json"
        );
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let registry = DatasetRegistry::new("http://localhost:8080/resource").unwrap();
        assert_eq!(
            registry.resolve(Dataset::RealPropertyRemarks).unwrap(),
            "http://localhost:8080/resource/9p4w-7npp.json"
        );
    }

    #[test]
    fn test_override() {
        let registry = DatasetRegistry::default()
            .with_endpoint(Dataset::RealPropertyLegals, "http://mirror/legals.json");
        assert_eq!(
            registry.resolve(Dataset::RealPropertyLegals).unwrap(),
            "http://mirror/legals.json"
        );
    }

    #[test]
    fn test_resolve_name() {
        let registry = DatasetRegistry::default();
        assert!(registry.resolve_name("personal_property_parties").is_ok());
        assert!(matches!(
            registry.resolve_name("acris_master"),
            Err(ConfigError::UnknownDataset { .. })
        ));
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            DatasetRegistry::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
