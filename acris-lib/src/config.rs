//! Environment configuration

use std::env;

use crate::api::query::DEFAULT_BATCH_SIZE;
use crate::api::query::DEFAULT_PAGE_SIZE;
use crate::auth::APP_TOKEN_VAR;
use crate::dataset::DEFAULT_BASE_URL;
use crate::error::ConfigError;

/// Variable overriding the resource API base URL.
pub const BASE_URL_VAR: &str = "ACRIS_BASE_URL";
/// Variable overriding the page size.
pub const PAGE_SIZE_VAR: &str = "ACRIS_PAGE_SIZE";
/// Variable overriding the batch size.
pub const BATCH_SIZE_VAR: &str = "ACRIS_BATCH_SIZE";

/// Settings for an HTTP-backed [`AcrisClient`](crate::AcrisClient).
///
/// | Variable                  | Default                                   |
/// |---------------------------|-------------------------------------------|
/// | `NYC_OPEN_DATA_APP_TOKEN` | required                                  |
/// | `ACRIS_BASE_URL`          | `https://data.cityofnewyork.us/resource/` |
/// | `ACRIS_PAGE_SIZE`         | `1000`                                    |
/// | `ACRIS_BATCH_SIZE`        | `500`                                     |
#[derive(Clone)]
pub struct AcrisConfig {
    pub base_url: String,
    pub app_token: String,
    pub page_size: usize,
    pub batch_size: usize,
}

impl AcrisConfig {
    /// Creates a configuration with default endpoints and sizes.
    pub fn new(app_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_token: app_token.into(),
            page_size: DEFAULT_PAGE_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_token = lookup(APP_TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::Env {
                var: APP_TOKEN_VAR.to_string(),
                message: "not set".to_string(),
            })?;

        let mut config = Self::new(app_token);
        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Some(size) = lookup(PAGE_SIZE_VAR) {
            config.page_size = parse_size(PAGE_SIZE_VAR, &size)?;
        }
        if let Some(size) = lookup(BATCH_SIZE_VAR) {
            config.batch_size = parse_size(BATCH_SIZE_VAR, &size)?;
        }
        Ok(config)
    }
}

impl std::fmt::Debug for AcrisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcrisConfig")
            .field("base_url", &self.base_url)
            .field("app_token", &"***")
            .field("page_size", &self.page_size)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

fn parse_size(var: &str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::Env {
            var: var.to_string(),
            message: "must be greater than zero".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::Env {
            var: var.to_string(),
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AcrisConfig::from_lookup(lookup(&[(APP_TOKEN_VAR, "tok")])).unwrap();
        assert_eq!(config.app_token, "tok");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.batch_size, 500);
    }

    #[test]
    fn test_overrides() {
        let config = AcrisConfig::from_lookup(lookup(&[
            (APP_TOKEN_VAR, "tok"),
            (BASE_URL_VAR, "http://localhost:9000/resource"),
            (PAGE_SIZE_VAR, "250"),
            (BATCH_SIZE_VAR, " 100 "),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/resource");
        assert_eq!(config.page_size, 250);
        assert_eq!(config.batch_size, 100);
    }

    #[test]
    fn test_missing_token() {
        let err = AcrisConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { ref var, .. } if var == APP_TOKEN_VAR));
    }

    #[test]
    fn test_invalid_sizes() {
        let err = AcrisConfig::from_lookup(lookup(&[(APP_TOKEN_VAR, "tok"), (BATCH_SIZE_VAR, "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { ref var, .. } if var == BATCH_SIZE_VAR));

        let err = AcrisConfig::from_lookup(lookup(&[(APP_TOKEN_VAR, "tok"), (PAGE_SIZE_VAR, "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { ref var, .. } if var == PAGE_SIZE_VAR));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = AcrisConfig::new("secret");
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
