//! TokenProvider trait and AppToken

use async_trait::async_trait;

use crate::error::AuthError;

/// Environment variable read by [`EnvTokenProvider::default`].
pub const APP_TOKEN_VAR: &str = "NYC_OPEN_DATA_APP_TOKEN";

/// An open-data app token.
///
/// The token is opaque; it is sent verbatim in the `X-App-Token` header.
#[derive(Clone)]
pub struct AppToken {
    token: String,
}

impl AppToken {
    /// Creates a new app token.
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Returns the token string.
    pub fn as_str(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for AppToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AppToken(***)")
    }
}

/// Trait for providing the app token to the HTTP transport.
///
/// The transport calls `get_token` before each request.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use acris_lib::auth::{AppToken, TokenProvider};
/// use acris_lib::error::AuthError;
///
/// struct VaultTokenProvider { /* ... */ }
///
/// #[async_trait]
/// impl TokenProvider for VaultTokenProvider {
///     async fn get_token(&self) -> Result<AppToken, AuthError> {
///         todo!("Read the token from the secret store")
///     }
/// }
/// ```
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets the app token.
    async fn get_token(&self) -> Result<AppToken, AuthError>;
}

/// A token provider that always returns the same static token.
///
/// # Example
///
/// ```
/// use acris_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("my-app-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AppToken,
}

impl StaticTokenProvider {
    /// Creates a new static token provider with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AppToken::new(token),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<AppToken, AuthError> {
        if self.token.as_str().trim().is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(self.token.clone())
    }
}

/// A token provider that reads the token from an environment variable on each call.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    /// Creates a provider reading the given variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new(APP_TOKEN_VAR)
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn get_token(&self) -> Result<AppToken, AuthError> {
        let token = std::env::var(&self.var).map_err(|_| AuthError::MissingToken {
            var: self.var.clone(),
        })?;
        if token.trim().is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(AppToken::new(token))
    }
}
