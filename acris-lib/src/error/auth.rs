//! App token error types

/// Errors that can occur while obtaining the open-data app token.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// The environment variable holding the token is not set.
    #[error("App token variable {var} is not set")]
    MissingToken { var: String },

    /// The token is present but blank.
    #[error("App token is empty")]
    EmptyToken,

    /// The token contains characters that cannot be sent in a header.
    #[error("App token is not a valid header value")]
    InvalidToken,
}
