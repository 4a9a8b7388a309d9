//! HTTPS transport

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;

use crate::auth::TokenProvider;
use crate::error::AuthError;
use crate::error::TransportError;
use crate::model::Row;

use super::Transport;

const APP_TOKEN_HEADER: &str = "X-App-Token";

/// Sends requests to the open-data API with the app token attached.
#[derive(Clone)]
pub struct HttpTransport {
    http_client: Client,
    token_provider: Arc<dyn TokenProvider>,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport from an HTTP client and token provider.
    pub fn new(http_client: Client, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            http_client,
            token_provider,
            timeout: None,
        }
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn headers(&self) -> Result<HeaderMap, TransportError> {
        let token = self.token_provider.get_token().await?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            APP_TOKEN_HEADER,
            HeaderValue::from_str(token.as_str()).map_err(|_| AuthError::InvalidToken)?,
        );
        Ok(headers)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<Row>, TransportError> {
        let parsed = url::Url::parse(url).map_err(|_| TransportError::InvalidUrl(url.to_string()))?;
        let headers = self.headers().await?;

        let mut request = self.http_client.get(parsed).headers(headers);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::http(status.as_u16(), body));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| TransportError::parse_with_body(e.to_string(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;

    fn transport(token: &str) -> HttpTransport {
        HttpTransport::new(Client::new(), Arc::new(StaticTokenProvider::new(token)))
    }

    #[tokio::test]
    async fn test_headers() {
        let headers = transport("abc123").headers().await.unwrap();
        assert_eq!(headers.get(APP_TOKEN_HEADER).unwrap(), "abc123");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[tokio::test]
    async fn test_token_with_newline_rejected() {
        let err = transport("abc\n").headers().await.unwrap_err();
        assert!(matches!(err, TransportError::Auth(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let err = transport("abc").get("not a url").await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }
}
