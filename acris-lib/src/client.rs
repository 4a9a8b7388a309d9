//! Main AcrisClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::api::query::DEFAULT_BATCH_SIZE;
use crate::api::query::DEFAULT_PAGE_SIZE;
use crate::auth::StaticTokenProvider;
use crate::auth::TokenProvider;
use crate::config::AcrisConfig;
use crate::dataset::DatasetRegistry;
use crate::error::ConfigError;
use crate::transport::HttpTransport;
use crate::transport::Transport;

/// The client for querying and cross-referencing ACRIS datasets.
///
/// This client is cheap to clone (uses `Arc` internally) and holds no per-query state:
/// every call builds its own accumulators.
///
/// # Example
///
/// ```ignore
/// use acris_lib::{AcrisClient, auth::StaticTokenProvider};
///
/// let client = AcrisClient::builder()
///     .token_provider(StaticTokenProvider::new("my-app-token"))
///     .build()?;
/// ```
#[derive(Clone)]
pub struct AcrisClient {
    pub(crate) inner: Arc<AcrisClientInner>,
}

pub(crate) struct AcrisClientInner {
    pub(crate) registry: DatasetRegistry,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) page_size: usize,
    pub(crate) batch_size: usize,
    pub(crate) order_id_pages: bool,
}

impl AcrisClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> AcrisClientBuilder<Missing> {
        AcrisClientBuilder::new()
    }

    /// Creates an HTTP client from loaded configuration.
    pub fn from_config(config: AcrisConfig) -> Result<Self, ConfigError> {
        AcrisClient::builder()
            .token_provider(StaticTokenProvider::new(config.app_token))
            .registry(DatasetRegistry::new(&config.base_url)?)
            .page_size(config.page_size)
            .batch_size(config.batch_size)
            .build()
    }

    /// Creates an HTTP client configured from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_config(AcrisConfig::from_env()?)
    }

    /// Returns the dataset registry.
    pub fn registry(&self) -> &DatasetRegistry {
        &self.inner.registry
    }

    /// Returns the number of rows requested per page.
    pub fn page_size(&self) -> usize {
        self.inner.page_size
    }

    /// Returns the number of identifiers per batch request.
    pub fn batch_size(&self) -> usize {
        self.inner.batch_size
    }

    /// Returns `true` if identifier lookups request `$order` by the identifier column.
    pub fn orders_id_pages(&self) -> bool {
        self.inner.order_id_pages
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Where requests go.
pub enum TransportSource {
    /// HTTPS with the given app token provider.
    Http(Arc<dyn TokenProvider>),
    /// A caller-supplied transport.
    Custom(Arc<dyn Transport>),
}

/// Builder for constructing an [`AcrisClient`].
///
/// Uses the typestate pattern so a client cannot be built without a transport: call
/// either [`token_provider`](AcrisClientBuilder::token_provider) for HTTPS or
/// [`transport`](AcrisClientBuilder::transport) for a custom transport.
///
/// # Example
///
/// ```ignore
/// let client = AcrisClient::builder()
///     .token_provider(EnvTokenProvider::default())
///     .page_size(1000)
///     .batch_size(500)
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct AcrisClientBuilder<T> {
    transport: T,
    registry: Option<DatasetRegistry>,
    page_size: usize,
    batch_size: usize,
    order_id_pages: bool,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl AcrisClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            transport: Missing,
            registry: None,
            page_size: DEFAULT_PAGE_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            order_id_pages: false,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sends requests over HTTPS, authenticating with the given token provider.
    pub fn token_provider<P: TokenProvider + 'static>(
        self,
        provider: P,
    ) -> AcrisClientBuilder<Set<TransportSource>> {
        self.with_source(TransportSource::Http(Arc::new(provider)))
    }

    /// Sends requests through a custom transport.
    pub fn transport<R: Transport + 'static>(self, transport: R) -> AcrisClientBuilder<Set<TransportSource>> {
        self.with_source(TransportSource::Custom(Arc::new(transport)))
    }

    fn with_source(self, source: TransportSource) -> AcrisClientBuilder<Set<TransportSource>> {
        AcrisClientBuilder {
            transport: Set(source),
            registry: self.registry,
            page_size: self.page_size,
            batch_size: self.batch_size,
            order_id_pages: self.order_id_pages,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for AcrisClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AcrisClientBuilder<T> {
    /// Sets the dataset registry.
    ///
    /// Defaults to the NYC open-data portal.
    pub fn registry(mut self, registry: DatasetRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the number of rows requested per page.
    ///
    /// Defaults to 1000.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the number of identifiers per batch request.
    ///
    /// Defaults to 500.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Orders identifier lookups by the identifier column.
    ///
    /// Without an order the API may return rows in a different order on each page, so a
    /// lookup spanning several pages can miss rows. Off by default.
    pub fn order_id_pages(mut self, enabled: bool) -> Self {
        self.order_id_pages = enabled;
        self
    }

    /// Sets the request timeout for the HTTPS transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout for the HTTPS transport.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client for the HTTPS transport.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl AcrisClientBuilder<Set<TransportSource>> {
    /// Builds the [`AcrisClient`].
    ///
    /// Fails if the page or batch size is zero, or the HTTP client cannot be built.
    pub fn build(self) -> Result<AcrisClient, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }

        let transport: Arc<dyn Transport> = match self.transport.0 {
            TransportSource::Custom(transport) => transport,
            TransportSource::Http(provider) => {
                let http_client = match self.http_client {
                    Some(client) => client,
                    None => {
                        let mut builder = Client::builder();
                        if let Some(timeout) = self.connect_timeout {
                            builder = builder.connect_timeout(timeout);
                        }
                        builder
                            .build()
                            .map_err(|e| ConfigError::HttpClient(e.to_string()))?
                    }
                };
                Arc::new(HttpTransport::new(http_client, provider).with_timeout(self.timeout))
            }
        };

        Ok(AcrisClient {
            inner: Arc::new(AcrisClientInner {
                registry: self.registry.unwrap_or_default(),
                transport,
                page_size: self.page_size,
                batch_size: self.batch_size,
                order_id_pages: self.order_id_pages,
            }),
        })
    }
}
