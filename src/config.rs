//! Client configuration loaded from environment variables or built in code.
//!
//! Recognised environment variables:
//! - `AAIO_API_KEY` — API key sent in the `X-Api-Key` header
//! - `AAIO_SHOP_ID` — merchant (shop) identifier
//! - `AAIO_SECRET_KEY` — secret key #1, used only to sign payment links
//! - `AAIO_BASE_URL` — overrides the default `https://aaio.io` host
//! - `AAIO_CA_FILE` — PEM bundle of extra trusted root certificates
//!
//! Every credential is optional at load time. Each operation checks for
//! the credentials it needs and fails with
//! [`AaioError::Config`](crate::AaioError::Config) before touching the network.

use std::fmt;
use std::path::PathBuf;

use url::Url;
use zeroize::Zeroizing;

use crate::AaioError;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://aaio.io";

/// Credentials and connection settings for an [`AaioClient`](crate::AaioClient).
#[derive(Clone)]
pub struct AaioConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub shop_id: Option<String>,
    pub secret_key: Option<Zeroizing<String>>,
    pub ca_file: Option<PathBuf>,
}

impl AaioConfig {
    /// Creates a configuration carrying only an API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Sets the shop identifier.
    #[must_use]
    pub fn with_shop_id(mut self, shop_id: impl Into<String>) -> Self {
        self.shop_id = Some(shop_id.into());
        self
    }

    /// Sets the secret key used for payment-link signatures.
    #[must_use]
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(Zeroizing::new(secret_key.into()));
        self
    }

    /// Overrides the API host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Adds a PEM bundle of extra trusted root certificates.
    #[must_use]
    pub fn with_ca_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_file = Some(path.into());
        self
    }

    /// Returns the API key or a configuration error naming it.
    pub(crate) fn require_api_key(&self) -> crate::Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AaioError::Config("API key is not set".to_string()))
    }

    /// Returns the shop identifier or a configuration error naming it.
    pub(crate) fn require_shop_id(&self) -> crate::Result<&str> {
        self.shop_id
            .as_deref()
            .ok_or_else(|| AaioError::Config("shop ID is not set".to_string()))
    }

    /// Returns the secret key or a configuration error naming it.
    pub(crate) fn require_secret_key(&self) -> crate::Result<&str> {
        self.secret_key
            .as_deref()
            .map(String::as_str)
            .ok_or_else(|| AaioError::Config("secret key is not set".to_string()))
    }
}

impl Default for AaioConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            shop_id: None,
            secret_key: None,
            ca_file: None,
        }
    }
}

// Credentials stay out of logs.
impl fmt::Debug for AaioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AaioConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("shop_id", &self.shop_id)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("ca_file", &self.ca_file)
            .finish()
    }
}

/// Loads the client configuration from environment variables.
///
/// The base URL defaults to `https://aaio.io` and can be overridden with
/// `AAIO_BASE_URL`. Empty values are treated as absent.
///
/// # Errors
///
/// Returns [`AaioError::Config`](crate::AaioError::Config) if
/// `AAIO_BASE_URL` is set but is not an absolute http(s) URL.
pub fn fetch_config() -> crate::Result<AaioConfig> {
    let base_url = non_empty_var("AAIO_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let parsed = Url::parse(&base_url)
        .map_err(|e| AaioError::Config(format!("AAIO_BASE_URL {base_url} is not a URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AaioError::Config(format!(
            "AAIO_BASE_URL must be an http(s) URL, got {base_url}"
        )));
    }

    Ok(AaioConfig {
        base_url,
        api_key: non_empty_var("AAIO_API_KEY"),
        shop_id: non_empty_var("AAIO_SHOP_ID"),
        secret_key: non_empty_var("AAIO_SECRET_KEY").map(Zeroizing::new),
        ca_file: non_empty_var("AAIO_CA_FILE").map(PathBuf::from),
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
