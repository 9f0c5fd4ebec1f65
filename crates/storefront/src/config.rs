//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults match a local development setup with
//! the SwiftMart backend on port 8000.
//!
//! - `SWIFTMART_HOST` - Bind address (default: 127.0.0.1)
//! - `SWIFTMART_PORT` - Listen port (default: 3000)
//! - `SWIFTMART_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `SWIFTMART_API_URL` - SwiftMart backend base URL (default: <http://127.0.0.1:8000>)
//! - `SWIFTMART_CART_CACHE_CAPACITY` - Max carts kept in memory (default: 10000)
//! - `SWIFTMART_SESSION_CAPACITY` - Max browser sessions kept in memory (default: 100000)
//! - `SWIFTMART_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `SWIFTMART_IMAGE_BASE_URL` - Prefix for bare product image names
//!   (default: /static/images/)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_IMAGE_BASE_URL: &str = "/static/images/";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// SwiftMart backend configuration
    pub backend: BackendConfig,
    /// Maximum number of browser sessions kept in memory
    pub session_capacity: u64,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Prefix for bare product image names, always ending in `/`
    pub image_base_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

/// SwiftMart backend API configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, always ending in `/` so endpoint paths join onto it.
    pub base_url: Url,
    /// Maximum number of per-user carts kept in memory.
    pub cart_cache_capacity: u64,
}

impl BackendConfig {
    /// Build a backend config from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or is
    /// not http(s).
    pub fn from_url(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_backend_url("SWIFTMART_API_URL", raw)?,
            cart_cache_capacity: 10_000,
        })
    }

    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::from_url(&get_env_or_default("SWIFTMART_API_URL", DEFAULT_API_URL))?;
        config.cart_cache_capacity = parse_env("SWIFTMART_CART_CACHE_CAPACITY", "10000")?;
        Ok(config)
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("SWIFTMART_HOST", "127.0.0.1")?;
        let port = parse_env("SWIFTMART_PORT", "3000")?;
        let base_url = get_env_or_default("SWIFTMART_BASE_URL", "http://localhost:3000");
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SWIFTMART_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            host,
            port,
            base_url,
            backend: BackendConfig::from_env()?,
            session_capacity: parse_env("SWIFTMART_SESSION_CAPACITY", "100000")?,
            static_dir: PathBuf::from(get_env_or_default(
                "SWIFTMART_STATIC_DIR",
                "crates/storefront/static",
            )),
            image_base_url: parse_image_base_url(&get_env_or_default(
                "SWIFTMART_IMAGE_BASE_URL",
                DEFAULT_IMAGE_BASE_URL,
            ))?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_sample_rate("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_sample_rate("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Configuration for tests and embedding: defaults everywhere except the
    /// backend URL.
    #[must_use]
    pub fn for_backend(backend: BackendConfig) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            backend,
            session_capacity: 10_000,
            static_dir: PathBuf::from("crates/storefront/static"),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Origins product images may be loaded from besides the storefront
    /// itself: the backend, and the image host when it is absolute.
    #[must_use]
    pub fn image_origins(&self) -> Vec<String> {
        let mut origins = vec![self.backend.base_url.origin().ascii_serialization()];
        if let Ok(url) = Url::parse(&self.image_base_url) {
            let origin = url.origin().ascii_serialization();
            if !origins.contains(&origin) {
                origins.push(origin);
            }
        }
        origins
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a Sentry sample rate, which must lie in `0.0..=1.0`.
fn parse_sample_rate(key: &str, default: &str) -> Result<f32, ConfigError> {
    let rate: f32 = parse_env(key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Accept a rooted path or an http(s) URL, and make sure it ends with a slash.
fn parse_image_base_url(raw: &str) -> Result<String, ConfigError> {
    let key = "SWIFTMART_IMAGE_BASE_URL";
    let raw = raw.trim();
    if !raw.starts_with('/') {
        let url = Url::parse(raw)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
    }

    if raw.ends_with('/') {
        Ok(raw.to_string())
    } else {
        Ok(format!("{raw}/"))
    }
}

/// Parse the backend base URL and make sure it ends with a slash.
fn parse_backend_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_url_default_host() {
        let config = BackendConfig::from_url(DEFAULT_API_URL).unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(
            config.base_url.join("cart/1").unwrap().as_str(),
            "http://127.0.0.1:8000/cart/1"
        );
    }

    #[test]
    fn test_backend_url_keeps_path_prefix() {
        let config = BackendConfig::from_url("https://shop.example.com/api").unwrap();
        assert_eq!(
            config.base_url.join("products").unwrap().as_str(),
            "https://shop.example.com/api/products"
        );
    }

    #[test]
    fn test_backend_url_rejects_other_schemes() {
        let err = BackendConfig::from_url("ftp://127.0.0.1/").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_backend_url_rejects_garbage() {
        assert!(BackendConfig::from_url("not a url").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let mut config =
            StorefrontConfig::for_backend(BackendConfig::from_url(DEFAULT_API_URL).unwrap());
        config.port = 3000;

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure() {
        let mut config =
            StorefrontConfig::for_backend(BackendConfig::from_url(DEFAULT_API_URL).unwrap());
        assert!(!config.is_secure());
        config.base_url = "https://swiftmart.in".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_image_base_url() {
        assert_eq!(parse_image_base_url("/static/images").unwrap(), "/static/images/");
        assert_eq!(
            parse_image_base_url("http://127.0.0.1:8000/images/").unwrap(),
            "http://127.0.0.1:8000/images/"
        );
        assert!(parse_image_base_url("images").is_err());
        assert!(parse_image_base_url("ftp://host/images").is_err());
    }

    #[test]
    fn test_image_origins_include_backend() {
        let mut config =
            StorefrontConfig::for_backend(BackendConfig::from_url(DEFAULT_API_URL).unwrap());
        assert_eq!(config.image_origins(), vec!["http://127.0.0.1:8000"]);

        config.image_base_url = "https://cdn.swiftmart.in/products/".to_string();
        assert_eq!(
            config.image_origins(),
            vec!["http://127.0.0.1:8000", "https://cdn.swiftmart.in"]
        );
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        // Key is never set in the test environment, so the default is parsed.
        assert!(parse_sample_rate("SWIFTMART_TEST_UNSET_RATE", "1.5").is_err());
        assert!(
            (parse_sample_rate("SWIFTMART_TEST_UNSET_RATE", "0.25").unwrap() - 0.25).abs()
                < f32::EPSILON
        );
    }

    #[test]
    fn test_parse_env_invalid_port() {
        let err = parse_env::<u16>("SWIFTMART_TEST_UNSET_PORT", "99999").unwrap_err();
        assert!(err.to_string().contains("SWIFTMART_TEST_UNSET_PORT"));
    }
}
