//! Web configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (with the default `appwrite` backend)
//! - `APPWRITE_ENDPOINT` - Document store endpoint (e.g. <https://sgp.cloud.appwrite.io/v1>)
//! - `APPWRITE_PROJECT_ID` - Project identifier
//! - `APPWRITE_API_KEY` - Server API key (validated for entropy/placeholders)
//! - `APPWRITE_DATABASE_ID` - Database holding the product collection
//! - `APPWRITE_COLLECTION_ID` - Product document collection
//! - `APPWRITE_BUCKET_ID` - Object storage bucket for product images
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` - Admin login credentials
//!
//! ## Optional
//! - `GUNG_HOST` - Bind address (default: 127.0.0.1)
//! - `GUNG_PORT` - Listen port (default: 3000)
//! - `GUNG_BACKEND` - `appwrite` or `memory` (default: appwrite)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Which product directory backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Hosted document store + object storage (production).
    Appwrite,
    /// In-process directory, lost on restart (local development, tests).
    Memory,
}

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Product directory backend
    pub backend: Backend,
    /// Remote store configuration (required for the appwrite backend)
    pub appwrite: Option<AppwriteConfig>,
    /// Admin login credentials
    pub admin: AdminCredentials,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Remote document store / object storage configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AppwriteConfig {
    /// API endpoint, e.g. `https://sgp.cloud.appwrite.io/v1`
    pub endpoint: String,
    /// Project identifier
    pub project_id: String,
    /// Server API key (server-side only)
    pub api_key: SecretString,
    /// Database holding the product collection
    pub database_id: String,
    /// Product document collection
    pub collection_id: String,
    /// Object storage bucket for product images
    pub bucket_id: String,
}

impl std::fmt::Debug for AppwriteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &"[REDACTED]")
            .field("database_id", &self.database_id)
            .field("collection_id", &self.collection_id)
            .field("bucket_id", &self.bucket_id)
            .finish()
    }
}

/// Admin login credentials for the local auth gate.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the API key fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("GUNG_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("GUNG_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("GUNG_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("GUNG_PORT".to_string(), e.to_string()))?;

        let backend = match get_env_or_default("GUNG_BACKEND", "appwrite").as_str() {
            "appwrite" => Backend::Appwrite,
            "memory" => Backend::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "GUNG_BACKEND".to_string(),
                    format!("expected 'appwrite' or 'memory', got '{other}'"),
                ));
            }
        };

        let appwrite = match backend {
            Backend::Appwrite => Some(AppwriteConfig::from_env()?),
            Backend::Memory => None,
        };

        let admin = AdminCredentials {
            username: get_required_env("ADMIN_USERNAME")?,
            password: get_required_secret("ADMIN_PASSWORD")?,
        };

        Ok(Self {
            host,
            port,
            backend,
            appwrite,
            admin,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AppwriteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint = get_required_env("APPWRITE_ENDPOINT")?;
        // Fail fast on malformed endpoints rather than on the first request
        Url::parse(&endpoint).map_err(|e| {
            ConfigError::InvalidEnvVar("APPWRITE_ENDPOINT".to_string(), e.to_string())
        })?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: get_required_env("APPWRITE_PROJECT_ID")?,
            api_key: get_validated_secret("APPWRITE_API_KEY")?,
            database_id: get_required_env("APPWRITE_DATABASE_ID")?,
            collection_id: get_required_env("APPWRITE_COLLECTION_ID")?,
            bucket_id: get_required_env("APPWRITE_BUCKET_ID")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the real server API key."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
