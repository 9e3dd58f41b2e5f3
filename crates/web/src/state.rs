//! Application state shared across handlers.

use std::sync::Arc;

use crate::appwrite::AppwriteDirectory;
use crate::config::{AppConfig, Backend, ConfigError};
use crate::services::auth::AuthGate;
use crate::services::catalog::{Catalog, MemoryDirectory, ProductDirectory};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; constructed once at startup and torn down
/// with the process - no ambient singletons.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    catalog: Catalog,
    auth: AuthGate,
}

impl AppState {
    /// Create the application state, selecting the directory adapter from
    /// the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the appwrite backend is selected but its
    /// configuration is missing.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let directory: Arc<dyn ProductDirectory> = match config.backend {
            Backend::Appwrite => {
                let appwrite = config.appwrite.clone().ok_or_else(|| {
                    ConfigError::MissingEnvVar("APPWRITE_ENDPOINT".to_string())
                })?;
                Arc::new(AppwriteDirectory::new(appwrite))
            }
            Backend::Memory => Arc::new(MemoryDirectory::new()),
        };

        Ok(Self::with_directory(config, directory))
    }

    /// Create the application state over an explicit directory adapter.
    ///
    /// Tests use this to inject a pre-populated in-memory directory.
    #[must_use]
    pub fn with_directory(config: AppConfig, directory: Arc<dyn ProductDirectory>) -> Self {
        let auth = AuthGate::new(config.admin.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::new(directory),
                auth,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the auth gate.
    #[must_use]
    pub fn auth(&self) -> &AuthGate {
        &self.inner.auth
    }
}
