//! Verify configuration and backend connectivity.

use tracing::info;

use gung_corner_web::config::AppConfig;
use gung_corner_web::state::AppState;

/// Load the configuration, build the backend, and run one list call
/// against it.
///
/// # Errors
///
/// Returns an error if configuration is missing or invalid, or if the
/// store rejects the list call.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    info!(backend = ?config.backend, "Configuration loaded");

    let state = AppState::new(config)?;
    let products = state.catalog().directory().list().await?;

    info!(count = products.len(), "Store reachable");
    Ok(())
}
