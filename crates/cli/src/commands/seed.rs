//! Seed the configured store with the sample catalog.

use tracing::info;

use gung_corner_web::config::AppConfig;
use gung_corner_web::services::seed::seed_catalog;
use gung_corner_web::state::AppState;

/// Seed the sample catalog.
///
/// Skips stores that already contain products, so re-running is safe.
///
/// # Errors
///
/// Returns an error if configuration is missing or the store rejects the
/// existence check or an insert.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let state = AppState::new(config)?;

    let report = seed_catalog(state.catalog().directory().as_ref()).await?;
    info!("{}", report.message());

    Ok(())
}
