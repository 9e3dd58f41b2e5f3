//! List the products currently in the catalog.

use tracing::info;

use gung_corner_web::config::AppConfig;
use gung_corner_web::state::AppState;

/// Print the catalog, newest first.
///
/// # Errors
///
/// Returns an error if configuration is missing or the backend cannot be
/// constructed. A store failure surfaces as an empty listing, same as the
/// storefront.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let state = AppState::new(config)?;

    let products = state.catalog().products().await;
    if products.is_empty() {
        info!("Catalog is empty");
        return Ok(());
    }

    info!("{} products:", products.len());
    for product in products {
        info!(
            "  {} [{}] {} {}",
            product.id,
            product.category,
            product.name,
            product.price.display()
        );
    }

    Ok(())
}
