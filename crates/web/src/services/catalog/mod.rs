//! Product directory: the capability the storefront reads products through.
//!
//! [`ProductDirectory`] is the polymorphic seam over the backing service.
//! There is one adapter per backend: [`crate::appwrite::AppwriteDirectory`]
//! for the hosted document store and [`MemoryDirectory`] as an in-process
//! double for tests and local development.
//!
//! [`Catalog`] wraps a directory and applies the storefront's asymmetric
//! failure policy: reads degrade to empty results (listing pages show "no
//! products" instead of crashing), writes propagate so the admin UI can
//! surface the error for the operator to retry.

mod memory;

pub use memory::MemoryDirectory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use gung_corner_core::{NewProduct, Product, ProductId, ProductPatch};

/// Errors from the product directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered with an error body.
    #[error("service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Document not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Response did not match the expected document shape.
    #[error("malformed response: {0}")]
    Parse(String),
}

/// CRUD capability over the product collection and its image storage.
///
/// All products are returned ordered by creation time, descending.
#[async_trait]
pub trait ProductDirectory: Send + Sync {
    /// All products, newest first.
    async fn list(&self) -> Result<Vec<Product>, DirectoryError>;

    /// Products flagged best-seller.
    async fn list_best_sellers(&self) -> Result<Vec<Product>, DirectoryError>;

    /// A single product by ID.
    ///
    /// Returns [`DirectoryError::NotFound`] when the document does not exist.
    async fn get(&self, id: &ProductId) -> Result<Product, DirectoryError>;

    /// Persist a new product and return its assigned ID.
    ///
    /// Absent description/ingredients become empty strings and an absent
    /// best-seller flag becomes `false`.
    async fn create(&self, product: &NewProduct) -> Result<ProductId, DirectoryError>;

    /// Apply a partial update; unspecified fields are left untouched.
    async fn update(&self, id: &ProductId, patch: &ProductPatch) -> Result<(), DirectoryError>;

    /// Remove a product.
    async fn delete(&self, id: &ProductId) -> Result<(), DirectoryError>;

    /// Persist an image binary and return a publicly resolvable URL.
    async fn upload_image(&self, filename: &str, bytes: Vec<u8>)
    -> Result<String, DirectoryError>;
}

/// Number of featured products on the home page.
const FEATURED_COUNT: usize = 3;

/// Read/write facade over a [`ProductDirectory`] with the storefront failure
/// policy baked in.
#[derive(Clone)]
pub struct Catalog {
    directory: Arc<dyn ProductDirectory>,
}

impl Catalog {
    /// Wrap a directory adapter.
    #[must_use]
    pub fn new(directory: Arc<dyn ProductDirectory>) -> Self {
        Self { directory }
    }

    /// The underlying directory (seeding goes straight to it).
    #[must_use]
    pub fn directory(&self) -> &Arc<dyn ProductDirectory> {
        &self.directory
    }

    // =========================================================================
    // Reads: failures degrade to empty results, logged only
    // =========================================================================

    /// All products, newest first. Empty on any failure.
    pub async fn products(&self) -> Vec<Product> {
        match self.directory.list().await {
            Ok(products) => products,
            Err(e) => {
                warn!("Failed to list products: {e}");
                Vec::new()
            }
        }
    }

    /// Best-seller products. Empty on any failure.
    pub async fn best_sellers(&self) -> Vec<Product> {
        match self.directory.list_best_sellers().await {
            Ok(products) => products,
            Err(e) => {
                warn!("Failed to list best sellers: {e}");
                Vec::new()
            }
        }
    }

    /// A single product, or `None` when absent or on failure.
    pub async fn product(&self, id: &ProductId) -> Option<Product> {
        match self.directory.get(id).await {
            Ok(product) => Some(product),
            Err(DirectoryError::NotFound(_)) => None,
            Err(e) => {
                warn!(product_id = %id, "Failed to fetch product: {e}");
                None
            }
        }
    }

    /// Home-page featured products: best sellers, falling back to the newest
    /// products when none are flagged. At most three.
    pub async fn featured(&self) -> Vec<Product> {
        let mut products = self.best_sellers().await;
        if products.is_empty() {
            products = self.products().await;
        }
        products.truncate(FEATURED_COUNT);
        products
    }

    // =========================================================================
    // Writes: failures propagate to the initiating UI action
    // =========================================================================

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Propagates any [`DirectoryError`] so the admin form can surface it.
    pub async fn create(&self, product: &NewProduct) -> Result<ProductId, DirectoryError> {
        self.directory.create(product).await
    }

    /// Partially update a product.
    ///
    /// # Errors
    ///
    /// Propagates any [`DirectoryError`] so the admin form can surface it.
    pub async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<(), DirectoryError> {
        self.directory.update(id, patch).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Propagates any [`DirectoryError`] so the admin list can surface it.
    pub async fn delete(&self, id: &ProductId) -> Result<(), DirectoryError> {
        self.directory.delete(id).await
    }

    /// Upload a product image, returning its public URL.
    ///
    /// # Errors
    ///
    /// Propagates any [`DirectoryError`] so the admin form can surface it.
    pub async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DirectoryError> {
        self.directory.upload_image(filename, bytes).await
    }
}
