//! In-memory product directory.
//!
//! Implements the same capability set as the remote adapter against a plain
//! `Vec`, so the rest of the application can be exercised without network
//! access. Used by the test suite and by `GUNG_BACKEND=memory`.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use gung_corner_core::{NewProduct, Product, ProductId, ProductPatch};

use super::{DirectoryError, ProductDirectory};

/// In-process directory double. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryDirectory {
    // Insertion order; listings reverse it for newest-first.
    products: RwLock<Vec<Product>>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products. Test helper for verifying write counts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True when no products are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Product>> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Product>> {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ProductDirectory for MemoryDirectory {
    async fn list(&self) -> Result<Vec<Product>, DirectoryError> {
        Ok(self.read().iter().rev().cloned().collect())
    }

    async fn list_best_sellers(&self) -> Result<Vec<Product>, DirectoryError> {
        Ok(self
            .read()
            .iter()
            .rev()
            .filter(|p| p.best_seller)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &ProductId) -> Result<Product, DirectoryError> {
        self.read()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }

    async fn create(&self, product: &NewProduct) -> Result<ProductId, DirectoryError> {
        let now = Utc::now();
        let id = ProductId::new(Uuid::new_v4().to_string());

        self.write().push(Product {
            id: id.clone(),
            name: product.name.clone(),
            description: product.description_or_default().to_string(),
            ingredients: product.ingredients_or_default().to_string(),
            price: product.price,
            images: product.images.clone(),
            category: product.category.clone(),
            best_seller: product.best_seller_or_default(),
            created_at: now,
            updated_at: now,
        });

        Ok(id)
    }

    async fn update(&self, id: &ProductId, patch: &ProductPatch) -> Result<(), DirectoryError> {
        let mut products = self.write();
        let Some(slot) = products.iter_mut().find(|p| &p.id == id) else {
            return Err(DirectoryError::NotFound(id.to_string()));
        };

        let mut updated = patch.apply(slot.clone());
        updated.updated_at = Utc::now();
        *slot = updated;
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DirectoryError> {
        let mut products = self.write();
        let before = products.len();
        products.retain(|p| &p.id != id);

        if products.len() == before {
            return Err(DirectoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn upload_image(
        &self,
        filename: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, DirectoryError> {
        // No real storage behind this adapter; hand back a stable fake URL
        Ok(format!("memory://images/{}/{filename}", Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use gung_corner_core::Price;

    use super::*;

    fn new_product(name: &str, best_seller: bool) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: Price::new(8000),
            category: "tofu".to_string(),
            best_seller: Some(best_seller),
            ..NewProduct::default()
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let directory = MemoryDirectory::new();
        directory.create(&new_product("first", false)).await.expect("create");
        directory.create(&new_product("second", false)).await.expect("create");

        let products = directory.list().await.expect("list");
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["second", "first"]);
    }

    #[tokio::test]
    async fn test_best_sellers_filters_flag() {
        let directory = MemoryDirectory::new();
        directory.create(&new_product("plain", false)).await.expect("create");
        directory.create(&new_product("star", true)).await.expect("create");

        let best = directory.list_best_sellers().await.expect("list");
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].name, "star");
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let directory = MemoryDirectory::new();
        let id = directory
            .create(&NewProduct {
                name: "Tàu hũ".to_string(),
                price: Price::new(8000),
                category: "tofu".to_string(),
                ..NewProduct::default()
            })
            .await
            .expect("create");

        let product = directory.get(&id).await.expect("get");
        assert_eq!(product.description, "");
        assert_eq!(product.ingredients, "");
        assert!(!product.best_seller);
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let directory = MemoryDirectory::new();
        let id = directory.create(&new_product("original", true)).await.expect("create");

        directory
            .update(
                &id,
                &ProductPatch {
                    price: Some(Price::new(12000)),
                    ..ProductPatch::default()
                },
            )
            .await
            .expect("update");

        let product = directory.get(&id).await.expect("get");
        assert_eq!(product.price, Price::new(12000));
        assert_eq!(product.name, "original");
        assert!(product.best_seller);
    }

    #[tokio::test]
    async fn test_get_and_delete_missing_are_not_found() {
        let directory = MemoryDirectory::new();
        let missing = ProductId::new("missing");

        assert!(matches!(
            directory.get(&missing).await,
            Err(DirectoryError::NotFound(_))
        ));
        assert!(matches!(
            directory.delete(&missing).await,
            Err(DirectoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let directory = MemoryDirectory::new();
        let id = directory.create(&new_product("doomed", false)).await.expect("create");
        assert_eq!(directory.len(), 1);

        directory.delete(&id).await.expect("delete");
        assert!(directory.is_empty());
    }
}
