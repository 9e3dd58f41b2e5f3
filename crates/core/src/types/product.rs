//! Product model and create/update field sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A dessert product as stored in the remote document store.
///
/// Owned by the product directory; the presentation layer never mutates a
/// `Product` in place - all changes go through explicit create/update/delete
/// calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque identifier assigned by the document store.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Free-text ingredient list shown on the detail page.
    pub ingredients: String,
    pub price: Price,
    /// Ordered list of publicly resolvable image URLs.
    pub images: Vec<String>,
    pub category: String,
    /// Manually set flag controlling featured placement on the home page.
    pub best_seller: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// First image URL, if the product has any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Fields for creating a new product.
///
/// Optional fields absent at creation are substituted: empty strings for
/// description/ingredients, `false` for the best-seller flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    pub price: Price,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub best_seller: Option<bool>,
}

impl NewProduct {
    /// Description with the empty-string default applied.
    #[must_use]
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Ingredients with the empty-string default applied.
    #[must_use]
    pub fn ingredients_or_default(&self) -> &str {
        self.ingredients.as_deref().unwrap_or("")
    }

    /// Best-seller flag with the `false` default applied.
    #[must_use]
    pub fn best_seller_or_default(&self) -> bool {
        self.best_seller.unwrap_or(false)
    }
}

/// A partial update: only the provided fields are applied, everything else is
/// left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_seller: Option<bool>,
}

impl ProductPatch {
    /// Returns true when the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.ingredients.is_none()
            && self.price.is_none()
            && self.images.is_none()
            && self.category.is_none()
            && self.best_seller.is_none()
    }

    /// Apply the patch to a product, returning the updated copy.
    ///
    /// Mirrors what the document store does server-side; used by the
    /// in-memory directory.
    #[must_use]
    pub fn apply(&self, mut product: Product) -> Product {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(ingredients) = &self.ingredients {
            product.ingredients.clone_from(ingredients);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(images) = &self.images {
            product.images.clone_from(images);
        }
        if let Some(category) = &self.category {
            product.category.clone_from(category);
        }
        if let Some(best_seller) = self.best_seller {
            product.best_seller = best_seller;
        }
        product
    }
}
