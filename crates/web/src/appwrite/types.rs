//! Wire types and payload builders for the document store REST API.
//!
//! Product documents are schema-flexible: optional attributes come back as
//! `null` or are missing entirely, so everything except name and price is
//! mapped with defaults. The store exposes system fields prefixed with `$`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use gung_corner_core::{NewProduct, Price, Product, ProductId, ProductPatch};

use crate::services::catalog::DirectoryError;

/// A page of documents from a collection listing.
#[derive(Debug, Deserialize)]
pub struct DocumentList {
    pub total: u64,
    pub documents: Vec<ProductDocument>,
}

/// A product document as stored remotely.
#[derive(Debug, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    pub price: u64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "isBestSeller", default)]
    pub is_best_seller: Option<bool>,
}

/// A stored file reference from object storage.
#[derive(Debug, Deserialize)]
pub struct StoredFile {
    #[serde(rename = "$id")]
    pub id: String,
}

/// Error body returned by the remote service.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

impl ProductDocument {
    /// Map the document shape to the internal product representation.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Parse`] when a system timestamp is not valid
    /// RFC 3339.
    pub fn into_product(self) -> Result<Product, DirectoryError> {
        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description.unwrap_or_default(),
            ingredients: self.ingredients.unwrap_or_default(),
            price: Price::new(self.price),
            // Single nullable image_url attribute on the wire
            images: self.image_url.into_iter().collect(),
            category: self.category.unwrap_or_default(),
            best_seller: self.is_best_seller.unwrap_or(false),
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DirectoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DirectoryError::Parse(format!("bad timestamp '{value}': {e}")))
}

/// JSON query string: all documents, newest first.
#[must_use]
pub fn query_order_newest() -> String {
    json!({"method": "orderDesc", "attribute": "$createdAt"}).to_string()
}

/// JSON query string: documents with the best-seller flag set.
#[must_use]
pub fn query_best_sellers() -> String {
    json!({"method": "equal", "attribute": "isBestSeller", "values": [true]}).to_string()
}

/// Nullable string: empty maps to JSON null, matching the document schema.
fn nullable(value: &str) -> Value {
    if value.is_empty() {
        Value::Null
    } else {
        Value::String(value.to_string())
    }
}

/// Request body for creating a product document.
///
/// `documentId: "unique()"` asks the store to assign the ID.
#[must_use]
pub fn create_payload(product: &NewProduct) -> Value {
    json!({
        "documentId": "unique()",
        "data": {
            "name": product.name,
            "description": nullable(product.description_or_default()),
            "ingredients": nullable(product.ingredients_or_default()),
            "price": product.price.amount(),
            "image_url": product.images.first().map_or(Value::Null, |u| Value::String(u.clone())),
            "category": product.category,
            "isBestSeller": product.best_seller_or_default(),
            "itemsSold": 0,
        }
    })
}

/// Request body for a partial document update: only provided fields appear.
#[must_use]
pub fn update_payload(patch: &ProductPatch) -> Value {
    let mut data = serde_json::Map::new();

    if let Some(name) = &patch.name {
        data.insert("name".to_string(), Value::String(name.clone()));
    }
    if let Some(description) = &patch.description {
        data.insert("description".to_string(), nullable(description));
    }
    if let Some(ingredients) = &patch.ingredients {
        data.insert("ingredients".to_string(), nullable(ingredients));
    }
    if let Some(price) = patch.price {
        data.insert("price".to_string(), json!(price.amount()));
    }
    if let Some(images) = &patch.images {
        data.insert(
            "image_url".to_string(),
            images.first().map_or(Value::Null, |u| Value::String(u.clone())),
        );
    }
    if let Some(category) = &patch.category {
        data.insert("category".to_string(), Value::String(category.clone()));
    }
    if let Some(best_seller) = patch.best_seller {
        data.insert("isBestSeller".to_string(), Value::Bool(best_seller));
    }

    json!({ "data": data })
}
