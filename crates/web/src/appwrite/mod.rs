//! Remote document store / object storage adapter.
//!
//! Talks to the hosted backend's REST API with `reqwest`: product documents
//! live in a single collection, image binaries in a fixed bucket. Product
//! reads are cached with `moka` (5-minute TTL) and every write invalidates
//! the whole cache - the catalog is small enough that finer-grained
//! invalidation buys nothing.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use gung_corner_core::{NewProduct, Product, ProductId, ProductPatch};

use crate::config::AppwriteConfig;
use crate::services::catalog::{DirectoryError, ProductDirectory};

use types::{
    ApiErrorBody, DocumentList, ProductDocument, StoredFile, create_payload, query_best_sellers,
    query_order_newest, update_payload,
};

/// Preview rendering parameters for uploaded images.
///
/// The storage service resizes on the fly; 800x800 at quality 100 matches
/// what the product pages display.
const PREVIEW_WIDTH: u32 = 800;
const PREVIEW_HEIGHT: u32 = 800;
const PREVIEW_QUALITY: u32 = 100;

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

#[derive(Clone)]
enum CacheValue {
    Products(Vec<Product>),
    Product(Box<Product>),
}

/// Directory adapter backed by the hosted document store.
#[derive(Clone)]
pub struct AppwriteDirectory {
    inner: Arc<AppwriteDirectoryInner>,
}

struct AppwriteDirectoryInner {
    client: reqwest::Client,
    config: AppwriteConfig,
    cache: Cache<String, CacheValue>,
}

impl AppwriteDirectory {
    /// Create a new adapter from configuration.
    #[must_use]
    pub fn new(config: AppwriteConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppwriteDirectoryInner {
                client: reqwest::Client::new(),
                config,
                cache,
            }),
        }
    }

    fn documents_url(&self) -> String {
        let config = &self.inner.config;
        format!(
            "{}/databases/{}/collections/{}/documents",
            config.endpoint, config.database_id, config.collection_id
        )
    }

    fn document_url(&self, id: &ProductId) -> String {
        format!("{}/{id}", self.documents_url())
    }

    fn files_url(&self) -> String {
        let config = &self.inner.config;
        format!("{}/storage/buckets/{}/files", config.endpoint, config.bucket_id)
    }

    /// Publicly resolvable, resized preview URL for an uploaded file.
    fn preview_url(&self, file_id: &str) -> String {
        let config = &self.inner.config;
        format!(
            "{}/storage/buckets/{}/files/{file_id}/preview?width={PREVIEW_WIDTH}&height={PREVIEW_HEIGHT}&quality={PREVIEW_QUALITY}&project={}",
            config.endpoint, config.bucket_id, config.project_id
        )
    }

    /// Attach the project and API key headers every call needs.
    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let config = &self.inner.config;
        self.inner
            .client
            .request(method, url)
            .header("X-Appwrite-Project", &config.project_id)
            .header("X-Appwrite-Key", config.api_key.expose_secret())
    }

    /// Send a request and decode the JSON response body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, DirectoryError> {
        let response = request.send().await?;
        let status = response.status();

        // Body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse document store response"
            );
            DirectoryError::Parse(e.to_string())
        })
    }

    /// Send a request whose success response carries no body.
    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), DirectoryError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            return Err(error_from_response(status, &body));
        }
        Ok(())
    }

    async fn list_documents(&self, query: String) -> Result<Vec<Product>, DirectoryError> {
        let request = self
            .request(reqwest::Method::GET, self.documents_url())
            .query(&[("queries[]", query)]);

        let page: DocumentList = self.execute(request).await?;
        page.documents
            .into_iter()
            .map(ProductDocument::into_product)
            .collect()
    }
}

/// Map a non-success response to a directory error.
fn error_from_response(status: reqwest::StatusCode, body: &str) -> DirectoryError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());

    tracing::warn!(status = %status, message = %message, "Document store returned error");

    if status == reqwest::StatusCode::NOT_FOUND {
        DirectoryError::NotFound(message)
    } else {
        DirectoryError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ProductDirectory for AppwriteDirectory {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, DirectoryError> {
        let cache_key = "products".to_string();

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let products = self.list_documents(query_order_newest()).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn list_best_sellers(&self) -> Result<Vec<Product>, DirectoryError> {
        let cache_key = "best_sellers".to_string();

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for best sellers");
            return Ok(products);
        }

        let products = self.list_documents(query_best_sellers()).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get(&self, id: &ProductId) -> Result<Product, DirectoryError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let request = self.request(reqwest::Method::GET, self.document_url(id));
        let document: ProductDocument = self.execute(request).await?;
        let product = document.into_product()?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn create(&self, product: &NewProduct) -> Result<ProductId, DirectoryError> {
        let request = self
            .request(reqwest::Method::POST, self.documents_url())
            .json(&create_payload(product));

        let document: ProductDocument = self.execute(request).await?;

        self.inner.cache.invalidate_all();
        Ok(ProductId::new(document.id))
    }

    #[instrument(skip(self, patch), fields(product_id = %id))]
    async fn update(&self, id: &ProductId, patch: &ProductPatch) -> Result<(), DirectoryError> {
        let request = self
            .request(reqwest::Method::PATCH, self.document_url(id))
            .json(&update_payload(patch));

        let _: ProductDocument = self.execute(request).await?;

        self.inner.cache.invalidate_all();
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete(&self, id: &ProductId) -> Result<(), DirectoryError> {
        let request = self.request(reqwest::Method::DELETE, self.document_url(id));
        self.execute_empty(request).await?;

        self.inner.cache.invalidate_all();
        Ok(())
    }

    #[instrument(skip(self, bytes), fields(filename = %filename, size = bytes.len()))]
    async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DirectoryError> {
        let form = Form::new()
            // "unique()" asks the storage service to assign the file ID
            .text("fileId", "unique()")
            .part("file", Part::bytes(bytes).file_name(filename.to_string()));

        let request = self
            .request(reqwest::Method::POST, self.files_url())
            .multipart(form);

        let file: StoredFile = self.execute(request).await?;
        Ok(self.preview_url(&file.id))
    }
}
