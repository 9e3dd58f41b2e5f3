//! Shop route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use gung_corner_core::{Product, ProductId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub price: String,
    pub price_amount: u64,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub category: String,
    pub best_seller: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            ingredients: product.ingredients.clone(),
            price: product.price.display(),
            price_amount: product.price.amount(),
            image: product.primary_image().map(String::from),
            images: product.images.clone(),
            category: product.category.clone(),
            best_seller: product.best_seller,
        }
    }
}

/// Category filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ShopQuery {
    pub category: Option<String>,
}

/// Shop listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopIndexTemplate {
    pub products: Vec<ProductView>,
    pub categories: Vec<String>,
    pub active_category: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/show.html")]
pub struct ShopShowTemplate {
    pub product: ProductView,
    pub related: Vec<ProductView>,
}

/// Display the shop listing, newest first, optionally filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ShopQuery>,
) -> impl IntoResponse {
    let products = state.catalog().products().await;

    let mut categories: Vec<String> = Vec::new();
    for product in &products {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }

    let views: Vec<ProductView> = products
        .iter()
        .filter(|p| {
            query
                .category
                .as_ref()
                .is_none_or(|category| &p.category == category)
        })
        .map(ProductView::from)
        .collect();

    ShopIndexTemplate {
        products: views,
        categories,
        active_category: query.category,
    }
}

/// Display a single product page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse> {
    let product_id = ProductId::new(id);
    let product = state
        .catalog()
        .product(&product_id)
        .await
        .ok_or_else(|| AppError::NotFound(product_id.to_string()))?;

    // Same-category picks for the "you may also like" strip
    let related: Vec<ProductView> = state
        .catalog()
        .products()
        .await
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(3)
        .map(ProductView::from)
        .collect();

    Ok(ShopShowTemplate {
        product: ProductView::from(&product),
        related,
    })
}
