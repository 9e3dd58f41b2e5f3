//! Admin panel route handlers.
//!
//! Every handler takes the [`RequireAdmin`] extractor; an anonymous visitor
//! is redirected to the login page before the body runs. Outcomes of write
//! actions travel as short query-string slugs (`?notice=created`,
//! `?error=save-failed`) that the templates turn into banner text, so a
//! failed save lands back on the form instead of an error page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use gung_corner_core::{NewProduct, Price, ProductId, ProductPatch};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::shop::ProductView;
use crate::state::AppState;

/// Banner query parameters for admin pages.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Turn a notice slug into banner text.
fn notice_text(slug: &str) -> &'static str {
    match slug {
        "created" => "Product created.",
        "updated" => "Product updated.",
        "deleted" => "Product deleted.",
        _ => "Done.",
    }
}

/// Turn an error slug into banner text.
fn error_text(slug: &str) -> &'static str {
    match slug {
        "invalid-price" => "Price must be a whole number of đồng.",
        "missing-name" => "Product name is required.",
        "save-failed" => "Could not save the product. Please try again.",
        "delete-failed" => "Could not delete the product. Please try again.",
        "not-found" => "That product no longer exists.",
        _ => "Something went wrong. Please try again.",
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Admin product table template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct AdminIndexTemplate {
    pub products: Vec<ProductView>,
    pub notice: Option<&'static str>,
    pub error: Option<&'static str>,
}

/// Product create/edit form template.
///
/// `product` is `None` for the create form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/form.html")]
pub struct AdminFormTemplate {
    pub product: Option<ProductView>,
    pub error: Option<&'static str>,
}

// =============================================================================
// Multipart Form Parsing
// =============================================================================

/// Fields collected from the product create/edit form.
#[derive(Default)]
struct ProductFormData {
    name: Option<String>,
    description: Option<String>,
    ingredients: Option<String>,
    price: Option<String>,
    category: Option<String>,
    best_seller: bool,
    image: Option<(String, Vec<u8>)>,
}

/// Drain a multipart form into [`ProductFormData`].
///
/// Text fields are trimmed; empty values come back as `None` so the update
/// path can tell "left blank" from "set to empty". Unknown fields are
/// ignored.
async fn read_product_form(mut multipart: Multipart) -> Result<ProductFormData> {
    let mut form = ProductFormData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?
    {
        let Some(name) = field.name().map(String::from) else {
            continue;
        };

        if name == "image" {
            let filename = field.file_name().map(String::from);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("malformed upload: {e}")))?;
            // A file input submitted empty still arrives as a field
            if let Some(filename) = filename {
                if !filename.is_empty() && !bytes.is_empty() {
                    form.image = Some((filename, bytes.to_vec()));
                }
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?;
        let value = value.trim().to_string();
        let value = (!value.is_empty()).then_some(value);

        match name.as_str() {
            "name" => form.name = value,
            "description" => form.description = value,
            "ingredients" => form.ingredients = value,
            "price" => form.price = value,
            "category" => form.category = value,
            "best_seller" => form.best_seller = true,
            _ => {}
        }
    }

    Ok(form)
}

/// Parse a submitted price as whole đồng.
fn parse_price(raw: &str) -> Option<Price> {
    raw.parse::<u64>().ok().map(Price::new)
}

// =============================================================================
// Handlers
// =============================================================================

/// Admin product table.
#[instrument(skip(_admin, state))]
pub async fn index(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let products = state
        .catalog()
        .products()
        .await
        .iter()
        .map(ProductView::from)
        .collect();

    AdminIndexTemplate {
        products,
        notice: query.notice.as_deref().map(notice_text),
        error: query.error.as_deref().map(error_text),
    }
}

/// Blank product form.
#[instrument(skip(_admin))]
pub async fn new_form(_admin: RequireAdmin, Query(query): Query<MessageQuery>) -> impl IntoResponse {
    AdminFormTemplate {
        product: None,
        error: query.error.as_deref().map(error_text),
    }
}

/// Create a product from the submitted form.
#[instrument(skip(_admin, state, multipart))]
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_product_form(multipart).await?;

    let Some(name) = form.name else {
        return Ok(Redirect::to("/admin/products/new?error=missing-name").into_response());
    };
    let Some(price) = form.price.as_deref().and_then(parse_price) else {
        return Ok(Redirect::to("/admin/products/new?error=invalid-price").into_response());
    };

    let mut images = Vec::new();
    if let Some((filename, bytes)) = form.image {
        match state.catalog().upload_image(&filename, bytes).await {
            Ok(url) => images.push(url),
            Err(err) => {
                tracing::error!(error = %err, "Image upload failed");
                return Ok(Redirect::to("/admin/products/new?error=save-failed").into_response());
            }
        }
    }

    let product = NewProduct {
        name,
        description: form.description,
        ingredients: form.ingredients,
        price,
        images,
        category: form.category.unwrap_or_else(|| "yogurt".to_string()),
        best_seller: Some(form.best_seller),
    };

    match state.catalog().create(&product).await {
        Ok(id) => {
            tracing::info!(product_id = %id, "Product created");
            Ok(Redirect::to("/admin?notice=created").into_response())
        }
        Err(err) => {
            tracing::error!(error = %err, "Product create failed");
            Ok(Redirect::to("/admin/products/new?error=save-failed").into_response())
        }
    }
}

/// Pre-filled product form.
#[instrument(skip(_admin, state))]
pub async fn edit_form(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    let product_id = ProductId::new(id);
    let product = state
        .catalog()
        .product(&product_id)
        .await
        .ok_or_else(|| AppError::NotFound(product_id.to_string()))?;

    Ok(AdminFormTemplate {
        product: Some(ProductView::from(&product)),
        error: query.error.as_deref().map(error_text),
    }
    .into_response())
}

/// Apply the submitted form as a partial update.
///
/// Fields left blank keep their stored values; an unchecked best-seller box
/// clears the flag (the form always submits the checkbox state).
#[instrument(skip(_admin, state, multipart))]
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response> {
    let product_id = ProductId::new(id);
    let form = read_product_form(multipart).await?;

    let edit_url = format!("/admin/products/{product_id}/edit");

    let price = match form.price.as_deref() {
        Some(raw) => match parse_price(raw) {
            Some(price) => Some(price),
            None => {
                return Ok(Redirect::to(&format!("{edit_url}?error=invalid-price")).into_response());
            }
        },
        None => None,
    };

    let mut images = None;
    if let Some((filename, bytes)) = form.image {
        match state.catalog().upload_image(&filename, bytes).await {
            Ok(url) => images = Some(vec![url]),
            Err(err) => {
                tracing::error!(error = %err, "Image upload failed");
                return Ok(Redirect::to(&format!("{edit_url}?error=save-failed")).into_response());
            }
        }
    }

    let patch = ProductPatch {
        name: form.name,
        description: form.description,
        ingredients: form.ingredients,
        price,
        images,
        category: form.category,
        best_seller: Some(form.best_seller),
    };

    match state.catalog().update(&product_id, &patch).await {
        Ok(()) => Ok(Redirect::to("/admin?notice=updated").into_response()),
        Err(err) => {
            tracing::error!(product_id = %product_id, error = %err, "Product update failed");
            Ok(Redirect::to(&format!("{edit_url}?error=save-failed")).into_response())
        }
    }
}

/// Delete a product.
#[instrument(skip(_admin, state))]
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let product_id = ProductId::new(id);

    match state.catalog().delete(&product_id).await {
        Ok(()) => {
            tracing::info!(product_id = %product_id, "Product deleted");
            Ok(Redirect::to("/admin?notice=deleted").into_response())
        }
        Err(err) => {
            tracing::error!(product_id = %product_id, error = %err, "Product delete failed");
            Ok(Redirect::to("/admin?error=delete-failed").into_response())
        }
    }
}
