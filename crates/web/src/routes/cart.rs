//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The whole cart (lines plus drawer flag) is serialized into the session;
//! every mutation is a synchronous local reducer call followed by a save, so
//! nothing here touches the remote store except the product lookup on add.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use gung_corner_core::{Cart, CartLine, Order, ProductId};

use crate::error::Result;
use crate::models::session_keys;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
    pub open: bool,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product.id.to_string(),
            name: line.product.name.clone(),
            quantity: line.quantity,
            price: line.product.price.display(),
            line_price: line.subtotal().display(),
            image: line.product.primary_image().map(String::from),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
            open: cart.is_open(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session; a fresh session gets an empty cart.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the cart back into the session.
async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> std::result::Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub phone_number: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart drawer fragment template (renders nothing when closed).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_drawer.html")]
pub struct CartDrawerTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout form fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub error: Option<String>,
}

/// Order confirmation fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/order_confirmed.html")]
pub struct OrderConfirmedTemplate;

/// Render the drawer with an HX-Trigger so the badge refreshes.
fn drawer_response(cart: &Cart) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartDrawerTemplate {
            cart: CartView::from(cart),
        },
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Open the cart drawer.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.open_drawer();
    save_cart(&session, &cart).await?;

    Ok(CartDrawerTemplate {
        cart: CartView::from(&cart),
    }
    .into_response())
}

/// Add an item to the cart (HTMX). Opens the drawer.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await;

    // Product lookup races against admin deletes; a vanished product is
    // simply not added
    let product_id = ProductId::new(form.product_id);
    match state.catalog().product(&product_id).await {
        Some(product) => cart.add(product, form.quantity.unwrap_or(1)),
        None => tracing::warn!(product_id = %product_id, "Add to cart for unknown product"),
    }

    cart.open_drawer();
    save_cart(&session, &cart).await?;

    Ok(drawer_response(&cart))
}

/// Set a cart line's quantity (HTMX). Zero removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.set_quantity(&ProductId::new(form.product_id), form.quantity);
    save_cart(&session, &cart).await?;

    Ok(drawer_response(&cart))
}

/// Remove an item from the cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.remove(&ProductId::new(form.product_id));
    save_cart(&session, &cart).await?;

    Ok(drawer_response(&cart))
}

/// Empty the cart (HTMX).
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(drawer_response(&cart))
}

/// Close the cart drawer (explicit close button or overlay click).
#[instrument(skip(session))]
pub async fn close(session: Session) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.close_drawer();
    save_cart(&session, &cart).await?;

    Ok(CartDrawerTemplate {
        cart: CartView::from(&cart),
    }
    .into_response())
}

/// Get the cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartCountTemplate {
        count: cart.item_count(),
    }
}

/// Show the checkout form fragment.
#[instrument(skip(session))]
pub async fn checkout_form(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CheckoutTemplate {
        cart: CartView::from(&cart),
        error: None,
    }
}

/// Confirm the order.
///
/// There is no order backend: the confirmed order is logged with its full
/// line items and total, then the cart is cleared and the drawer closed.
#[instrument(skip(session, form))]
pub async fn checkout(session: Session, Form(form): Form<CheckoutForm>) -> Result<Response> {
    let mut cart = load_cart(&session).await;

    let customer_name = form.customer_name.trim();
    let phone_number = form.phone_number.trim();

    if cart.is_empty() {
        return Ok(CheckoutTemplate {
            cart: CartView::from(&cart),
            error: Some("Your cart is empty.".to_string()),
        }
        .into_response());
    }
    if customer_name.is_empty() || phone_number.is_empty() {
        return Ok(CheckoutTemplate {
            cart: CartView::from(&cart),
            error: Some("Please enter your name and phone number.".to_string()),
        }
        .into_response());
    }

    let order = Order::from_cart(&cart, customer_name.to_string(), phone_number.to_string());
    tracing::info!(
        customer = %order.customer_name,
        phone = %order.phone_number,
        items = order.lines.len(),
        total = order.total.amount(),
        "Order confirmed"
    );

    cart.clear();
    cart.close_drawer();
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        OrderConfirmedTemplate,
    )
        .into_response())
}
