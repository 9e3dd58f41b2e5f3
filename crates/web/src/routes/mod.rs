//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured best sellers)
//! GET  /health                 - Health check
//! GET  /shop                   - Product listing (newest first)
//! GET  /shop/{id}              - Product detail
//! GET  /about                  - About page
//!
//! # Cart (HTMX fragments; cart state lives in the session)
//! GET  /cart                   - Open the cart drawer
//! POST /cart/add               - Add a line (opens the drawer)
//! POST /cart/update            - Set line quantity (0 removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! POST /cart/close             - Close the drawer
//! GET  /cart/count             - Cart count badge (fragment)
//! GET  /cart/checkout          - Checkout form fragment
//! POST /cart/checkout          - Confirm order (logged only, clears cart)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//!
//! # Admin (requires admin session)
//! GET  /admin                          - Product table
//! GET  /admin/products/new             - Create form
//! POST /admin/products                 - Create (multipart)
//! GET  /admin/products/{id}/edit       - Edit form
//! POST /admin/products/{id}            - Partial update (multipart)
//! POST /admin/products/{id}/delete     - Delete
//!
//! # API
//! GET  /api/seed               - Seed the sample catalog (JSON)
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod home;
pub mod pages;
pub mod seed;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/close", post(cart::close))
        .route("/count", get(cart::count))
        .route("/checkout", get(cart::checkout_form).post(cart::checkout))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::index))
        .route("/products/new", get(admin::new_form))
        .route("/products", post(admin::create))
        .route("/products/{id}/edit", get(admin::edit_form))
        .route("/products/{id}", post(admin::update))
        .route("/products/{id}/delete", post(admin::delete))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/shop", get(shop::index))
        .route("/shop/{id}", get(shop::show))
        .route("/about", get(pages::about))
        .nest("/cart", cart_routes())
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .nest("/admin", admin_routes())
        .route("/api/seed", get(seed::seed))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Build the full application: routes, session layer, and state.
///
/// The binary adds static file serving and the Sentry layers on top; tests
/// drive this router directly.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(middleware::create_session_layer())
        .with_state(state)
}
