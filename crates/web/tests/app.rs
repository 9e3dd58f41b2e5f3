//! End-to-end tests driving the full router in-process against the
//! in-memory product directory.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use gung_corner_core::{NewProduct, Price, ProductId};
use gung_corner_web::config::{AdminCredentials, AppConfig, Backend};
use gung_corner_web::routes;
use gung_corner_web::services::catalog::{MemoryDirectory, ProductDirectory};
use gung_corner_web::state::AppState;

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        backend: Backend::Memory,
        appwrite: None,
        admin: AdminCredentials {
            username: "admin".to_string(),
            password: SecretString::from("root"),
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Build the app plus a handle onto its directory for direct setup.
fn test_app() -> (Router, Arc<MemoryDirectory>) {
    let directory = Arc::new(MemoryDirectory::new());
    let state = AppState::with_directory(test_config(), directory.clone());
    (routes::app(state), directory)
}

async fn insert_product(directory: &MemoryDirectory, name: &str, price: u64) -> ProductId {
    directory
        .create(&NewProduct {
            name: name.to_string(),
            description: None,
            ingredients: None,
            price: Price::new(price),
            images: vec![],
            category: "yogurt".to_string(),
            best_seller: Some(false),
        })
        .await
        .expect("insert failed")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request")
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

/// Build a `multipart/form-data` request from text field pairs.
fn post_multipart(uri: &str, fields: &[(&str, &str)], cookie: &str) -> Request<Body> {
    const BOUNDARY: &str = "----gung-corner-test-boundary";

    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::COOKIE, cookie)
        .body(Body::from(body))
        .expect("request")
}

/// Pull the session cookie pair out of a response.
fn session_cookie(response: &Response) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("no session cookie set")
        .to_str()
        .expect("cookie not utf-8");
    raw.split(';').next().expect("empty cookie").to_string()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    String::from_utf8(bytes.to_vec()).expect("body not utf-8")
}

// ============================================================================
// Basic pages
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, _) = test_app();

    let response = app.oneshot(get("/health")).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_home_renders_with_empty_catalog() {
    let (app, _) = test_app();

    let response = app.oneshot(get("/")).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Gung Corner"));
}

#[tokio::test]
async fn test_shop_lists_products() {
    let (app, directory) = test_app();
    insert_product(&directory, "Sữa chua truyền thống", 8000).await;

    let response = app.oneshot(get("/shop")).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Sữa chua truyền thống"));
    assert!(body.contains("8.000đ"));
}

#[tokio::test]
async fn test_product_detail_unknown_id_is_404() {
    let (app, _) = test_app();

    let response = app
        .oneshot(get("/shop/no-such-product"))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Cart flows
// ============================================================================

#[tokio::test]
async fn test_add_to_cart_opens_drawer_and_updates_count() {
    let (app, directory) = test_app();
    let id = insert_product(&directory, "Tàu hũ Singapore nguyên vị", 8000).await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/cart/add",
            &format!("product_id={id}&quantity=2"),
            None,
        ))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );

    let cookie = session_cookie(&response);
    let body = body_string(response).await;
    assert!(body.contains("Tàu hũ Singapore nguyên vị"));
    assert!(body.contains("16.000đ"));

    let response = app
        .oneshot(get_with_cookie("/cart/count", &cookie))
        .await
        .expect("request failed");
    let body = body_string(response).await;
    assert!(body.contains(">2<"));
}

#[tokio::test]
async fn test_adding_same_product_twice_merges_lines() {
    let (app, directory) = test_app();
    let id = insert_product(&directory, "Sữa chua Phomai", 10000).await;

    let response = app
        .clone()
        .oneshot(post_form("/cart/add", &format!("product_id={id}"), None))
        .await
        .expect("request failed");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(post_form(
            "/cart/add",
            &format!("product_id={id}&quantity=2"),
            Some(&cookie),
        ))
        .await
        .expect("request failed");
    let body = body_string(response).await;

    // One merged line at quantity 3, not two lines
    assert_eq!(body.matches("cart-line-info").count(), 1);
    assert!(body.contains("30.000đ"));
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let (app, directory) = test_app();
    let id = insert_product(&directory, "Sữa chua Matcha Phomai", 15000).await;

    let response = app
        .clone()
        .oneshot(post_form("/cart/add", &format!("product_id={id}"), None))
        .await
        .expect("request failed");
    let cookie = session_cookie(&response);

    let response = app
        .oneshot(post_form(
            "/cart/update",
            &format!("product_id={id}&quantity=0"),
            Some(&cookie),
        ))
        .await
        .expect("request failed");
    let body = body_string(response).await;
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_add_unknown_product_leaves_cart_empty() {
    let (app, _) = test_app();

    let response = app
        .oneshot(post_form("/cart/add", "product_id=ghost", None))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_checkout_clears_cart() {
    let (app, directory) = test_app();
    let id = insert_product(&directory, "Hộp trái cây mix 750ml", 35000).await;

    let response = app
        .clone()
        .oneshot(post_form("/cart/add", &format!("product_id={id}"), None))
        .await
        .expect("request failed");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(post_form(
            "/cart/checkout",
            "customer_name=Minh&phone_number=0901234567",
            Some(&cookie),
        ))
        .await
        .expect("request failed");
    let body = body_string(response).await;
    assert!(body.contains("Order received"));

    let response = app
        .oneshot(get_with_cookie("/cart/count", &cookie))
        .await
        .expect("request failed");
    let body = body_string(response).await;
    assert!(body.contains(">0<"));
}

#[tokio::test]
async fn test_checkout_requires_name_and_phone() {
    let (app, directory) = test_app();
    let id = insert_product(&directory, "Tàu hũ Singapore lá dứa", 10000).await;

    let response = app
        .clone()
        .oneshot(post_form("/cart/add", &format!("product_id={id}"), None))
        .await
        .expect("request failed");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(post_form(
            "/cart/checkout",
            "customer_name=%20&phone_number=",
            Some(&cookie),
        ))
        .await
        .expect("request failed");
    let body = body_string(response).await;
    assert!(body.contains("Please enter your name and phone number."));

    // Cart must be untouched after the rejected submit
    let response = app
        .oneshot(get_with_cookie("/cart/count", &cookie))
        .await
        .expect("request failed");
    let body = body_string(response).await;
    assert!(body.contains(">1<"));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_is_rejected() {
    let (app, _) = test_app();

    let response = app
        .oneshot(post_form(
            "/cart/checkout",
            "customer_name=Minh&phone_number=0901234567",
            None,
        ))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Your cart is empty."));
    assert!(!body.contains("Please enter your name and phone number."));
}

// ============================================================================
// Seeding
// ============================================================================

#[tokio::test]
async fn test_seed_fills_empty_store() {
    let (app, directory) = test_app();

    let response = app.oneshot(get("/api/seed")).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value =
        serde_json::from_str(&body_string(response).await).expect("invalid seed JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 6);
    assert_eq!(directory.len(), 6);
}

#[tokio::test]
async fn test_seed_skips_populated_store() {
    let (app, directory) = test_app();
    insert_product(&directory, "Sữa chua truyền thống", 8000).await;

    let response = app.oneshot(get("/api/seed")).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value =
        serde_json::from_str(&body_string(response).await).expect("invalid seed JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);
    assert!(
        body["message"]
            .as_str()
            .expect("message missing")
            .contains("Skipping")
    );
    assert_eq!(directory.len(), 1);
}

// ============================================================================
// Admin gate
// ============================================================================

#[tokio::test]
async fn test_admin_redirects_anonymous_to_login() {
    let (app, _) = test_app();

    let response = app.oneshot(get("/admin")).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/login")
    );
}

#[tokio::test]
async fn test_login_with_wrong_password_bounces_back() {
    let (app, _) = test_app();

    let response = app
        .oneshot(post_form("/login", "username=admin&password=wrong", None))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/login?error=invalid")
    );
}

#[tokio::test]
async fn test_login_then_admin_page() {
    let (app, directory) = test_app();
    insert_product(&directory, "Sữa chua truyền thống", 8000).await;

    let response = app
        .clone()
        .oneshot(post_form("/login", "username=admin&password=root", None))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/admin")
    );
    let cookie = session_cookie(&response);

    let response = app
        .oneshot(get_with_cookie("/admin", &cookie))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Sữa chua truyền thống"));
}

#[tokio::test]
async fn test_logout_drops_admin_access() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(post_form("/login", "username=admin&password=root", None))
        .await
        .expect("request failed");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(post_form("/logout", "", Some(&cookie)))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(get_with_cookie("/admin", &cookie))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_admin_create_product() {
    let (app, directory) = test_app();

    let response = app
        .clone()
        .oneshot(post_form("/login", "username=admin&password=root", None))
        .await
        .expect("request failed");
    let cookie = session_cookie(&response);

    let response = app
        .oneshot(post_multipart(
            "/admin/products",
            &[
                ("name", "Sữa chua nếp cẩm"),
                ("description", ""),
                ("price", "12000"),
                ("category", ""),
            ],
            &cookie,
        ))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/admin?notice=created")
    );

    let products = directory.list().await.expect("list failed");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Sữa chua nếp cẩm");
    assert_eq!(products[0].price, Price::new(12000));
    // Blank category falls back to the default
    assert_eq!(products[0].category, "yogurt");
    assert!(!products[0].best_seller);
}

#[tokio::test]
async fn test_admin_create_rejects_invalid_price() {
    let (app, directory) = test_app();

    let response = app
        .clone()
        .oneshot(post_form("/login", "username=admin&password=root", None))
        .await
        .expect("request failed");
    let cookie = session_cookie(&response);

    let response = app
        .oneshot(post_multipart(
            "/admin/products",
            &[("name", "Sữa chua nếp cẩm"), ("price", "12.000đ")],
            &cookie,
        ))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/admin/products/new?error=invalid-price")
    );
    assert!(directory.is_empty());
}

#[tokio::test]
async fn test_admin_update_blank_fields_keep_stored_values() {
    let (app, directory) = test_app();
    let id = directory
        .create(&NewProduct {
            name: "Tàu hũ Singapore nguyên vị".to_string(),
            description: Some("Đậu hũ non mềm mịn".to_string()),
            ingredients: Some("Đậu nành, lá dứa".to_string()),
            price: Price::new(8000),
            images: vec![],
            category: "tofu".to_string(),
            best_seller: Some(false),
        })
        .await
        .expect("insert failed");

    let response = app
        .clone()
        .oneshot(post_form("/login", "username=admin&password=root", None))
        .await
        .expect("request failed");
    let cookie = session_cookie(&response);

    // Everything left blank except the best-seller checkbox
    let response = app
        .oneshot(post_multipart(
            &format!("/admin/products/{id}"),
            &[
                ("name", ""),
                ("description", "  "),
                ("ingredients", ""),
                ("price", ""),
                ("category", ""),
                ("best_seller", "on"),
            ],
            &cookie,
        ))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/admin?notice=updated")
    );

    let product = directory.get(&id).await.expect("get failed");
    assert_eq!(product.name, "Tàu hũ Singapore nguyên vị");
    assert_eq!(product.description, "Đậu hũ non mềm mịn");
    assert_eq!(product.ingredients, "Đậu nành, lá dứa");
    assert_eq!(product.price, Price::new(8000));
    assert_eq!(product.category, "tofu");
    assert!(product.best_seller);
}

#[tokio::test]
async fn test_admin_update_rejects_invalid_price() {
    let (app, directory) = test_app();
    let id = insert_product(&directory, "Sữa chua Phomai", 10000).await;

    let response = app
        .clone()
        .oneshot(post_form("/login", "username=admin&password=root", None))
        .await
        .expect("request failed");
    let cookie = session_cookie(&response);

    let response = app
        .oneshot(post_multipart(
            &format!("/admin/products/{id}"),
            &[("price", "ten thousand")],
            &cookie,
        ))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(format!("/admin/products/{id}/edit?error=invalid-price").as_str())
    );

    let product = directory.get(&id).await.expect("get failed");
    assert_eq!(product.price, Price::new(10000));
}

#[tokio::test]
async fn test_admin_delete_removes_product() {
    let (app, directory) = test_app();
    let id = insert_product(&directory, "Sữa chua Phomai", 10000).await;

    let response = app
        .clone()
        .oneshot(post_form("/login", "username=admin&password=root", None))
        .await
        .expect("request failed");
    let cookie = session_cookie(&response);

    let response = app
        .oneshot(post_form(
            &format!("/admin/products/{id}/delete"),
            "",
            Some(&cookie),
        ))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/admin?notice=deleted")
    );
    assert!(directory.is_empty());
}
