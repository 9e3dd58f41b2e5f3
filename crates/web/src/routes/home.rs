//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::routes::shop::ProductView;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<ProductView>,
}

/// Display the home page with the featured best sellers.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let featured = state
        .catalog()
        .featured()
        .await
        .iter()
        .map(ProductView::from)
        .collect();

    HomeTemplate { featured }
}
