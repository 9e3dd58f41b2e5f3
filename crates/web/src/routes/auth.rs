//! Admin login and logout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::services::auth::{self, AuthError};
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login page query parameters.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Display the login page. An already-admin visitor goes straight to the
/// panel.
#[instrument(skip(session))]
pub async fn login_page(session: Session, Query(query): Query<LoginQuery>) -> Response {
    if auth::is_admin(&session).await {
        return Redirect::to("/admin").into_response();
    }

    LoginTemplate { error: query.error }.into_response()
}

/// Handle the login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state
        .auth()
        .login(&session, &form.username, &form.password)
        .await
    {
        Ok(()) => Ok(Redirect::to("/admin").into_response()),
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "Failed admin login");
            Ok(Redirect::to("/login?error=invalid").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Handle logout.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Response> {
    state.auth().logout(&session).await?;
    Ok(Redirect::to("/").into_response())
}
