//! Admin authentication extractor.
//!
//! The admin flag is re-derived from the session on every request - handlers
//! never cache the result of an earlier check.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::session_keys;

/// Extractor that requires an admin session.
///
/// If the visitor is not logged in, browser requests are redirected to the
/// login page and API requests get a plain 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_admin: RequireAdmin) -> impl IntoResponse {
///     "admins only"
/// }
/// ```
pub struct RequireAdmin;

/// Error returned when the admin flag is required but absent.
pub enum AdminRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminRejection::Unauthorized)?;

        let is_admin = session
            .get::<bool>(session_keys::IS_ADMIN)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);

        if is_admin {
            Ok(Self)
        } else if parts.uri.path().starts_with("/api/") {
            Err(AdminRejection::Unauthorized)
        } else {
            Err(AdminRejection::RedirectToLogin)
        }
    }
}
