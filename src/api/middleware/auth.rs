//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Authenticated caller, resolved from the token subject.
#[derive(Clone, Copy, Debug)]
pub struct CurrentUser {
    pub id: i32,
}

/// Validates `Authorization: Bearer <jwt>` and injects [`CurrentUser`] into
/// the request extensions. Missing, malformed or expired tokens are `401`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;
    let current_user = CurrentUser {
        id: claims.user_id()?,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
