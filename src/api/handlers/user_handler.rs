//! Profile handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::put,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ProfileUpdate, UserResponse};
use crate::errors::AppResult;

/// Profile change; empty optional fields are left untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// Required to authorize the change
    #[serde(alias = "password_actual")]
    pub current_password: Option<String>,
    #[schema(example = "Alice B.")]
    pub name: Option<String>,
    #[schema(example = "alice@x.com")]
    pub email: Option<String>,
    pub new_password: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            current_password: req.current_password,
            name: req.name,
            email: req.email,
            new_password: req.new_password,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileUpdatedResponse {
    #[schema(example = "Profile updated successfully")]
    pub message: String,
    pub user: UserResponse,
}

/// Profile routes; mounted behind the auth middleware
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/update", put(update_profile))
        .route("/auth/update", put(update_profile))
}

/// Update the caller's name, email or password
#[utoipa::path(
    put,
    path = "/api/user/update",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileUpdatedResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing token or incorrect current password"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<ProfileUpdatedResponse>> {
    let user = state
        .auth_service
        .update_profile(current_user.id, payload.into())
        .await?;

    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated successfully".to_string(),
        user,
    }))
}
