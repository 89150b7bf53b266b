use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::auth::CreateUserRequest, error::AppResult, middleware::auth::AuthUser, models::User,
    response::ApiResponse, services::auth_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/users", post(create_user))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Create back-office account", body = ApiResponse<User>),
        (status = 400, description = "Invalid email or password"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Email already registered"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_user(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = auth_service::create_user(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
