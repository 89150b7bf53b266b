use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};
use uuid::Uuid;

use crate::{
    dto::content::{
        CreateHomePageRequest, CreateHomeSlideRequest, SlideRequest, UpdateHomePageRequest,
        UpdateHomeSlideRequest, UpdateSlideRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{HomePage, HomeSlide, Slide},
    response::ApiResponse,
    services::content_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/home-page",
            post(create_home_page)
                .put(update_home_page)
                .delete(delete_home_page),
        )
        .route("/home-slides", post(create_home_slide))
        .route(
            "/home-slides/{id}",
            put(update_home_slide).delete(delete_home_slide),
        )
        .route("/slides", post(create_slide))
        .route("/slides/{id}", put(update_slide).delete(delete_slide))
}

#[utoipa::path(
    post,
    path = "/api/admin/home-page",
    request_body = CreateHomePageRequest,
    responses(
        (status = 201, description = "Create the site content", body = ApiResponse<HomePage>),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "A home page already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_home_page(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateHomePageRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<HomePage>>)> {
    let resp = content_service::create_home_page(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/home-page",
    request_body = UpdateHomePageRequest,
    responses(
        (status = 200, description = "Updated site content", body = ApiResponse<HomePage>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No home page configured"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_home_page(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateHomePageRequest>,
) -> AppResult<Json<ApiResponse<HomePage>>> {
    Ok(Json(
        content_service::update_home_page(&state, &user, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/home-page",
    responses(
        (status = 200, description = "Deleted site content"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No home page configured"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_home_page(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(content_service::delete_home_page(&state, &user).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/home-slides",
    request_body = CreateHomeSlideRequest,
    responses(
        (status = 201, description = "Create home slide", body = ApiResponse<HomeSlide>),
        (status = 400, description = "Invalid slide"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_home_slide(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateHomeSlideRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<HomeSlide>>)> {
    let resp = content_service::create_home_slide(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/home-slides/{id}",
    params(("id" = Uuid, Path, description = "Home slide ID")),
    request_body = UpdateHomeSlideRequest,
    responses(
        (status = 200, description = "Updated home slide", body = ApiResponse<HomeSlide>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_home_slide(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHomeSlideRequest>,
) -> AppResult<Json<ApiResponse<HomeSlide>>> {
    Ok(Json(
        content_service::update_home_slide(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/home-slides/{id}",
    params(("id" = Uuid, Path, description = "Home slide ID")),
    responses(
        (status = 200, description = "Deleted home slide"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_home_slide(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        content_service::delete_home_slide(&state, &user, id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/slides",
    request_body = SlideRequest,
    responses(
        (status = 201, description = "Create carousel slide", body = ApiResponse<Slide>),
        (status = 400, description = "Invalid slide"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_slide(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SlideRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Slide>>)> {
    let resp = content_service::create_slide(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/slides/{id}",
    params(("id" = Uuid, Path, description = "Slide ID")),
    request_body = UpdateSlideRequest,
    responses(
        (status = 200, description = "Updated slide", body = ApiResponse<Slide>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_slide(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSlideRequest>,
) -> AppResult<Json<ApiResponse<Slide>>> {
    Ok(Json(
        content_service::update_slide(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/slides/{id}",
    params(("id" = Uuid, Path, description = "Slide ID")),
    responses(
        (status = 200, description = "Deleted slide"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_slide(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(content_service::delete_slide(&state, &user, id).await?))
}
