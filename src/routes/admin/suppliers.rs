use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::suppliers::{
        CreateSupplierDetailRequest, CreateSupplierRequest, SupplierDetailList, SupplierList,
        UpdateSupplierDetailRequest, UpdateSupplierRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Supplier, SupplierDetail},
    response::ApiResponse,
    routes::params::SearchQuery,
    services::supplier_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/suppliers", get(list_suppliers).post(create_supplier))
        .route(
            "/suppliers/{id}",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
        .route(
            "/supplier-details",
            get(list_supplier_details).post(create_supplier_detail),
        )
        .route(
            "/supplier-details/{id}",
            get(get_supplier_detail)
                .put(update_supplier_detail)
                .delete(delete_supplier_detail),
        )
}

#[utoipa::path(
    get,
    path = "/api/admin/suppliers",
    params(SearchQuery),
    responses(
        (status = 200, description = "List suppliers", body = ApiResponse<SupplierList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SupplierList>>> {
    Ok(Json(supplier_service::list_suppliers(&state, &user, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/suppliers/{id}",
    params(("id" = Uuid, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier with details", body = ApiResponse<Supplier>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    Ok(Json(supplier_service::get_supplier(&state, &user, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/suppliers",
    request_body = CreateSupplierRequest,
    responses(
        (status = 201, description = "Create supplier", body = ApiResponse<Supplier>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSupplierRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Supplier>>)> {
    let resp = supplier_service::create_supplier(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/suppliers/{id}",
    params(("id" = Uuid, Path, description = "Supplier ID")),
    request_body = UpdateSupplierRequest,
    responses(
        (status = 200, description = "Updated supplier", body = ApiResponse<Supplier>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierRequest>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    Ok(Json(supplier_service::update_supplier(&state, &user, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/suppliers/{id}",
    params(("id" = Uuid, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Deleted supplier"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(supplier_service::delete_supplier(&state, &user, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/supplier-details",
    params(SearchQuery),
    responses(
        (status = 200, description = "List supplier details; q searches country", body = ApiResponse<SupplierDetailList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_supplier_details(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SupplierDetailList>>> {
    Ok(Json(
        supplier_service::list_supplier_details(&state, &user, query).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/supplier-details/{id}",
    params(("id" = Uuid, Path, description = "Supplier detail ID")),
    responses(
        (status = 200, description = "Supplier detail", body = ApiResponse<SupplierDetail>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_supplier_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SupplierDetail>>> {
    Ok(Json(
        supplier_service::get_supplier_detail(&state, &user, id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/supplier-details",
    request_body = CreateSupplierDetailRequest,
    responses(
        (status = 201, description = "Create supplier detail", body = ApiResponse<SupplierDetail>),
        (status = 409, description = "Supplier already has details"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_supplier_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSupplierDetailRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SupplierDetail>>)> {
    let resp = supplier_service::create_supplier_detail(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/supplier-details/{id}",
    params(("id" = Uuid, Path, description = "Supplier detail ID")),
    request_body = UpdateSupplierDetailRequest,
    responses(
        (status = 200, description = "Updated supplier detail", body = ApiResponse<SupplierDetail>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Supplier already has details"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_supplier_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierDetailRequest>,
) -> AppResult<Json<ApiResponse<SupplierDetail>>> {
    Ok(Json(
        supplier_service::update_supplier_detail(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/supplier-details/{id}",
    params(("id" = Uuid, Path, description = "Supplier detail ID")),
    responses(
        (status = 200, description = "Deleted supplier detail"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_supplier_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        supplier_service::delete_supplier_detail(&state, &user, id).await?,
    ))
}
