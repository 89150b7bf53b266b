use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::commandes::{CommandeConfirmation, PlaceCommandeRequest},
    error::AppResult,
    response::ApiResponse,
    services::commande_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products/{id}/commandes", post(place_commande))
        .route("/commandes/{id}", get(get_confirmation))
        .route("/commandes/{id}/pdf", get(download_receipt))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/commandes",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = PlaceCommandeRequest,
    responses(
        (status = 201, description = "Commande placed", body = ApiResponse<CommandeConfirmation>),
        (status = 400, description = "Invalid form or insufficient stock"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Commandes"
)]
pub async fn place_commande(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<PlaceCommandeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CommandeConfirmation>>)> {
    let resp = commande_service::place_commande(&state, product_id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/commandes/{id}",
    params(("id" = Uuid, Path, description = "Commande ID")),
    responses(
        (status = 200, description = "Commande confirmation", body = ApiResponse<CommandeConfirmation>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Commandes"
)]
pub async fn get_confirmation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CommandeConfirmation>>> {
    let resp = commande_service::get_confirmation(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/commandes/{id}/pdf",
    params(("id" = Uuid, Path, description = "Commande ID")),
    responses(
        (status = 200, description = "PDF receipt (application/pdf attachment)"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Commandes"
)]
pub async fn download_receipt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let (filename, bytes) = commande_service::receipt_pdf(&state, id).await?;
    let disposition = format!("attachment; filename=\"{filename}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
