use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::commandes::{CommandeActionRequest, CommandeList, UpdateCommandeRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Commande,
    response::{Affected, ApiResponse},
    routes::params::CommandeListQuery,
    services::commande_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/commandes", get(list_commandes))
        .route("/commandes/actions", post(apply_action))
        .route(
            "/commandes/{id}",
            get(get_commande)
                .patch(update_commande)
                .delete(delete_commande),
        )
}

#[utoipa::path(
    get,
    path = "/api/admin/commandes",
    params(CommandeListQuery),
    responses(
        (status = 200, description = "List commandes, newest first", body = ApiResponse<CommandeList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_commandes(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CommandeListQuery>,
) -> AppResult<Json<ApiResponse<CommandeList>>> {
    let resp = commande_service::list_commandes(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/commandes/{id}",
    params(("id" = Uuid, Path, description = "Commande ID")),
    responses(
        (status = 200, description = "Get commande", body = ApiResponse<Commande>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_commande(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Commande>>> {
    let resp = commande_service::get_commande_admin(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/commandes/{id}",
    params(("id" = Uuid, Path, description = "Commande ID")),
    request_body = UpdateCommandeRequest,
    responses(
        (status = 200, description = "Updated commande", body = ApiResponse<Commande>),
        (status = 400, description = "Invalid customer fields"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_commande(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCommandeRequest>,
) -> AppResult<Json<ApiResponse<Commande>>> {
    let resp = commande_service::update_commande(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/commandes/{id}",
    params(("id" = Uuid, Path, description = "Commande ID")),
    responses(
        (status = 200, description = "Deleted commande"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_commande(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = commande_service::delete_commande(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/commandes/actions",
    request_body = CommandeActionRequest,
    responses(
        (status = 200, description = "Bulk action applied", body = ApiResponse<Affected>),
        (status = 400, description = "No commande selected"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn apply_action(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CommandeActionRequest>,
) -> AppResult<Json<ApiResponse<Affected>>> {
    let resp = commande_service::apply_action(&state, &user, payload).await?;
    Ok(Json(resp))
}
