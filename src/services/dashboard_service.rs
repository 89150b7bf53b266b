use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use sqlx::FromRow;

use crate::{
    audit,
    dto::dashboard::{Dashboard, MonthlyOrders},
    entity::{
        commandes::{Column as CommandeCol, Entity as Commandes},
        products::{Column as ProdCol, Entity as Products},
    },
    error::AppResult,
    middleware::auth::{AuthUser, ensure_staff},
    models::LOW_STOCK_THRESHOLD,
    response::{ApiResponse, Meta},
    services::commande_service::commande_from_entity,
    state::AppState,
};

const LAST_COMMANDES: u64 = 5;
const RECENT_ACTIONS: i64 = 10;

#[derive(FromRow)]
struct MonthlyRow {
    month: DateTime<Utc>,
    total: i64,
    delivered_count: i64,
    pending_count: i64,
}

pub async fn dashboard(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Dashboard>> {
    ensure_staff(user)?;

    let products_count = Products::find().count(&state.orm).await? as i64;
    let low_stock_count = Products::find()
        .filter(ProdCol::Quantity.lte(LOW_STOCK_THRESHOLD))
        .count(&state.orm)
        .await? as i64;
    let orders_pending = Commandes::find()
        .filter(CommandeCol::IsDelivered.eq(false))
        .count(&state.orm)
        .await? as i64;
    let orders_delivered = Commandes::find()
        .filter(CommandeCol::IsDelivered.eq(true))
        .count(&state.orm)
        .await? as i64;

    let last_commandes = Commandes::find()
        .find_also_related(Products)
        .order_by_desc(CommandeCol::CreatedAt)
        .limit(LAST_COMMANDES)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(commande, product)| commande_from_entity(commande, product))
        .collect::<AppResult<Vec<_>>>()?;

    let monthly_orders = monthly_orders(state).await?;
    let recent_actions = audit::recent_actions(&state.pool, RECENT_ACTIONS).await?;

    Ok(ApiResponse::success(
        "Dashboard",
        Dashboard {
            products_count,
            low_stock_count,
            orders_pending,
            orders_delivered,
            last_commandes,
            monthly_orders,
            recent_actions,
        },
        Some(Meta::empty()),
    ))
}

async fn monthly_orders(state: &AppState) -> AppResult<Vec<MonthlyOrders>> {
    let rows = sqlx::query_as::<_, MonthlyRow>(
        r#"
        SELECT date_trunc('month', created_at) AS month,
               COUNT(*) AS total,
               COUNT(*) FILTER (WHERE is_delivered) AS delivered_count,
               COUNT(*) FILTER (WHERE NOT is_delivered) AS pending_count
        FROM commandes
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| MonthlyOrders {
            month: row.month,
            total: row.total,
            delivered_count: row.delivered_count,
            pending_count: row.pending_count,
        })
        .collect())
}
