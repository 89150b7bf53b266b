use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Commande;

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyOrders {
    pub month: DateTime<Utc>,
    pub total: i64,
    pub delivered_count: i64,
    pub pending_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentAction {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub resource: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub products_count: i64,
    pub low_stock_count: i64,
    pub orders_pending: i64,
    pub orders_delivered: i64,
    pub last_commandes: Vec<Commande>,
    pub monthly_orders: Vec<MonthlyOrders>,
    pub recent_actions: Vec<RecentAction>,
}
