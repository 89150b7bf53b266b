use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{db::DbPool, dto::dashboard::RecentAction, error::AppResult, middleware::auth::AuthUser};

pub async fn log_audit(
    pool: &DbPool,
    user_id: Option<Uuid>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(action)
    .bind(resource)
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(())
}

/// Records an admin action. A failed write is logged and otherwise ignored.
pub async fn record(pool: &DbPool, user: Option<&AuthUser>, action: &str, resource: &str, metadata: Value) {
    if let Err(err) = log_audit(
        pool,
        user.map(|u| u.user_id),
        action,
        Some(resource),
        Some(metadata),
    )
    .await
    {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}

#[derive(FromRow)]
struct AuditRow {
    id: Uuid,
    user_id: Option<Uuid>,
    action: String,
    resource: Option<String>,
    metadata: Option<Value>,
    created_at: DateTime<Utc>,
}

pub async fn recent_actions(pool: &DbPool, limit: i64) -> AppResult<Vec<RecentAction>> {
    let rows = sqlx::query_as::<_, AuditRow>(
        r#"
        SELECT id, user_id, action, resource, metadata, created_at
        FROM audit_logs
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| RecentAction {
            id: row.id,
            user_id: row.user_id,
            action: row.action,
            resource: row.resource,
            metadata: row.metadata,
            created_at: row.created_at,
        })
        .collect())
}
