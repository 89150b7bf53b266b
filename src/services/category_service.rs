use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    audit,
    dto::categories::{CategoryList, CategoryRequest},
    entity::categories::{ActiveModel, Entity as Categories},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Category,
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    state::AppState,
    validation,
};

#[derive(FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    products_count: i64,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            products_count: row.products_count,
            created_at: row.created_at,
        }
    }
}

pub async fn list_categories(
    state: &AppState,
    query: SearchQuery,
) -> AppResult<ApiResponse<CategoryList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let pattern = query.search().map(validation::contains_pattern);

    let rows = sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT c.id, c.name, c.created_at, COUNT(pc.product_id) AS products_count
        FROM categories c
        LEFT JOIN product_categories pc ON pc.category_id = c.id
        WHERE ($1::text IS NULL OR c.name ILIKE $1 ESCAPE '\')
        GROUP BY c.id
        ORDER BY c.name
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(pattern.as_deref())
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM categories WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\\')",
    )
    .bind(pattern.as_deref())
    .fetch_one(&state.pool)
    .await?;

    let items = rows.into_iter().map(Category::from).collect();
    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub async fn get_category(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Category>> {
    let category = fetch_category(state, id).await?;
    Ok(ApiResponse::success("Category", category, None))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let name = validation::required("name", payload.name, 100)?;

    let category = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user),
        "category_create",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category created",
        Category {
            id: category.id,
            name: category.name,
            products_count: 0,
            created_at: category.created_at.with_timezone(&Utc),
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let name = validation::required("name", payload.name, 100)?;

    let existing = Categories::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(name);
    active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user),
        "category_update",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    let category = fetch_category(state, id).await?;
    Ok(ApiResponse::success("Updated", category, Some(Meta::empty())))
}

pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Categories::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user),
        "category_delete",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn fetch_category(state: &AppState, id: Uuid) -> AppResult<Category> {
    let row = sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT c.id, c.name, c.created_at, COUNT(pc.product_id) AS products_count
        FROM categories c
        LEFT JOIN product_categories pc ON pc.category_id = c.id
        WHERE c.id = $1
        GROUP BY c.id
        "#,
    )
    .bind(id)
    .fetch_optional(&state.pool)
    .await?;

    row.map(Category::from).ok_or(AppError::NotFound)
}
