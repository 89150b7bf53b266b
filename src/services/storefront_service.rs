use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    dto::storefront::{HomeView, ProductDetail},
    entity::{
        product_categories::{Column as LinkCol, Entity as ProductCategories},
        products::{Column, Entity as Products},
    },
    error::AppResult,
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    services::{content_service, product_service},
    state::AppState,
    validation,
};

const SIMILAR_PRODUCTS: u64 = 4;

/// Landing page: site content, slides and the in-stock catalogue, optionally
/// narrowed by a search over name and description.
pub async fn home(state: &AppState, query: SearchQuery) -> AppResult<ApiResponse<HomeView>> {
    let (page, limit, offset) = query.pagination().normalize();
    let search = query.search().map(str::to_string);

    let mut condition = Condition::all().add(Column::Quantity.gt(0));
    if let Some(search) = search.as_deref() {
        let pattern = validation::contains(search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    let finder = Products::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let models = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;
    let products = product_service::hydrate(&state.orm, models).await?;

    let home_data = content_service::current_home_page(&state.orm).await?;
    let slides = content_service::all_home_slides(&state.orm).await?;

    Ok(ApiResponse::success(
        "Home",
        HomeView {
            home_data,
            slides,
            products,
            query: search,
        },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Similar products share at least one category with the viewed product;
/// an uncategorised product falls back to any other in-stock product.
pub async fn product_detail(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ProductDetail>> {
    let product = product_service::find_product(&state.orm, id).await?;

    let mut condition = Condition::all()
        .add(Column::Id.ne(product.id))
        .add(Column::Quantity.gt(0));

    let category_ids: Vec<Uuid> = product.categories.iter().map(|c| c.id).collect();
    if !category_ids.is_empty() {
        condition = condition.add(Column::Id.in_subquery(
            Query::select()
                .column(LinkCol::ProductId)
                .from(ProductCategories)
                .and_where(LinkCol::CategoryId.is_in(category_ids))
                .to_owned(),
        ));
    }

    let models = Products::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .limit(SIMILAR_PRODUCTS)
        .all(&state.orm)
        .await?;
    let similar_products = product_service::hydrate(&state.orm, models).await?;

    Ok(ApiResponse::success(
        "Product",
        ProductDetail {
            product,
            similar_products,
        },
        None,
    ))
}
