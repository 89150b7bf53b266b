use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{
        categories::CategoryList,
        content::{HomeSlideList, SlideList},
        storefront::{HomeView, ProductDetail},
    },
    error::AppResult,
    models::{Category, HomePage, HomeSlide, Slide},
    response::ApiResponse,
    routes::params::{Pagination, SearchQuery},
    services::{category_service, content_service, storefront_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/home", get(home))
        .route("/home-page", get(get_home_page))
        .route("/home-slides", get(list_home_slides))
        .route("/home-slides/{id}", get(get_home_slide))
        .route("/slides", get(list_slides))
        .route("/slides/{id}", get(get_slide))
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(get_category))
        .route("/products/{id}", get(product_detail))
}

#[utoipa::path(
    get,
    path = "/api/home",
    params(SearchQuery),
    responses(
        (status = 200, description = "Home page content, slides and in-stock products", body = ApiResponse<HomeView>)
    ),
    tag = "Storefront"
)]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<HomeView>>> {
    let resp = storefront_service::home(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with similar products", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Storefront"
)]
pub async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = storefront_service::product_detail(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/home-page",
    responses(
        (status = 200, description = "Site content", body = ApiResponse<HomePage>),
        (status = 404, description = "No home page configured"),
    ),
    tag = "Storefront"
)]
pub async fn get_home_page(State(state): State<AppState>) -> AppResult<Json<ApiResponse<HomePage>>> {
    Ok(Json(content_service::get_home_page(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/home-slides",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses((status = 200, description = "Home slides", body = ApiResponse<HomeSlideList>)),
    tag = "Storefront"
)]
pub async fn list_home_slides(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<HomeSlideList>>> {
    Ok(Json(content_service::list_home_slides(&state, pagination).await?))
}

#[utoipa::path(
    get,
    path = "/api/home-slides/{id}",
    params(("id" = Uuid, Path, description = "Home slide ID")),
    responses(
        (status = 200, description = "Home slide", body = ApiResponse<HomeSlide>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Storefront"
)]
pub async fn get_home_slide(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<HomeSlide>>> {
    Ok(Json(content_service::get_home_slide(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/slides",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses((status = 200, description = "Carousel slides", body = ApiResponse<SlideList>)),
    tag = "Storefront"
)]
pub async fn list_slides(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<SlideList>>> {
    Ok(Json(content_service::list_slides(&state, pagination).await?))
}

#[utoipa::path(
    get,
    path = "/api/slides/{id}",
    params(("id" = Uuid, Path, description = "Slide ID")),
    responses(
        (status = 200, description = "Slide", body = ApiResponse<Slide>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Storefront"
)]
pub async fn get_slide(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Slide>>> {
    Ok(Json(content_service::get_slide(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    params(SearchQuery),
    responses((status = 200, description = "Categories with product counts", body = ApiResponse<CategoryList>)),
    tag = "Storefront"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    Ok(Json(category_service::list_categories(&state, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = ApiResponse<Category>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Storefront"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Category>>> {
    Ok(Json(category_service::get_category(&state, id).await?))
}
