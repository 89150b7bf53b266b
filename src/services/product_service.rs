use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        categories::{Column as CatCol, Entity as Categories},
        product_categories::{
            ActiveModel as LinkActive, Column as LinkCol, Entity as ProductCategories,
        },
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
        suppliers::{Column as SupCol, Entity as Suppliers},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_staff},
    models::{
        CategorySummary, LOW_STOCK_THRESHOLD, Product, SupplierSummary, categories_list,
        format_amount, is_low_stock, stock_status,
    },
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SearchQuery, SortOrder},
    state::AppState,
    validation,
};

pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.search() {
        condition = condition.add(Expr::col(Column::Name).ilike(validation::contains(search)));
    }

    if let Some(category_id) = query.category_id {
        condition = condition.add(Column::Id.in_subquery(
            Query::select()
                .column(LinkCol::ProductId)
                .from(ProductCategories)
                .and_where(LinkCol::CategoryId.eq(category_id))
                .to_owned(),
        ));
    }

    if let Some(supplier_id) = query.supplier_id {
        condition = condition.add(Column::SupplierId.eq(supplier_id));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::Name => Column::Name,
        ProductSortBy::Quantity => Column::Quantity,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let models = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;
    let items = hydrate(&state.orm, models).await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn list_low_stock(
    state: &AppState,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let finder = Products::find()
        .filter(Column::Quantity.lte(LOW_STOCK_THRESHOLD))
        .order_by_asc(Column::Quantity)
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let models = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;
    let items = hydrate(&state.orm, models).await?;

    Ok(ApiResponse::success(
        "Low stock",
        ProductList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = find_product(&state.orm, id).await?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn get_product_admin(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    ensure_staff(user)?;
    let product = find_product(&state.orm, id).await?;
    Ok(ApiResponse::success("Product", product, Some(Meta::empty())))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let name = validation::required("name", payload.name, 100)?;
    validation::non_negative("price", payload.price)?;
    validation::non_negative("quantity", payload.quantity)?;
    let description = validation::optional("description", payload.description, 10_000)?;
    let image = validation::optional("image", payload.image, 500)?;

    let txn = state.orm.begin().await?;

    if let Some(supplier_id) = payload.supplier_id {
        ensure_supplier_exists(&txn, supplier_id).await?;
    }
    let category_ids = ensure_categories_exist(&txn, payload.categories).await?;

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        price: Set(payload.price),
        quantity: Set(payload.quantity),
        description: Set(description),
        image: Set(image),
        supplier_id: Set(payload.supplier_id),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    link_categories(&txn, product.id, &category_ids).await?;

    let product = hydrate_one(&txn, product).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user),
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;

    let existing = Products::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(validation::required("name", name, 100)?);
    }
    if let Some(price) = payload.price {
        validation::non_negative("price", price)?;
        active.price = Set(price);
    }
    if let Some(quantity) = payload.quantity {
        validation::non_negative("quantity", quantity)?;
        active.quantity = Set(quantity);
    }
    if let Some(description) = payload.description {
        active.description = Set(validation::optional("description", Some(description), 10_000)?);
    }
    if let Some(image) = payload.image {
        active.image = Set(validation::optional("image", Some(image), 500)?);
    }
    if let Some(supplier_id) = payload.supplier_id {
        if let Some(supplier_id) = supplier_id {
            ensure_supplier_exists(&txn, supplier_id).await?;
        }
        active.supplier_id = Set(supplier_id);
    }

    let product = active.update(&txn).await?;

    if let Some(categories) = payload.categories {
        let category_ids = ensure_categories_exist(&txn, categories).await?;
        ProductCategories::delete_many()
            .filter(LinkCol::ProductId.eq(product.id))
            .exec(&txn)
            .await?;
        link_categories(&txn, product.id, &category_ids).await?;
    }

    let product = hydrate_one(&txn, product).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user),
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub(crate) async fn find_product<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Product> {
    let model = Products::find_by_id(id).one(conn).await?;
    match model {
        Some(model) => hydrate_one(conn, model).await,
        None => Err(AppError::NotFound),
    }
}

pub(crate) async fn hydrate_one<C: ConnectionTrait>(
    conn: &C,
    model: ProductModel,
) -> AppResult<Product> {
    let mut items = hydrate(conn, vec![model]).await?;
    items
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("product vanished while loading")))
}

/// Attaches categories and supplier names to a page of products with two
/// batched queries.
pub(crate) async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    models: Vec<ProductModel>,
) -> AppResult<Vec<Product>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();

    let links = ProductCategories::find()
        .filter(LinkCol::ProductId.is_in(ids))
        .find_also_related(Categories)
        .order_by_asc(CatCol::Name)
        .all(conn)
        .await?;

    let mut categories: HashMap<Uuid, Vec<CategorySummary>> = HashMap::new();
    for (link, category) in links {
        if let Some(category) = category {
            categories
                .entry(link.product_id)
                .or_default()
                .push(CategorySummary {
                    id: category.id,
                    name: category.name,
                });
        }
    }

    let supplier_ids: Vec<Uuid> = models.iter().filter_map(|m| m.supplier_id).collect();
    let suppliers: HashMap<Uuid, SupplierSummary> = if supplier_ids.is_empty() {
        HashMap::new()
    } else {
        Suppliers::find()
            .filter(SupCol::Id.is_in(supplier_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|s| (s.id, SupplierSummary { id: s.id, name: s.name }))
            .collect()
    };

    Ok(models
        .into_iter()
        .map(|model| {
            let cats = categories.remove(&model.id).unwrap_or_default();
            let supplier = model.supplier_id.and_then(|id| suppliers.get(&id).cloned());
            product_from_entity(model, cats, supplier)
        })
        .collect())
}

pub fn product_from_entity(
    model: ProductModel,
    categories: Vec<CategorySummary>,
    supplier: Option<SupplierSummary>,
) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        price_display: format_amount(model.price),
        quantity: model.quantity,
        description: model.description,
        image: model.image,
        categories_list: categories_list(&categories),
        categories,
        supplier,
        stock_status: stock_status(model.quantity).to_string(),
        is_low_stock: is_low_stock(model.quantity),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

async fn ensure_supplier_exists<C: ConnectionTrait>(conn: &C, supplier_id: Uuid) -> AppResult<()> {
    let found = Suppliers::find_by_id(supplier_id).one(conn).await?;
    if found.is_none() {
        return Err(AppError::BadRequest(format!("unknown supplier {supplier_id}")));
    }
    Ok(())
}

/// Deduplicates `ids` and rejects the set when any category is missing.
async fn ensure_categories_exist<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<Uuid>,
) -> AppResult<Vec<Uuid>> {
    let mut seen = HashSet::new();
    let ids: Vec<Uuid> = ids.into_iter().filter(|id| seen.insert(*id)).collect();
    if ids.is_empty() {
        return Ok(ids);
    }

    let found: HashSet<Uuid> = Categories::find()
        .filter(CatCol::Id.is_in(ids.clone()))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();

    if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
        return Err(AppError::BadRequest(format!("unknown category {missing}")));
    }
    Ok(ids)
}

async fn link_categories<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    category_ids: &[Uuid],
) -> AppResult<()> {
    if category_ids.is_empty() {
        return Ok(());
    }
    let links = category_ids.iter().map(|category_id| LinkActive {
        product_id: Set(product_id),
        category_id: Set(*category_id),
    });
    ProductCategories::insert_many(links).exec(conn).await?;
    Ok(())
}
