use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::suppliers::{
        CreateSupplierDetailRequest, CreateSupplierRequest, SupplierDetailList, SupplierList,
        UpdateSupplierDetailRequest, UpdateSupplierRequest,
    },
    entity::{
        supplier_details::{
            ActiveModel as DetailActive, Column as DetailCol, Entity as SupplierDetails,
            Model as DetailModel,
        },
        suppliers::{ActiveModel, Column, Entity as Suppliers, Model as SupplierModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_staff},
    models::{Supplier, SupplierDetail, SupplierType},
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    state::AppState,
    validation,
};

pub async fn list_suppliers(
    state: &AppState,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<SupplierList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(search) = query.search() {
        condition = condition.add(Expr::col(Column::Name).ilike(validation::contains(search)));
    }

    let finder = Suppliers::find()
        .filter(condition)
        .order_by_asc(Column::Name);
    let total = finder.clone().count(&state.orm).await? as i64;

    let suppliers = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let ids: Vec<Uuid> = suppliers.iter().map(|s| s.id).collect();
    let mut details: HashMap<Uuid, DetailModel> = SupplierDetails::find()
        .filter(DetailCol::SupplierId.is_in(ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .filter_map(|d| d.supplier_id.map(|id| (id, d)))
        .collect();

    let items = suppliers
        .into_iter()
        .map(|s| {
            let detail = details.remove(&s.id);
            supplier_from_entity(s, detail)
        })
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Suppliers", SupplierList { items }, Some(meta)))
}

pub async fn get_supplier(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Supplier>> {
    ensure_staff(user)?;
    let supplier = Suppliers::find_by_id(id).one(&state.orm).await?;
    let supplier = match supplier {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    let detail = SupplierDetails::find()
        .filter(DetailCol::SupplierId.eq(supplier.id))
        .one(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Supplier",
        supplier_from_entity(supplier, detail),
        None,
    ))
}

pub async fn create_supplier(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSupplierRequest,
) -> AppResult<ApiResponse<Supplier>> {
    ensure_admin(user)?;
    let supplier = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(validation::required("name", payload.name, 100)?),
        phone: Set(validation::required("phone", payload.phone, 255)?),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user),
        "supplier_create",
        "suppliers",
        serde_json::json!({ "supplier_id": supplier.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Supplier created",
        supplier_from_entity(supplier, None),
        Some(Meta::empty()),
    ))
}

pub async fn update_supplier(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateSupplierRequest,
) -> AppResult<ApiResponse<Supplier>> {
    ensure_admin(user)?;
    let existing = Suppliers::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(validation::required("name", name, 100)?);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(validation::required("phone", phone, 255)?);
    }
    let supplier = active.update(&state.orm).await?;

    let detail = SupplierDetails::find()
        .filter(DetailCol::SupplierId.eq(supplier.id))
        .one(&state.orm)
        .await?;

    audit::record(
        &state.pool,
        Some(user),
        "supplier_update",
        "suppliers",
        serde_json::json!({ "supplier_id": supplier.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        supplier_from_entity(supplier, detail),
        Some(Meta::empty()),
    ))
}

/// Products and details of the supplier keep existing with a null supplier.
pub async fn delete_supplier(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Suppliers::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user),
        "supplier_delete",
        "suppliers",
        serde_json::json!({ "supplier_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn list_supplier_details(
    state: &AppState,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<SupplierDetailList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(search) = query.search() {
        condition = condition.add(Expr::col(DetailCol::Country).ilike(validation::contains(search)));
    }

    let finder = SupplierDetails::find()
        .filter(condition)
        .order_by_desc(DetailCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let details = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let supplier_ids: Vec<Uuid> = details.iter().filter_map(|d| d.supplier_id).collect();
    let names: HashMap<Uuid, String> = Suppliers::find()
        .filter(Column::Id.is_in(supplier_ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    let items = details
        .into_iter()
        .map(|d| {
            let name = d.supplier_id.and_then(|id| names.get(&id).cloned());
            detail_from_entity(d, name)
        })
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Supplier details",
        SupplierDetailList { items },
        Some(meta),
    ))
}

pub async fn get_supplier_detail(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<SupplierDetail>> {
    ensure_staff(user)?;
    let detail = SupplierDetails::find_by_id(id).one(&state.orm).await?;
    let detail = match detail {
        Some(d) => d,
        None => return Err(AppError::NotFound),
    };
    let name = supplier_name(&state.orm, detail.supplier_id).await?;
    Ok(ApiResponse::success(
        "Supplier detail",
        detail_from_entity(detail, name),
        None,
    ))
}

pub async fn create_supplier_detail(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSupplierDetailRequest,
) -> AppResult<ApiResponse<SupplierDetail>> {
    ensure_admin(user)?;
    if let Some(supplier_id) = payload.supplier_id {
        ensure_detail_slot_free(&state.orm, supplier_id, None).await?;
    }

    let detail = DetailActive {
        id: Set(Uuid::new_v4()),
        supplier_id: Set(payload.supplier_id),
        address: Set(validation::optional("address", payload.address, 255)?),
        contact_email: Set(checked_email(payload.contact_email)?),
        website: Set(checked_website(payload.website)?),
        contact_person: Set(validation::optional("contact_person", payload.contact_person, 100)?),
        supplier_type: Set(payload.supplier_type.map(|t| t.as_str().to_string())),
        country: Set(validation::optional("country", payload.country, 100)?),
        payment_terms: Set(validation::optional("payment_terms", payload.payment_terms, 100)?),
        bank_account: Set(validation::optional("bank_account", payload.bank_account, 100)?),
        notes: Set(validation::optional("notes", payload.notes, 10_000)?),
        region_served: Set(validation::optional("region_served", payload.region_served, 100)?),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user),
        "supplier_detail_create",
        "supplier_details",
        serde_json::json!({ "supplier_detail_id": detail.id, "supplier_id": detail.supplier_id }),
    )
    .await;

    let name = supplier_name(&state.orm, detail.supplier_id).await?;
    Ok(ApiResponse::success(
        "Supplier detail created",
        detail_from_entity(detail, name),
        Some(Meta::empty()),
    ))
}

pub async fn update_supplier_detail(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateSupplierDetailRequest,
) -> AppResult<ApiResponse<SupplierDetail>> {
    ensure_admin(user)?;
    let existing = SupplierDetails::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(d) => d,
        None => return Err(AppError::NotFound),
    };

    let mut active: DetailActive = existing.into();
    if let Some(supplier_id) = payload.supplier_id {
        if let Some(supplier_id) = supplier_id {
            ensure_detail_slot_free(&state.orm, supplier_id, Some(id)).await?;
        }
        active.supplier_id = Set(supplier_id);
    }
    if let Some(address) = payload.address {
        active.address = Set(validation::optional("address", Some(address), 255)?);
    }
    if let Some(email) = payload.contact_email {
        active.contact_email = Set(checked_email(Some(email))?);
    }
    if let Some(website) = payload.website {
        active.website = Set(checked_website(Some(website))?);
    }
    if let Some(person) = payload.contact_person {
        active.contact_person = Set(validation::optional("contact_person", Some(person), 100)?);
    }
    if let Some(supplier_type) = payload.supplier_type {
        active.supplier_type = Set(supplier_type.map(|t| t.as_str().to_string()));
    }
    if let Some(country) = payload.country {
        active.country = Set(validation::optional("country", Some(country), 100)?);
    }
    if let Some(terms) = payload.payment_terms {
        active.payment_terms = Set(validation::optional("payment_terms", Some(terms), 100)?);
    }
    if let Some(account) = payload.bank_account {
        active.bank_account = Set(validation::optional("bank_account", Some(account), 100)?);
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(validation::optional("notes", Some(notes), 10_000)?);
    }
    if let Some(region) = payload.region_served {
        active.region_served = Set(validation::optional("region_served", Some(region), 100)?);
    }

    let detail = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user),
        "supplier_detail_update",
        "supplier_details",
        serde_json::json!({ "supplier_detail_id": detail.id }),
    )
    .await;

    let name = supplier_name(&state.orm, detail.supplier_id).await?;
    Ok(ApiResponse::success(
        "Updated",
        detail_from_entity(detail, name),
        Some(Meta::empty()),
    ))
}

pub async fn delete_supplier_detail(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = SupplierDetails::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user),
        "supplier_detail_delete",
        "supplier_details",
        serde_json::json!({ "supplier_detail_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// A supplier has at most one detail record; `current` is the record being edited.
async fn ensure_detail_slot_free<C: ConnectionTrait>(
    conn: &C,
    supplier_id: Uuid,
    current: Option<Uuid>,
) -> AppResult<()> {
    if Suppliers::find_by_id(supplier_id).one(conn).await?.is_none() {
        return Err(AppError::BadRequest(format!("unknown supplier {supplier_id}")));
    }

    let taken = SupplierDetails::find()
        .filter(DetailCol::SupplierId.eq(supplier_id))
        .one(conn)
        .await?;
    match taken {
        Some(detail) if Some(detail.id) != current => Err(AppError::Conflict(
            "supplier already has details".into(),
        )),
        _ => Ok(()),
    }
}

async fn supplier_name<C: ConnectionTrait>(
    conn: &C,
    supplier_id: Option<Uuid>,
) -> AppResult<Option<String>> {
    let Some(supplier_id) = supplier_id else {
        return Ok(None);
    };
    Ok(Suppliers::find_by_id(supplier_id)
        .one(conn)
        .await?
        .map(|s| s.name))
}

fn checked_email(value: Option<String>) -> AppResult<Option<String>> {
    let value = validation::optional("contact_email", value, 254)?;
    if let Some(email) = value.as_deref() {
        validation::email("contact_email", email)?;
    }
    Ok(value)
}

fn checked_website(value: Option<String>) -> AppResult<Option<String>> {
    let value = validation::optional("website", value, 200)?;
    if let Some(url) = value.as_deref() {
        validation::url("website", url)?;
    }
    Ok(value)
}

fn supplier_from_entity(model: SupplierModel, detail: Option<DetailModel>) -> Supplier {
    let details = detail.map(|d| detail_from_entity(d, Some(model.name.clone())));
    Supplier {
        id: model.id,
        name: model.name,
        phone: model.phone,
        details,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn detail_from_entity(model: DetailModel, supplier_name: Option<String>) -> SupplierDetail {
    SupplierDetail {
        id: model.id,
        supplier_id: model.supplier_id,
        supplier_name,
        address: model.address,
        contact_email: model.contact_email,
        website: model.website,
        contact_person: model.contact_person,
        supplier_type: model
            .supplier_type
            .as_deref()
            .and_then(|t| t.parse::<SupplierType>().ok()),
        country: model.country,
        payment_terms: model.payment_terms,
        bank_account: model.bank_account,
        notes: model.notes,
        region_served: model.region_served,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
