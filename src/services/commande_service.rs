use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::commandes::{
        CommandeAction, CommandeActionRequest, CommandeConfirmation, CommandeList,
        PlaceCommandeRequest, UpdateCommandeRequest,
    },
    entity::{
        commandes::{ActiveModel as CommandeActive, Column as CommandeCol, Entity as Commandes, Model as CommandeModel},
        products::{Column as ProdCol, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_staff},
    models::{Commande, PaymentMethod, commande_status, commande_total, format_amount},
    receipt::{self, ReceiptData},
    response::{Affected, ApiResponse, Meta},
    routes::params::{CommandeListQuery, SortOrder},
    services::content_service,
    state::AppState,
    validation,
};

pub const PLACED_MESSAGE: &str = "Commande enregistrée avec succès !";

/// Places an order for one product. The product row is locked while stock is
/// checked and decremented so two orders cannot both take the last unit.
pub async fn place_commande(
    state: &AppState,
    product_id: Uuid,
    payload: PlaceCommandeRequest,
) -> AppResult<ApiResponse<CommandeConfirmation>> {
    let customer_name = validation::required("customer_name", payload.customer_name, 255)?;
    let customer_email = validation::required("customer_email", payload.customer_email, 254)?;
    validation::email("customer_email", &customer_email)?;
    let customer_phone = validation::required("customer_phone", payload.customer_phone, 20)?;
    let customer_address =
        validation::required("customer_address", payload.customer_address, 10_000)?;
    if payload.quantity < 1 {
        return Err(AppError::BadRequest("quantity must be at least 1".into()));
    }

    let txn = state.orm.begin().await?;

    let product = Products::find_by_id(product_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    if product.quantity < i64::from(payload.quantity) {
        return Err(AppError::BadRequest("Stock insuffisant".into()));
    }

    let total_amount = commande_total(product.price, payload.quantity)
        .ok_or_else(|| AppError::BadRequest("order total is out of range".into()))?;

    let commande = CommandeActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(product.id),
        quantity: Set(payload.quantity),
        customer_name: Set(customer_name),
        customer_email: Set(customer_email),
        customer_phone: Set(customer_phone),
        customer_address: Set(customer_address),
        payment: Set(payload.payment.as_str().to_string()),
        total_amount: Set(total_amount),
        is_delivered: Set(false),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    Products::update_many()
        .col_expr(
            ProdCol::Quantity,
            Expr::col(ProdCol::Quantity).sub(i64::from(payload.quantity)),
        )
        .filter(ProdCol::Id.eq(product.id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        commande_id = %commande.id,
        product_id = %product.id,
        quantity = commande.quantity,
        total = commande.total_amount,
        "commande placed"
    );

    audit::record(
        &state.pool,
        None,
        "commande_place",
        "commandes",
        serde_json::json!({ "commande_id": commande.id, "product_id": product.id }),
    )
    .await;

    let commande = commande_from_entity(commande, Some(product))?;
    Ok(ApiResponse::success(
        PLACED_MESSAGE,
        confirmation(commande),
        Some(Meta::empty()),
    ))
}

pub async fn get_confirmation(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<CommandeConfirmation>> {
    let commande = find_commande(state, id).await?;
    Ok(ApiResponse::success("Commande", confirmation(commande), None))
}

/// Returns the receipt file name and PDF bytes.
pub async fn receipt_pdf(state: &AppState, id: Uuid) -> AppResult<(String, Vec<u8>)> {
    let commande = find_commande(state, id).await?;
    let site_name = content_service::current_home_page(&state.orm)
        .await?
        .map(|page| page.site_name);

    let data = ReceiptData {
        commande_id: commande.id,
        site_name,
        customer_name: commande.customer_name,
        product_name: commande.product_name,
        quantity: commande.quantity,
        customer_address: commande.customer_address,
        payment: commande.payment,
        created_at: commande.created_at,
        total_amount: commande.total_amount,
    };

    let bytes = tokio::task::spawn_blocking(move || receipt::render_receipt(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))??;

    Ok((receipt::receipt_filename(id), bytes))
}

pub async fn list_commandes(
    state: &AppState,
    user: &AuthUser,
    query: CommandeListQuery,
) -> AppResult<ApiResponse<CommandeList>> {
    ensure_staff(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(payment) = query.payment {
        condition = condition.add(CommandeCol::Payment.eq(payment.as_str()));
    }
    if let Some(is_delivered) = query.is_delivered {
        condition = condition.add(CommandeCol::IsDelivered.eq(is_delivered));
    }
    if let Some(search) = query.search() {
        let pattern = validation::contains(search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(CommandeCol::CustomerName).ilike(pattern.clone()))
                .add(Expr::col(CommandeCol::CustomerPhone).ilike(pattern)),
        );
    }

    let total = Commandes::find()
        .filter(condition.clone())
        .count(&state.orm)
        .await? as i64;

    let mut finder = Commandes::find()
        .filter(condition)
        .find_also_related(Products);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(CommandeCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(CommandeCol::CreatedAt),
    };

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(commande, product)| commande_from_entity(commande, product))
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Commandes", CommandeList { items }, Some(meta)))
}

pub async fn get_commande_admin(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Commande>> {
    ensure_staff(user)?;
    let commande = find_commande(state, id).await?;
    Ok(ApiResponse::success("Commande", commande, Some(Meta::empty())))
}

/// Staff may toggle delivery; editing customer or payment fields needs admin.
pub async fn update_commande(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCommandeRequest,
) -> AppResult<ApiResponse<Commande>> {
    let edits_details = payload.customer_name.is_some()
        || payload.customer_email.is_some()
        || payload.customer_phone.is_some()
        || payload.customer_address.is_some()
        || payload.payment.is_some();
    if edits_details {
        ensure_admin(user)?;
    } else {
        ensure_staff(user)?;
    }

    let existing = Commandes::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: CommandeActive = existing.into();
    if let Some(name) = payload.customer_name {
        active.customer_name = Set(validation::required("customer_name", name, 255)?);
    }
    if let Some(email) = payload.customer_email {
        let email = validation::required("customer_email", email, 254)?;
        validation::email("customer_email", &email)?;
        active.customer_email = Set(email);
    }
    if let Some(phone) = payload.customer_phone {
        active.customer_phone = Set(validation::required("customer_phone", phone, 20)?);
    }
    if let Some(address) = payload.customer_address {
        active.customer_address = Set(validation::required("customer_address", address, 10_000)?);
    }
    if let Some(payment) = payload.payment {
        active.payment = Set(payment.as_str().to_string());
    }
    if let Some(is_delivered) = payload.is_delivered {
        active.is_delivered = Set(is_delivered);
    }
    let commande = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user),
        "commande_update",
        "commandes",
        serde_json::json!({ "commande_id": commande.id, "is_delivered": commande.is_delivered }),
    )
    .await;

    let product = Products::find_by_id(commande.product_id)
        .one(&state.orm)
        .await?;
    Ok(ApiResponse::success(
        "Commande updated",
        commande_from_entity(commande, product)?,
        Some(Meta::empty()),
    ))
}

pub async fn delete_commande(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Commandes::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user),
        "commande_delete",
        "commandes",
        serde_json::json!({ "commande_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Bulk actions over a selection of commandes.
pub async fn apply_action(
    state: &AppState,
    user: &AuthUser,
    payload: CommandeActionRequest,
) -> AppResult<ApiResponse<Affected>> {
    if payload.ids.is_empty() {
        return Err(AppError::BadRequest("no commande selected".into()));
    }

    let affected = match payload.action {
        CommandeAction::MarkDelivered | CommandeAction::MarkPending => {
            ensure_staff(user)?;
            let delivered = payload.action == CommandeAction::MarkDelivered;
            Commandes::update_many()
                .col_expr(CommandeCol::IsDelivered, Expr::value(delivered))
                .filter(CommandeCol::Id.is_in(payload.ids.clone()))
                .exec(&state.orm)
                .await?
                .rows_affected
        }
        CommandeAction::DeleteSelected => {
            ensure_admin(user)?;
            Commandes::delete_many()
                .filter(CommandeCol::Id.is_in(payload.ids.clone()))
                .exec(&state.orm)
                .await?
                .rows_affected
        }
    };

    audit::record(
        &state.pool,
        Some(user),
        "commande_bulk_action",
        "commandes",
        serde_json::json!({ "action": payload.action, "ids": payload.ids, "affected": affected }),
    )
    .await;

    let message = match payload.action {
        CommandeAction::MarkDelivered => "Commandes marquées comme livrées",
        CommandeAction::MarkPending => "Commandes marquées en attente",
        CommandeAction::DeleteSelected => "Commandes supprimées",
    };
    Ok(ApiResponse::affected(message, affected))
}

async fn find_commande(state: &AppState, id: Uuid) -> AppResult<Commande> {
    let row = Commandes::find_by_id(id)
        .find_also_related(Products)
        .one(&state.orm)
        .await?;
    match row {
        Some((commande, product)) => commande_from_entity(commande, product),
        None => Err(AppError::NotFound),
    }
}

fn confirmation(commande: Commande) -> CommandeConfirmation {
    let receipt_url = format!("/api/commandes/{}/pdf", commande.id);
    CommandeConfirmation {
        commande,
        receipt_url,
    }
}

pub(crate) fn commande_from_entity(
    model: CommandeModel,
    product: Option<ProductModel>,
) -> AppResult<Commande> {
    let payment: PaymentMethod = model
        .payment
        .parse()
        .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))?;
    Ok(Commande {
        id: model.id,
        product_id: model.product_id,
        product_name: product.map(|p| p.name).unwrap_or_default(),
        quantity: model.quantity,
        customer_name: model.customer_name,
        customer_email: model.customer_email,
        customer_phone: model.customer_phone,
        customer_address: model.customer_address,
        payment_label: payment.label().to_string(),
        payment,
        total_display: format_amount(model.total_amount),
        total_amount: model.total_amount,
        status: commande_status(model.is_delivered).to_string(),
        is_delivered: model.is_delivered,
        created_at: model.created_at.with_timezone(&Utc),
    })
}
