use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::content::{
        CreateHomePageRequest, CreateHomeSlideRequest, DEFAULT_ABOUT_MESSAGE,
        DEFAULT_CONTACT_MESSAGE, DEFAULT_FOOTER_BUTTON_MESSAGE, DEFAULT_FOOTER_MESSAGE,
        DEFAULT_WELCOME_MESSAGE, HomeSlideList, SlideList, SlideRequest, UpdateHomePageRequest,
        UpdateHomeSlideRequest, UpdateSlideRequest,
    },
    entity::{
        home_pages::{
            ActiveModel as HomePageActive, Column as HomePageCol, Entity as HomePages,
            Model as HomePageModel,
        },
        home_slides::{
            ActiveModel as HomeSlideActive, Column as HomeSlideCol, Entity as HomeSlides,
            Model as HomeSlideModel,
        },
        slides::{ActiveModel as SlideActive, Column as SlideCol, Entity as Slides, Model as SlideModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{HomePage, HomeSlide, Slide},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
    validation,
};

// ---- home page (singleton) ----

const HOME_PAGE_EXISTS: &str = "a home page already exists";

/// The single home page row, if one has been created.
pub(crate) async fn current_home_page<C: ConnectionTrait>(conn: &C) -> AppResult<Option<HomePage>> {
    Ok(HomePages::find()
        .order_by_asc(HomePageCol::CreatedAt)
        .one(conn)
        .await?
        .map(home_page_from_entity))
}

pub async fn get_home_page(state: &AppState) -> AppResult<ApiResponse<HomePage>> {
    match current_home_page(&state.orm).await? {
        Some(page) => Ok(ApiResponse::success("Home page", page, None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn create_home_page(
    state: &AppState,
    user: &AuthUser,
    payload: CreateHomePageRequest,
) -> AppResult<ApiResponse<HomePage>> {
    ensure_admin(user)?;
    if HomePages::find().count(&state.orm).await? > 0 {
        return Err(AppError::Conflict(HOME_PAGE_EXISTS.into()));
    }

    let page = HomePageActive {
        id: Set(Uuid::new_v4()),
        site_name: Set(validation::required("site_name", payload.site_name, 255)?),
        logo: Set(validation::required("logo", payload.logo, 500)?),
        welcome_titre: Set(validation::required("welcome_titre", payload.welcome_titre, 255)?),
        welcome_message: Set(rich_text_or(payload.welcome_message, DEFAULT_WELCOME_MESSAGE)),
        action1_message: Set(validation::required("action1_message", payload.action1_message, 255)?),
        action1_lien: Set(validation::required("action1_lien", payload.action1_lien, 255)?),
        action2_message: Set(validation::required("action2_message", payload.action2_message, 255)?),
        action2_lien: Set(validation::required("action2_lien", payload.action2_lien, 255)?),
        contact_message: Set(rich_text_or(payload.contact_message, DEFAULT_CONTACT_MESSAGE)),
        about_message: Set(rich_text_or(payload.about_message, DEFAULT_ABOUT_MESSAGE)),
        footer_message: Set(rich_text_or(payload.footer_message, DEFAULT_FOOTER_MESSAGE)),
        footer_bouton_message: Set(match payload.footer_bouton_message {
            Some(m) if !m.trim().is_empty() => validation::required("footer_bouton_message", m, 255)?,
            _ => DEFAULT_FOOTER_BUTTON_MESSAGE.to_string(),
        }),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| AppError::unique_conflict(err, HOME_PAGE_EXISTS))?;

    audit::record(
        &state.pool,
        Some(user),
        "home_page_create",
        "home_pages",
        serde_json::json!({ "home_page_id": page.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Home page created",
        home_page_from_entity(page),
        Some(Meta::empty()),
    ))
}

pub async fn update_home_page(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateHomePageRequest,
) -> AppResult<ApiResponse<HomePage>> {
    ensure_admin(user)?;
    let existing = HomePages::find()
        .order_by_asc(HomePageCol::CreatedAt)
        .one(&state.orm)
        .await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: HomePageActive = existing.into();
    if let Some(v) = payload.site_name {
        active.site_name = Set(validation::required("site_name", v, 255)?);
    }
    if let Some(v) = payload.logo {
        active.logo = Set(validation::required("logo", v, 500)?);
    }
    if let Some(v) = payload.welcome_titre {
        active.welcome_titre = Set(validation::required("welcome_titre", v, 255)?);
    }
    if let Some(v) = payload.welcome_message {
        active.welcome_message = Set(rich_text_or(Some(v), DEFAULT_WELCOME_MESSAGE));
    }
    if let Some(v) = payload.action1_message {
        active.action1_message = Set(validation::required("action1_message", v, 255)?);
    }
    if let Some(v) = payload.action1_lien {
        active.action1_lien = Set(validation::required("action1_lien", v, 255)?);
    }
    if let Some(v) = payload.action2_message {
        active.action2_message = Set(validation::required("action2_message", v, 255)?);
    }
    if let Some(v) = payload.action2_lien {
        active.action2_lien = Set(validation::required("action2_lien", v, 255)?);
    }
    if let Some(v) = payload.contact_message {
        active.contact_message = Set(rich_text_or(Some(v), DEFAULT_CONTACT_MESSAGE));
    }
    if let Some(v) = payload.about_message {
        active.about_message = Set(rich_text_or(Some(v), DEFAULT_ABOUT_MESSAGE));
    }
    if let Some(v) = payload.footer_message {
        active.footer_message = Set(rich_text_or(Some(v), DEFAULT_FOOTER_MESSAGE));
    }
    if let Some(v) = payload.footer_bouton_message {
        active.footer_bouton_message = Set(validation::required("footer_bouton_message", v, 255)?);
    }

    let page = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user),
        "home_page_update",
        "home_pages",
        serde_json::json!({ "home_page_id": page.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        home_page_from_entity(page),
        Some(Meta::empty()),
    ))
}

pub async fn delete_home_page(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = HomePages::delete_many().exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user),
        "home_page_delete",
        "home_pages",
        serde_json::json!({}),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ---- home slides ----

pub(crate) async fn all_home_slides<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<HomeSlide>> {
    Ok(HomeSlides::find()
        .order_by_asc(HomeSlideCol::CreatedAt)
        .all(conn)
        .await?
        .into_iter()
        .map(home_slide_from_entity)
        .collect())
}

pub async fn list_home_slides(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<HomeSlideList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = HomeSlides::find().order_by_asc(HomeSlideCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(home_slide_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Home slides",
        HomeSlideList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_home_slide(state: &AppState, id: Uuid) -> AppResult<ApiResponse<HomeSlide>> {
    let slide = HomeSlides::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(home_slide_from_entity);
    match slide {
        Some(s) => Ok(ApiResponse::success("Home slide", s, None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn create_home_slide(
    state: &AppState,
    user: &AuthUser,
    payload: CreateHomeSlideRequest,
) -> AppResult<ApiResponse<HomeSlide>> {
    ensure_admin(user)?;
    let slide = HomeSlideActive {
        id: Set(Uuid::new_v4()),
        title: Set(validation::required("title", payload.title, 255)?),
        message: Set(validation::required("message", payload.message, 10_000)?),
        image: Set(validation::optional("image", payload.image, 500)?),
        action_text: Set(validation::optional("action_text", payload.action_text, 100)?),
        action_link: Set(checked_link(payload.action_link)?),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user),
        "home_slide_create",
        "home_slides",
        serde_json::json!({ "home_slide_id": slide.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Home slide created",
        home_slide_from_entity(slide),
        Some(Meta::empty()),
    ))
}

pub async fn update_home_slide(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateHomeSlideRequest,
) -> AppResult<ApiResponse<HomeSlide>> {
    ensure_admin(user)?;
    let existing = HomeSlides::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let mut active: HomeSlideActive = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(validation::required("title", title, 255)?);
    }
    if let Some(message) = payload.message {
        active.message = Set(validation::required("message", message, 10_000)?);
    }
    if let Some(image) = payload.image {
        active.image = Set(validation::optional("image", Some(image), 500)?);
    }
    if let Some(text) = payload.action_text {
        active.action_text = Set(validation::optional("action_text", Some(text), 100)?);
    }
    if let Some(link) = payload.action_link {
        active.action_link = Set(checked_link(Some(link))?);
    }
    let slide = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user),
        "home_slide_update",
        "home_slides",
        serde_json::json!({ "home_slide_id": slide.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        home_slide_from_entity(slide),
        Some(Meta::empty()),
    ))
}

pub async fn delete_home_slide(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = HomeSlides::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user),
        "home_slide_delete",
        "home_slides",
        serde_json::json!({ "home_slide_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ---- carousel slides ----

pub async fn list_slides(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<SlideList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Slides::find().order_by_asc(SlideCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(slide_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Slides",
        SlideList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_slide(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Slide>> {
    let slide = Slides::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(slide_from_entity);
    match slide {
        Some(s) => Ok(ApiResponse::success("Slide", s, None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn create_slide(
    state: &AppState,
    user: &AuthUser,
    payload: SlideRequest,
) -> AppResult<ApiResponse<Slide>> {
    ensure_admin(user)?;
    let slide = SlideActive {
        id: Set(Uuid::new_v4()),
        title: Set(validation::required("title", payload.title, 200)?),
        image: Set(validation::optional("image", payload.image, 500)?),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user),
        "slide_create",
        "slides",
        serde_json::json!({ "slide_id": slide.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Slide created",
        slide_from_entity(slide),
        Some(Meta::empty()),
    ))
}

pub async fn update_slide(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateSlideRequest,
) -> AppResult<ApiResponse<Slide>> {
    ensure_admin(user)?;
    let existing = Slides::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let mut active: SlideActive = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(validation::required("title", title, 200)?);
    }
    if let Some(image) = payload.image {
        active.image = Set(validation::optional("image", Some(image), 500)?);
    }
    let slide = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user),
        "slide_update",
        "slides",
        serde_json::json!({ "slide_id": slide.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        slide_from_entity(slide),
        Some(Meta::empty()),
    ))
}

pub async fn delete_slide(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Slides::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user),
        "slide_delete",
        "slides",
        serde_json::json!({ "slide_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Rich text is stored as submitted; blank input falls back to the default.
fn rich_text_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

fn checked_link(value: Option<String>) -> AppResult<Option<String>> {
    let value = validation::optional("action_link", value, 200)?;
    if let Some(link) = value.as_deref() {
        validation::url("action_link", link)?;
    }
    Ok(value)
}

fn home_page_from_entity(model: HomePageModel) -> HomePage {
    HomePage {
        id: model.id,
        site_name: model.site_name,
        logo: model.logo,
        welcome_titre: model.welcome_titre,
        welcome_message: model.welcome_message,
        action1_message: model.action1_message,
        action1_lien: model.action1_lien,
        action2_message: model.action2_message,
        action2_lien: model.action2_lien,
        contact_message: model.contact_message,
        about_message: model.about_message,
        footer_message: model.footer_message,
        footer_bouton_message: model.footer_bouton_message,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn home_slide_from_entity(model: HomeSlideModel) -> HomeSlide {
    HomeSlide {
        id: model.id,
        title: model.title,
        message: model.message,
        image: model.image,
        action_text: model.action_text,
        action_link: model.action_link,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn slide_from_entity(model: SlideModel) -> Slide {
    Slide {
        id: model.id,
        title: model.title,
        image: model.image,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
