use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{HomeSlide, Slide};

pub const DEFAULT_WELCOME_MESSAGE: &str = "Bienvenue sur notre site";
pub const DEFAULT_CONTACT_MESSAGE: &str = "Contactez-nous";
pub const DEFAULT_ABOUT_MESSAGE: &str = "Bienvenue sur notre site";
pub const DEFAULT_FOOTER_MESSAGE: &str = "© 2025 – Tous droits réservés";
pub const DEFAULT_FOOTER_BUTTON_MESSAGE: &str = "En savoir plus";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHomePageRequest {
    pub site_name: String,
    pub logo: String,
    pub welcome_titre: String,
    pub welcome_message: Option<String>,
    pub action1_message: String,
    pub action1_lien: String,
    pub action2_message: String,
    pub action2_lien: String,
    pub contact_message: Option<String>,
    pub about_message: Option<String>,
    pub footer_message: Option<String>,
    pub footer_bouton_message: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateHomePageRequest {
    pub site_name: Option<String>,
    pub logo: Option<String>,
    pub welcome_titre: Option<String>,
    pub welcome_message: Option<String>,
    pub action1_message: Option<String>,
    pub action1_lien: Option<String>,
    pub action2_message: Option<String>,
    pub action2_lien: Option<String>,
    pub contact_message: Option<String>,
    pub about_message: Option<String>,
    pub footer_message: Option<String>,
    pub footer_bouton_message: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHomeSlideRequest {
    pub title: String,
    pub message: String,
    pub image: Option<String>,
    pub action_text: Option<String>,
    pub action_link: Option<String>,
}

/// Blank strings clear the optional columns.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateHomeSlideRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub image: Option<String>,
    pub action_text: Option<String>,
    pub action_link: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SlideRequest {
    pub title: String,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSlideRequest {
    pub title: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct HomeSlideList {
    #[schema(value_type = Vec<HomeSlide>)]
    pub items: Vec<HomeSlide>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SlideList {
    #[schema(value_type = Vec<Slide>)]
    pub items: Vec<Slide>,
}
