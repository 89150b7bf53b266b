use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Commande, PaymentMethod};

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceCommandeRequest {
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub payment: PaymentMethod,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCommandeRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub payment: Option<PaymentMethod>,
    pub is_delivered: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CommandeAction {
    MarkDelivered,
    MarkPending,
    DeleteSelected,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommandeActionRequest {
    pub action: CommandeAction,
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommandeConfirmation {
    pub commande: Commande,
    pub receipt_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CommandeList {
    #[schema(value_type = Vec<Commande>)]
    pub items: Vec<Commande>,
}
