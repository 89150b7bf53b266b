use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Products at or below this quantity are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

pub const NO_CATEGORY_LABEL: &str = "Aucune catégorie";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Livraison,
    Orange,
    Mtn,
    Wave,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Livraison,
        PaymentMethod::Orange,
        PaymentMethod::Mtn,
        PaymentMethod::Wave,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Livraison => "LIVRAISON",
            PaymentMethod::Orange => "ORANGE",
            PaymentMethod::Mtn => "MTN",
            PaymentMethod::Wave => "WAVE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Livraison => "Paiement à la livraison",
            PaymentMethod::Orange => "Orange Money",
            PaymentMethod::Mtn => "MTN Mobile Money",
            PaymentMethod::Wave => "Wave",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown payment method {s}"))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SupplierType {
    Distributeur,
    Fabricant,
    Revendeur,
}

impl SupplierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierType::Distributeur => "distributeur",
            SupplierType::Fabricant => "fabricant",
            SupplierType::Revendeur => "revendeur",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SupplierType::Distributeur => "Distributeur",
            SupplierType::Fabricant => "Fabricant",
            SupplierType::Revendeur => "Revendeur",
        }
    }
}

impl FromStr for SupplierType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distributeur" => Ok(SupplierType::Distributeur),
            "fabricant" => Ok(SupplierType::Fabricant),
            "revendeur" => Ok(SupplierType::Revendeur),
            other => Err(format!("unknown supplier type {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            other => Err(format!("unknown role {other}")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub products_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SupplierDetail {
    pub id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub supplier_name: Option<String>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub contact_person: Option<String>,
    pub supplier_type: Option<SupplierType>,
    pub country: Option<String>,
    pub payment_terms: Option<String>,
    pub bank_account: Option<String>,
    pub notes: Option<String>,
    pub region_served: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for SupplierDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Détails de {}",
            self.supplier_name.as_deref().unwrap_or("None")
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub details: Option<SupplierDetail>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Minor currency units.
    pub price: i64,
    pub price_display: String,
    pub quantity: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub categories: Vec<CategorySummary>,
    pub categories_list: String,
    pub supplier: Option<SupplierSummary>,
    pub stock_status: String,
    pub is_low_stock: bool,
    pub created_at: DateTime<Utc>,
}

pub fn stock_status(quantity: i64) -> &'static str {
    if quantity > 0 {
        "En stock"
    } else {
        "Rupture de stock"
    }
}

pub fn is_low_stock(quantity: i64) -> bool {
    quantity <= LOW_STOCK_THRESHOLD
}

pub fn categories_list(categories: &[CategorySummary]) -> String {
    if categories.is_empty() {
        return NO_CATEGORY_LABEL.to_string();
    }
    categories
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders minor units as `12.50`.
pub fn format_amount(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// `price × quantity`, `None` on overflow or a non-positive quantity.
pub fn commande_total(price: i64, quantity: i32) -> Option<i64> {
    if quantity <= 0 {
        return None;
    }
    price.checked_mul(i64::from(quantity))
}

pub fn commande_status(is_delivered: bool) -> &'static str {
    if is_delivered { "Livrée" } else { "En attente" }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HomePage {
    pub id: Uuid,
    pub site_name: String,
    pub logo: String,
    pub welcome_titre: String,
    pub welcome_message: String,
    pub action1_message: String,
    pub action1_lien: String,
    pub action2_message: String,
    pub action2_lien: String,
    pub contact_message: String,
    pub about_message: String,
    pub footer_message: String,
    pub footer_bouton_message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HomeSlide {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub image: Option<String>,
    pub action_text: Option<String>,
    pub action_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Slide {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Commande {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub payment: PaymentMethod,
    pub payment_label: String,
    pub total_amount: i64,
    pub total_display: String,
    pub is_delivered: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Commande {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commande #{} - {}", self.id, self.customer_name)
    }
}
