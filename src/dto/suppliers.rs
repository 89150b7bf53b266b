use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::double_option,
    models::{Supplier, SupplierDetail, SupplierType},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSupplierRequest {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSupplierRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SupplierList {
    #[schema(value_type = Vec<Supplier>)]
    pub items: Vec<Supplier>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateSupplierDetailRequest {
    pub supplier_id: Option<Uuid>,
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
}

/// Absent fields are left untouched; blank strings clear a column.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSupplierDetailRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub supplier_id: Option<Option<Uuid>>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub contact_person: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<SupplierType>)]
    pub supplier_type: Option<Option<SupplierType>>,
    pub country: Option<String>,
    pub payment_terms: Option<String>,
    pub bank_account: Option<String>,
    pub notes: Option<String>,
    pub region_served: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SupplierDetailList {
    #[schema(value_type = Vec<SupplierDetail>)]
    pub items: Vec<SupplierDetail>,
}
