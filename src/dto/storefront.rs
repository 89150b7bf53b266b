use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{HomePage, HomeSlide, Product};

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeView {
    pub home_data: Option<HomePage>,
    pub slides: Vec<HomeSlide>,
    pub products: Vec<Product>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
    pub similar_products: Vec<Product>,
}
