pub mod auth_service;
pub mod category_service;
pub mod commande_service;
pub mod content_service;
pub mod dashboard_service;
pub mod product_service;
pub mod storefront_service;
pub mod supplier_service;
