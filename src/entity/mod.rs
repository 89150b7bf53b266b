pub mod audit_logs;
pub mod categories;
pub mod commandes;
pub mod home_pages;
pub mod home_slides;
pub mod product_categories;
pub mod products;
pub mod slides;
pub mod supplier_details;
pub mod suppliers;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use commandes::Entity as Commandes;
pub use home_pages::Entity as HomePages;
pub use home_slides::Entity as HomeSlides;
pub use product_categories::Entity as ProductCategories;
pub use products::Entity as Products;
pub use slides::Entity as Slides;
pub use supplier_details::Entity as SupplierDetails;
pub use suppliers::Entity as Suppliers;
pub use users::Entity as Users;
