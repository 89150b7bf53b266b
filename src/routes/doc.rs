use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{CreateUserRequest, LoginRequest, LoginResponse},
        categories::{CategoryList, CategoryRequest},
        commandes::{
            CommandeAction, CommandeActionRequest, CommandeConfirmation, CommandeList,
            PlaceCommandeRequest, UpdateCommandeRequest,
        },
        content::{
            CreateHomePageRequest, CreateHomeSlideRequest, HomeSlideList, SlideList, SlideRequest,
            UpdateHomePageRequest, UpdateHomeSlideRequest, UpdateSlideRequest,
        },
        dashboard::{Dashboard, MonthlyOrders, RecentAction},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        storefront::{HomeView, ProductDetail},
        suppliers::{
            CreateSupplierDetailRequest, CreateSupplierRequest, SupplierDetailList, SupplierList,
            UpdateSupplierDetailRequest, UpdateSupplierRequest,
        },
    },
    models::{
        Category, CategorySummary, Commande, HomePage, HomeSlide, PaymentMethod, Product, Role,
        Slide, Supplier, SupplierDetail, SupplierSummary, SupplierType, User,
    },
    response::{Affected, ApiResponse, Meta},
    routes::{admin, auth, commandes, health, params, storefront},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        storefront::home,
        storefront::product_detail,
        storefront::get_home_page,
        storefront::list_home_slides,
        storefront::get_home_slide,
        storefront::list_slides,
        storefront::get_slide,
        storefront::list_categories,
        storefront::get_category,
        commandes::place_commande,
        commandes::get_confirmation,
        commandes::download_receipt,
        admin::catalogue::create_category,
        admin::catalogue::update_category,
        admin::catalogue::delete_category,
        admin::catalogue::list_products,
        admin::catalogue::list_low_stock,
        admin::catalogue::get_product,
        admin::catalogue::create_product,
        admin::catalogue::update_product,
        admin::catalogue::delete_product,
        admin::suppliers::list_suppliers,
        admin::suppliers::get_supplier,
        admin::suppliers::create_supplier,
        admin::suppliers::update_supplier,
        admin::suppliers::delete_supplier,
        admin::suppliers::list_supplier_details,
        admin::suppliers::get_supplier_detail,
        admin::suppliers::create_supplier_detail,
        admin::suppliers::update_supplier_detail,
        admin::suppliers::delete_supplier_detail,
        admin::content::create_home_page,
        admin::content::update_home_page,
        admin::content::delete_home_page,
        admin::content::create_home_slide,
        admin::content::update_home_slide,
        admin::content::delete_home_slide,
        admin::content::create_slide,
        admin::content::update_slide,
        admin::content::delete_slide,
        admin::commandes::list_commandes,
        admin::commandes::get_commande,
        admin::commandes::update_commande,
        admin::commandes::delete_commande,
        admin::commandes::apply_action,
        admin::dashboard::dashboard,
        admin::users::create_user
    ),
    components(
        schemas(
            User,
            Role,
            Category,
            CategorySummary,
            Supplier,
            SupplierSummary,
            SupplierDetail,
            SupplierType,
            Product,
            HomePage,
            HomeSlide,
            Slide,
            Commande,
            PaymentMethod,
            LoginRequest,
            LoginResponse,
            CreateUserRequest,
            CategoryRequest,
            CategoryList,
            CreateSupplierRequest,
            UpdateSupplierRequest,
            SupplierList,
            CreateSupplierDetailRequest,
            UpdateSupplierDetailRequest,
            SupplierDetailList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateHomePageRequest,
            UpdateHomePageRequest,
            CreateHomeSlideRequest,
            UpdateHomeSlideRequest,
            SlideRequest,
            UpdateSlideRequest,
            HomeSlideList,
            SlideList,
            PlaceCommandeRequest,
            UpdateCommandeRequest,
            CommandeAction,
            CommandeActionRequest,
            CommandeConfirmation,
            CommandeList,
            Dashboard,
            MonthlyOrders,
            RecentAction,
            HomeView,
            ProductDetail,
            params::Pagination,
            params::SortOrder,
            params::ProductSortBy,
            Affected,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<ProductDetail>,
            ApiResponse<HomeView>,
            ApiResponse<CommandeConfirmation>,
            ApiResponse<CommandeList>,
            ApiResponse<Dashboard>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Back-office authentication"),
        (name = "Storefront", description = "Public catalogue and site content"),
        (name = "Commandes", description = "Placing commandes and downloading receipts"),
        (name = "Admin", description = "Back-office endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
