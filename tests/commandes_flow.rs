use storefront_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        auth::{CreateUserRequest, LoginRequest},
        categories::CategoryRequest,
        commandes::{CommandeAction, CommandeActionRequest, PlaceCommandeRequest, UpdateCommandeRequest},
        content::CreateHomePageRequest,
        products::{CreateProductRequest, UpdateProductRequest},
        suppliers::{CreateSupplierDetailRequest, CreateSupplierRequest},
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{PaymentMethod, Role, SupplierType},
    routes::params::{CommandeListQuery, SearchQuery},
    services::{
        auth_service, category_service, commande_service, content_service, dashboard_service, product_service,
        storefront_service, supplier_service,
    },
    state::AppState,
};
use sea_orm::{ConnectionTrait, Statement};
use uuid::Uuid;

// Integration flow: admin builds the catalogue, a customer orders, staff
// works the commande list and the dashboard reflects it.
#[tokio::test]
async fn catalogue_commande_and_dashboard_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let admin = create_user(&state, "admin", "admin@example.com").await?;
    let staff = create_user(&state, "staff", "staff@example.com").await?;

    // Catalogue
    let category = category_service::create_category(
        &state,
        &admin,
        CategoryRequest {
            name: "Accessoires".into(),
        },
    )
    .await?
    .data
    .unwrap();

    let denied = category_service::create_category(
        &state,
        &staff,
        CategoryRequest {
            name: "Chaussures".into(),
        },
    )
    .await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    let supplier = supplier_service::create_supplier(
        &state,
        &admin,
        CreateSupplierRequest {
            name: "Sahel Distribution".into(),
            phone: "+221 33 800 00 00".into(),
        },
    )
    .await?
    .data
    .unwrap();

    let detail = supplier_service::create_supplier_detail(
        &state,
        &admin,
        CreateSupplierDetailRequest {
            supplier_id: Some(supplier.id),
            supplier_type: Some(SupplierType::Distributeur),
            country: Some("Sénégal".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(detail.supplier_name.as_deref(), Some("Sahel Distribution"));
    let second_detail = supplier_service::create_supplier_detail(
        &state,
        &admin,
        CreateSupplierDetailRequest {
            supplier_id: Some(supplier.id),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(second_detail, Err(AppError::Conflict(_))));

    let product = product_service::create_product(
        &state,
        &admin,
        CreateProductRequest {
            name: "Sac en cuir".into(),
            price: 4500,
            quantity: 6,
            description: Some("Sac à main cousu main".into()),
            image: None,
            categories: vec![category.id],
            supplier_id: Some(supplier.id),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(product.categories_list, "Accessoires");
    assert_eq!(product.supplier.as_ref().map(|s| s.id), Some(supplier.id));
    assert!(!product.is_low_stock);

    let unknown_category = product_service::create_product(
        &state,
        &admin,
        CreateProductRequest {
            name: "Fantôme".into(),
            price: 100,
            quantity: 1,
            description: None,
            image: None,
            categories: vec![Uuid::new_v4()],
            supplier_id: None,
        },
    )
    .await;
    assert!(matches!(unknown_category, Err(AppError::BadRequest(_))));

    // Storefront search matches the description too
    let home = storefront_service::home(
        &state,
        SearchQuery {
            q: Some("COUSU".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert!(home.products.iter().any(|p| p.id == product.id));
    assert!(home.home_data.is_none());

    // LIKE wildcards in the query are matched literally
    for wildcard in ["%", "_"] {
        let found = storefront_service::home(
            &state,
            SearchQuery {
                q: Some(wildcard.into()),
                ..Default::default()
            },
        )
        .await?
        .data
        .unwrap();
        assert!(found.products.is_empty(), "q={wildcard} matched {:?}", found.products.len());
    }

    // Ordering
    let placed = commande_service::place_commande(&state, product.id, order(2)).await?;
    assert_eq!(placed.message, commande_service::PLACED_MESSAGE);
    let confirmation = placed.data.unwrap();
    assert_eq!(confirmation.commande.total_amount, 9000);
    assert_eq!(confirmation.commande.status, "En attente");
    assert_eq!(
        confirmation.receipt_url,
        format!("/api/commandes/{}/pdf", confirmation.commande.id)
    );

    let restocked = product_service::get_product(&state, product.id).await?.data.unwrap();
    assert_eq!(restocked.quantity, 4);
    assert!(restocked.is_low_stock);

    let too_many = commande_service::place_commande(&state, product.id, order(5)).await;
    match too_many {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Stock insuffisant"),
        other => panic!("expected insufficient stock, got {other:?}"),
    }

    let missing = commande_service::place_commande(&state, Uuid::new_v4(), order(1)).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    let second = commande_service::place_commande(&state, product.id, order(1))
        .await?
        .data
        .unwrap()
        .commande;

    let (filename, pdf) = commande_service::receipt_pdf(&state, second.id).await?;
    assert_eq!(filename, format!("commande_{}.pdf", second.id));
    assert!(pdf.starts_with(b"%PDF"));

    // Back office
    let listed = commande_service::list_commandes(
        &state,
        &staff,
        CommandeListQuery {
            payment: Some(PaymentMethod::Wave),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(listed.meta.as_ref().and_then(|m| m.total), Some(2));
    let items = listed.data.unwrap().items;
    assert_eq!(items[0].id, second.id, "newest first");

    let empty = commande_service::apply_action(
        &state,
        &staff,
        CommandeActionRequest {
            action: CommandeAction::MarkDelivered,
            ids: vec![],
        },
    )
    .await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    let delivered = commande_service::apply_action(
        &state,
        &staff,
        CommandeActionRequest {
            action: CommandeAction::MarkDelivered,
            ids: vec![confirmation.commande.id],
        },
    )
    .await?;
    assert_eq!(delivered.data.unwrap().affected, 1);

    let staff_delete = commande_service::apply_action(
        &state,
        &staff,
        CommandeActionRequest {
            action: CommandeAction::DeleteSelected,
            ids: vec![second.id],
        },
    )
    .await;
    assert!(matches!(staff_delete, Err(AppError::Forbidden)));

    let staff_edit = commande_service::update_commande(
        &state,
        &staff,
        second.id,
        UpdateCommandeRequest {
            customer_name: Some("Quelqu'un d'autre".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(staff_edit, Err(AppError::Forbidden)));

    let dashboard = dashboard_service::dashboard(&state, &staff).await?.data.unwrap();
    assert_eq!(dashboard.products_count, 1);
    assert_eq!(dashboard.low_stock_count, 1);
    assert_eq!(dashboard.orders_delivered, 1);
    assert_eq!(dashboard.orders_pending, 1);
    assert_eq!(dashboard.last_commandes.len(), 2);
    let month_total: i64 = dashboard.monthly_orders.iter().map(|m| m.total).sum();
    assert_eq!(month_total, 2);

    let pending = commande_service::apply_action(
        &state,
        &staff,
        CommandeActionRequest {
            action: CommandeAction::MarkPending,
            ids: vec![confirmation.commande.id],
        },
    )
    .await?;
    assert_eq!(pending.data.unwrap().affected, 1);
    let reverted = commande_service::get_commande_admin(&state, &staff, confirmation.commande.id)
        .await?
        .data
        .unwrap();
    assert!(!reverted.is_delivered);
    assert_eq!(reverted.status, "En attente");

    // Back-office product reads need a known role
    let staff_view = product_service::get_product_admin(&state, &staff, product.id)
        .await?
        .data
        .unwrap();
    assert_eq!(staff_view.quantity, 3);
    let stranger = AuthUser {
        user_id: Uuid::new_v4(),
        role: "customer".into(),
    };
    let denied_read = product_service::get_product_admin(&state, &stranger, product.id).await;
    assert!(matches!(denied_read, Err(AppError::Forbidden)));

    // Similar products
    let chaussures = category_service::create_category(
        &state,
        &admin,
        CategoryRequest {
            name: "Chaussures".into(),
        },
    )
    .await?
    .data
    .unwrap();
    let sandales = create_product(&state, &admin, "Sandales", 3, vec![category.id]).await?;
    let chapeau = create_product(&state, &admin, "Chapeau", 2, vec![]).await?;
    let epuise = create_product(&state, &admin, "Épuisé", 0, vec![category.id]).await?;

    let detail_view = storefront_service::product_detail(&state, product.id)
        .await?
        .data
        .unwrap();
    let similar: Vec<Uuid> = detail_view.similar_products.iter().map(|p| p.id).collect();
    assert_eq!(similar, vec![sandales.id], "shares a category and is in stock");

    let fallback = storefront_service::product_detail(&state, chapeau.id)
        .await?
        .data
        .unwrap();
    let similar: Vec<Uuid> = fallback.similar_products.iter().map(|p| p.id).collect();
    assert!(similar.contains(&product.id));
    assert!(similar.contains(&sandales.id));
    assert!(!similar.contains(&chapeau.id));
    assert!(!similar.contains(&epuise.id));

    // Replacing the category set
    let moved = product_service::update_product(
        &state,
        &admin,
        sandales.id,
        UpdateProductRequest {
            categories: Some(vec![chaussures.id]),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(moved.categories_list, "Chaussures");
    let detail_view = storefront_service::product_detail(&state, product.id)
        .await?
        .data
        .unwrap();
    assert!(detail_view.similar_products.is_empty());

    let bad_set = product_service::update_product(
        &state,
        &admin,
        sandales.id,
        UpdateProductRequest {
            categories: Some(vec![chaussures.id, Uuid::new_v4()]),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(bad_set, Err(AppError::BadRequest(_))));
    let unchanged = product_service::get_product(&state, sandales.id).await?.data.unwrap();
    assert_eq!(unchanged.categories_list, "Chaussures");

    // Deleting a supplier keeps its products and details, unlinked
    supplier_service::delete_supplier(&state, &admin, supplier.id).await?;
    let orphan = product_service::get_product(&state, product.id).await?.data.unwrap();
    assert!(orphan.supplier.is_none());
    let orphan_detail = supplier_service::get_supplier_detail(&state, &staff, detail.id)
        .await?
        .data
        .unwrap();
    assert_eq!(orphan_detail.supplier_id, None);
    assert_eq!(orphan_detail.supplier_name, None);

    // Accounts
    if std::env::var("JWT_SECRET").is_err() {
        // SAFETY: this test binary runs a single test.
        unsafe { std::env::set_var("JWT_SECRET", "commandes-flow-secret") };
    }
    let by_staff = auth_service::create_user(&state, &staff, vendeur()).await;
    assert!(matches!(by_staff, Err(AppError::Forbidden)));

    let vendeur_user = auth_service::create_user(&state, &admin, vendeur())
        .await?
        .data
        .unwrap();
    assert_eq!(vendeur_user.role, "staff");
    assert_eq!(vendeur_user.email, "vendeur@example.com");

    let taken = auth_service::create_user(&state, &admin, vendeur()).await;
    assert!(matches!(taken, Err(AppError::Conflict(_))));

    let login = auth_service::login_user(
        &state,
        LoginRequest {
            email: "Vendeur@Example.com".into(),
            password: "motdepasse".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(login.token.starts_with("Bearer "));

    let wrong = auth_service::login_user(
        &state,
        LoginRequest {
            email: "vendeur@example.com".into(),
            password: "mauvais-mot".into(),
        },
    )
    .await;
    assert!(matches!(wrong, Err(AppError::BadRequest(_))));

    // Home page singleton
    content_service::create_home_page(&state, &admin, home_page()).await?;
    let duplicate = content_service::create_home_page(&state, &admin, home_page()).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    let page = content_service::get_home_page(&state).await?.data.unwrap();
    assert_eq!(page.contact_message, "Contactez-nous");

    // Concurrent creates: the loser gets 409 whether the count check or the
    // unique index stops it.
    content_service::delete_home_page(&state, &admin).await?;
    let (first_page, second_page) = tokio::join!(
        content_service::create_home_page(&state, &admin, home_page()),
        content_service::create_home_page(&state, &admin, home_page()),
    );
    let created = [&first_page, &second_page].iter().filter(|r| r.is_ok()).count();
    let conflicts = [&first_page, &second_page]
        .iter()
        .filter(|r| matches!(r, Err(AppError::Conflict(_))))
        .count();
    assert_eq!((created, conflicts), (1, 1));

    // Deleting the product takes its commandes with it
    product_service::delete_product(&state, &admin, product.id).await?;
    let gone = commande_service::get_confirmation(&state, second.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    Ok(())
}

fn order(quantity: i32) -> PlaceCommandeRequest {
    PlaceCommandeRequest {
        quantity,
        customer_name: "Awa Ndiaye".into(),
        customer_email: "awa@example.com".into(),
        customer_phone: "770000000".into(),
        customer_address: "Dakar".into(),
        payment: PaymentMethod::Wave,
    }
}

fn vendeur() -> CreateUserRequest {
    CreateUserRequest {
        email: " Vendeur@example.com ".into(),
        password: "motdepasse".into(),
        role: Role::Staff,
    }
}

async fn create_product(
    state: &AppState,
    admin: &AuthUser,
    name: &str,
    quantity: i64,
    categories: Vec<Uuid>,
) -> anyhow::Result<storefront_api::models::Product> {
    let product = product_service::create_product(
        state,
        admin,
        CreateProductRequest {
            name: name.into(),
            price: 1500,
            quantity,
            description: None,
            image: None,
            categories,
            supplier_id: None,
        },
    )
    .await?
    .data
    .unwrap();
    Ok(product)
}

fn home_page() -> CreateHomePageRequest {
    CreateHomePageRequest {
        site_name: "Ma Boutique".into(),
        logo: "logos/logo.png".into(),
        welcome_titre: "Bienvenue".into(),
        welcome_message: None,
        action1_message: "Voir les produits".into(),
        action1_lien: "/produits".into(),
        action2_message: "Nous contacter".into(),
        action2_lien: "/contact".into(),
        contact_message: None,
        about_message: None,
        footer_message: None,
        footer_bouton_message: None,
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE commandes, product_categories, products, supplier_details, suppliers, \
         categories, home_slides, slides, home_pages, audit_logs, users CASCADE",
    ))
    .await?;

    let pool = create_pool(database_url, 5).await?;
    Ok(AppState::new(pool, orm))
}

async fn create_user(state: &AppState, role: &str, email: &str) -> anyhow::Result<AuthUser> {
    let user_id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, email, password_hash, role) VALUES ($1, $2, $3, $4)")
        .bind(user_id)
        .bind(email)
        .bind("dummy")
        .bind(role)
        .execute(&state.pool)
        .await?;

    Ok(AuthUser {
        user_id,
        role: role.into(),
    })
}
