use sqlx::PgPool;
use storefront_api::{
    config::AppConfig,
    db::create_pool,
    dto::content::{
        DEFAULT_ABOUT_MESSAGE, DEFAULT_CONTACT_MESSAGE, DEFAULT_FOOTER_BUTTON_MESSAGE,
        DEFAULT_FOOTER_MESSAGE, DEFAULT_WELCOME_MESSAGE,
    },
    services::auth_service::hash_password,
};
use uuid::Uuid;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin12345";
const STAFF_EMAIL: &str = "staff@example.com";
const STAFF_PASSWORD: &str = "staff12345";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, ADMIN_EMAIL, ADMIN_PASSWORD, "admin").await?;
    let staff_id = ensure_user(&pool, STAFF_EMAIL, STAFF_PASSWORD, "staff").await?;

    let supplier_id = seed_supplier(&pool).await?;
    seed_products(&pool, supplier_id).await?;
    seed_home_page(&pool).await?;
    seed_slides(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, Staff ID: {staff_id}");
    Ok(())
}

async fn ensure_user(pool: &PgPool, email: &str, password: &str, role: &str) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

/// Names are not unique in the schema, so look them up before inserting.
async fn find_by_name(pool: &PgPool, table: &str, name: &str) -> anyhow::Result<Option<Uuid>> {
    let sql = format!("SELECT id FROM {table} WHERE name = $1 LIMIT 1");
    let row: Option<(Uuid,)> = sqlx::query_as(&sql).bind(name).fetch_optional(pool).await?;
    Ok(row.map(|(id,)| id))
}

async fn ensure_category(pool: &PgPool, name: &str) -> anyhow::Result<Uuid> {
    if let Some(id) = find_by_name(pool, "categories", name).await? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(id)
}

async fn seed_supplier(pool: &PgPool) -> anyhow::Result<Uuid> {
    if let Some(id) = find_by_name(pool, "suppliers", "Sahel Distribution").await? {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO suppliers (id, name, phone) VALUES ($1, $2, $3)")
        .bind(id)
        .bind("Sahel Distribution")
        .bind("+221 33 800 00 00")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO supplier_details
            (id, supplier_id, address, contact_email, website, contact_person,
             supplier_type, country, payment_terms, region_served)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (supplier_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(id)
    .bind("12 avenue Cheikh Anta Diop, Dakar")
    .bind("contact@sahel-distribution.example")
    .bind("https://sahel-distribution.example")
    .bind("Awa Ndiaye")
    .bind("distributeur")
    .bind("Sénégal")
    .bind("30 jours")
    .bind("Afrique de l'Ouest")
    .execute(pool)
    .await?;

    println!("Seeded supplier");
    Ok(id)
}

async fn seed_products(pool: &PgPool, supplier_id: Uuid) -> anyhow::Result<()> {
    let products: [(&str, &str, i64, i64, &[&str]); 5] = [
        ("Chemise en wax", "Chemise coupe droite, coton imprimé", 2500, 40, &["Vêtements"]),
        ("Sac en cuir", "Sac à main cousu main", 4500, 12, &["Accessoires"]),
        ("Sandales tressées", "Sandales en cuir tressé", 1800, 3, &["Chaussures", "Accessoires"]),
        ("Boubou brodé", "Boubou brodé pour cérémonies", 6000, 8, &["Vêtements"]),
        ("Bracelet perles", "Bracelet en perles de verre", 500, 0, &["Accessoires"]),
    ];

    for (name, description, price, quantity, categories) in products {
        if find_by_name(pool, "products", name).await?.is_some() {
            continue;
        }

        let product_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, quantity, supplier_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product_id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(quantity)
        .bind(supplier_id)
        .execute(pool)
        .await?;

        for category in categories {
            let category_id = ensure_category(pool, category).await?;
            sqlx::query(
                "INSERT INTO product_categories (product_id, category_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(product_id)
            .bind(category_id)
            .execute(pool)
            .await?;
        }
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_home_page(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO home_pages
            (id, site_name, logo, welcome_titre, welcome_message,
             action1_message, action1_lien, action2_message, action2_lien,
             contact_message, about_message, footer_message, footer_bouton_message)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind("Ma Boutique")
    .bind("logos/logo.png")
    .bind("Bienvenue chez Ma Boutique")
    .bind(DEFAULT_WELCOME_MESSAGE)
    .bind("Voir les produits")
    .bind("/produits")
    .bind("Nous contacter")
    .bind("/contact")
    .bind(DEFAULT_CONTACT_MESSAGE)
    .bind(DEFAULT_ABOUT_MESSAGE)
    .bind(DEFAULT_FOOTER_MESSAGE)
    .bind(DEFAULT_FOOTER_BUTTON_MESSAGE)
    .execute(pool)
    .await?;

    println!("Seeded home page");
    Ok(())
}

async fn seed_slides(pool: &PgPool) -> anyhow::Result<()> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM home_slides")
        .fetch_one(pool)
        .await?;
    if existing == 0 {
        sqlx::query(
            r#"
            INSERT INTO home_slides (id, title, message, image, action_text, action_link)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind("Nouvelle collection")
        .bind("Découvrez nos pièces en wax")
        .bind("slides/collection.jpg")
        .bind("Découvrir")
        .bind("https://boutique.example/collection")
        .execute(pool)
        .await?;
    }

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM slides")
        .fetch_one(pool)
        .await?;
    if existing == 0 {
        for title in ["Livraison offerte dès 50 €", "Paiement Orange Money, MTN et Wave"] {
            sqlx::query("INSERT INTO slides (id, title) VALUES ($1, $2)")
                .bind(Uuid::new_v4())
                .bind(title)
                .execute(pool)
                .await?;
        }
    }

    println!("Seeded slides");
    Ok(())
}
