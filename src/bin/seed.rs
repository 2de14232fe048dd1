use coffee_shop_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    models::Role,
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config).await?;
    run_migrations(&pool).await?;

    let admin_id = ensure_user(&pool, "admin", "admin@example.com", "admin12345", Role::Admin).await?;
    let customer_id =
        ensure_user(&pool, "customer", "customer@example.com", "customer12345", Role::Customer)
            .await?;
    seed_catalog(&pool).await?;
    seed_settings(&pool).await?;

    tracing::info!(%admin_id, %customer_id, "seed completed");
    Ok(())
}

async fn ensure_user(
    pool: &DbPool,
    username: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password.to_string()).await?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    tracing::info!(%email, %role, "ensured user");
    Ok(id)
}

async fn seed_catalog(pool: &DbPool) -> anyhow::Result<()> {
    let catalog: [(&str, &str, &[(&str, &str, i64)]); 3] = [
        (
            "Espresso Drinks",
            "Built on a double shot",
            &[
                ("Espresso", "Straight double shot", 300),
                ("Flat White", "Ristretto with velvety milk", 450),
                ("Cappuccino", "Equal parts espresso, milk and foam", 420),
            ],
        ),
        (
            "Brewed",
            "Filter and immersion coffee",
            &[
                ("Pour Over", "Single origin, hand poured", 500),
                ("Cold Brew", "Steeped for eighteen hours", 480),
            ],
        ),
        (
            "Beans",
            "Whole beans to take home",
            &[("House Blend 250g", "Chocolate and hazelnut notes", 1500)],
        ),
    ];

    for (category, description, coffees) in catalog {
        let (category_id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO categories (id, name, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE SET description = EXCLUDED.description
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(category)
        .bind(description)
        .fetch_one(pool)
        .await?;

        for &(name, desc, price) in coffees {
            let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM coffees WHERE name = $1")
                .bind(name)
                .fetch_optional(pool)
                .await?;
            if exists.is_some() {
                continue;
            }
            sqlx::query(
                r#"
                INSERT INTO coffees (id, category_id, name, description, price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(category_id)
            .bind(name)
            .bind(desc)
            .bind(price)
            .execute(pool)
            .await?;
        }
    }

    tracing::info!("seeded catalog");
    Ok(())
}

async fn seed_settings(pool: &DbPool) -> anyhow::Result<()> {
    let settings = [
        ("shop_name", "Ferris Coffee"),
        ("opening_hours", "Mon-Sat 07:00-18:00"),
        ("contact_email", "hello@example.com"),
    ];

    for (key, value) in settings {
        sqlx::query(
            r#"
            INSERT INTO shop_settings (setting_key, setting_value)
            VALUES ($1, $2)
            ON CONFLICT (setting_key) DO NOTHING
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
    }

    tracing::info!("seeded shop settings");
    Ok(())
}
