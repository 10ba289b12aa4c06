use adoptify_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    services::auth_service::hash_password,
};
use sqlx::PgPool;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url, 1).await?;
    run_migrations(&orm).await?;
    let pool = orm.get_postgres_connection_pool();

    let admin_id = ensure_user(pool, "admin", "admin@example.com", "admin123", "admin").await?;
    let user_id = ensure_user(pool, "adopter", "adopter@example.com", "adopter123", "user").await?;
    let shelter_id = ensure_shelter(pool, admin_id).await?;
    seed_pets(pool, shelter_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}, Shelter ID: {shelter_id}");
    Ok(())
}

async fn ensure_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, password_hash, first_name, last_name, role)
        VALUES ($1, $2, $3, $4, $5, 'Demo', $6)
        ON CONFLICT (username) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(username)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    let user_id = match row {
        Some((id,)) => {
            sqlx::query("INSERT INTO user_profiles (id, user_id) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING")
                .bind(Uuid::new_v4())
                .bind(id)
                .execute(pool)
                .await?;
            id
        }
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE username = $1")
                .bind(username)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {username} (role={role})");
    Ok(user_id)
}

async fn ensure_shelter(pool: &PgPool, admin_id: Uuid) -> anyhow::Result<Uuid> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO shelters (id, name, address, phone_number, website_url)
        VALUES ($1, 'Happy Tails Shelter', '12 Harbour Road', '5550100', 'https://happytails.example.com')
        ON CONFLICT (name) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .fetch_optional(pool)
    .await?;

    let shelter_id = match row {
        Some((id,)) => {
            sqlx::query(
                "INSERT INTO shelter_managements (id, shelter_id, admin_user_id, start_date) VALUES ($1, $2, $3, CURRENT_DATE)",
            )
            .bind(Uuid::new_v4())
            .bind(id)
            .bind(admin_id)
            .execute(pool)
            .await?;
            id
        }
        None => {
            let existing: (Uuid,) =
                sqlx::query_as("SELECT id FROM shelters WHERE name = 'Happy Tails Shelter'")
                    .fetch_one(pool)
                    .await?;
            existing.0
        }
    };

    println!("Ensured shelter {shelter_id}");
    Ok(shelter_id)
}

async fn seed_pets(pool: &PgPool, shelter_id: Uuid) -> anyhow::Result<()> {
    let pets = vec![
        ("Biscuit", 3, "Male", true, "Dog"),
        ("Mochi", 2, "Female", true, "Cat"),
        ("Kiwi", 1, "Male", false, "Bird"),
        ("Clover", 4, "Female", true, "Rabbit"),
    ];

    for (name, age, gender, domesticated, pet_type) in pets {
        sqlx::query(
            r#"
            INSERT INTO pets (id, shelter_id, name, age, gender, domesticated, pet_type)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE NOT EXISTS (SELECT 1 FROM pets WHERE shelter_id = $2 AND name = $3)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shelter_id)
        .bind(name)
        .bind(age)
        .bind(gender)
        .bind(domesticated)
        .bind(pet_type)
        .execute(pool)
        .await?;
    }

    println!("Seeded pets");
    Ok(())
}
