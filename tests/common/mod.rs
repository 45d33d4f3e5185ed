//! Common test utilities

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Setup test database - connect and truncate the tables under test
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    // Clean up DB for fresh state
    sqlx::query("TRUNCATE TABLE entries, users CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}
