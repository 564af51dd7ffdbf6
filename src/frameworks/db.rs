use crate::frameworks::config;
use sqlx::{PgPool, postgres::PgPoolOptions};

// Build a small PostgreSQL pool for the account store.
pub async fn connect_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config::DB_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

// Create the users table if it is missing.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
    MIGRATOR.run(pool).await
}
