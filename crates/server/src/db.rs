use algoarena_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::env;
use tracing::info;

pub async fn init_pool_and_migrate() -> anyhow::Result<DatabaseConnection> {
    let database_url =
        env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;

    connect_and_migrate(&database_url).await
}

/// Opens a pool for `database_url` and brings the schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    // Each in-memory sqlite connection is its own database.
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;

    Migrator::up(&db, None).await?;
    info!("database schema is up to date");

    Ok(db)
}
