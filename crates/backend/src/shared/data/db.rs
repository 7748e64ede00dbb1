use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

use crate::shared::config::DatabaseConfig;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Opens the read connection pool. The schema is owned by the data store;
/// nothing is created or migrated here.
pub async fn initialize_database(config: &DatabaseConfig) -> anyhow::Result<()> {
    let mut options = ConnectOptions::new(config.url.clone());
    options.sqlx_logging(false);

    tracing::info!("Connecting to {}", config.redacted_url());
    let conn = Database::connect(options).await?;
    tracing::info!(
        "Database connection ready ({:?})",
        conn.get_database_backend()
    );

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
