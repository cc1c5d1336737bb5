//! Persistence factory for the SQLite store.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::sqlite::database::connection::{
    create_pool, enable_wal, run_migrations, DbPool,
};
use crate::adapter::outbound::sqlite::SqliteStore;
use crate::error::Result;
use crate::infrastructure::config::database::DatabaseConfig;

/// Open the connection pool and switch the file to WAL.
pub fn open_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let pool = create_pool(&config.path, config.pool_size)?;
    enable_wal(&pool)?;
    Ok(pool)
}

/// Apply pending migrations. Returns how many ran.
pub fn migrate(pool: &DbPool) -> Result<usize> {
    let applied = run_migrations(pool)?;
    info!(applied, "Database migrations complete");
    Ok(applied)
}

/// Open, migrate and wrap the database in a store.
pub fn build_store(config: &DatabaseConfig) -> Result<Arc<SqliteStore>> {
    let pool = open_pool(config)?;
    migrate(&pool)?;
    Ok(Arc::new(SqliteStore::new(pool)))
}
