//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and per-connection
//! pragmas for SQLite databases.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Pool size used when none is configured.
pub const DEFAULT_POOL_SIZE: u32 = 8;

/// Applies pragmas to every connection handed out by the pool.
///
/// SQLite leaves foreign keys off per connection, so cascading deletes only
/// work if each pooled connection turns them on.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size.max(1))
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<usize> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(applied.len())
}

/// Switch a file-backed database to write-ahead logging.
///
/// # Errors
/// Returns an error if the pragma fails to apply.
pub fn enable_wal(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    conn.batch_execute("PRAGMA journal_mode = WAL;")
        .map_err(|e| Error::Database(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::prelude::*;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    #[derive(diesel::QueryableByName)]
    struct PragmaValue {
        #[diesel(sql_type = diesel::sql_types::Integer)]
        foreign_keys: i32,
    }

    fn file_pool(dir: &tempfile::TempDir) -> DbPool {
        let url = dir.path().join("learnhub.db").display().to_string();
        create_pool(&url, 4).unwrap()
    }

    #[test]
    fn create_pool_can_get_connection() {
        let pool = create_pool(":memory:", 1).unwrap();
        assert!(pool.get().is_ok());
    }

    #[test]
    fn zero_pool_size_is_clamped() {
        let pool = create_pool(":memory:", 0).unwrap();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn run_migrations_creates_tables() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir);
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();
        let tables: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        for expected in [
            "profiles",
            "courses",
            "course_modules",
            "enrollments",
            "certifications",
            "notifications",
            "quizzes",
            "quiz_attempts",
            "study_activities",
            "ai_tutor_sessions",
            "learning_pathways",
            "career_recommendations",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir);
        assert_eq!(run_migrations(&pool).unwrap(), 1);
        assert_eq!(run_migrations(&pool).unwrap(), 0);
    }

    #[test]
    fn every_connection_enforces_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir);

        let mut first = pool.get().unwrap();
        let mut second = pool.get().unwrap();
        for conn in [&mut first, &mut second] {
            let value: Vec<PragmaValue> = diesel::sql_query("PRAGMA foreign_keys")
                .load(&mut **conn)
                .unwrap();
            assert_eq!(value[0].foreign_keys, 1);
        }
    }

    #[test]
    fn enable_wal_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_pool(&dir);
        assert!(enable_wal(&pool).is_ok());
    }
}
