//! Shared fixtures for service unit tests.

use std::sync::Arc;

use chrono::Utc;

use diesel::RunQueryDsl;

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::adapter::outbound::sqlite::SqliteStore;
use crate::domain::course::{Course, CourseDraft};
use crate::domain::id::ProfileId;
use crate::domain::profile::{Profile, Role};
use crate::port::outbound::store::{AccountStore, CatalogStore};

/// A migrated SQLite store in a temporary directory.
pub struct TestStore {
    _dir: tempfile::TempDir,
    pool: DbPool,
    store: Arc<SqliteStore>,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("test.db").display().to_string();
        let pool = create_pool(&url, 4).unwrap();
        run_migrations(&pool).unwrap();
        Self {
            _dir: dir,
            store: Arc::new(SqliteStore::new(pool.clone())),
            pool,
        }
    }

    /// Run raw SQL against the database, e.g. to install a failing trigger.
    pub fn exec(&self, sql: &str) {
        let mut conn = self.pool.get().unwrap();
        diesel::sql_query(sql).execute(&mut conn).unwrap();
    }

    pub fn arc(&self) -> Arc<SqliteStore> {
        Arc::clone(&self.store)
    }

    pub async fn profile(&self, email: &str, role: Role) -> Profile {
        let profile = Profile::new(email, "Test User", role, Utc::now()).unwrap();
        self.store.insert_account(&profile, "unused").await.unwrap();
        profile
    }

    pub async fn course(&self, title: &str, category: &str, difficulty: &str) -> Course {
        let mut course = CourseDraft {
            title: title.into(),
            description: format!("All about {title}."),
            category: category.into(),
            difficulty: difficulty.into(),
            duration_hours: 10.0,
            tags: Vec::new(),
        }
        .into_course(ProfileId::new(), "Staff".into(), Utc::now())
        .unwrap();
        course.instructor_id = None;
        course.instructor_name = None;
        self.store.insert_course(&course).await.unwrap();
        course
    }
}
