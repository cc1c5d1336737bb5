//! Composition root: turns a [`Config`] into wired services.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::adapter::inbound::http::{self, AppState};
use crate::adapter::outbound::mailer::LogMailer;
use crate::adapter::outbound::sqlite::SqliteStore;
use crate::application::auth::AuthService;
use crate::application::seed::SeedService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::llm::build_llm_client;
use crate::infrastructure::factory::persistence::build_store;
use crate::port::outbound::mailer::Mailer;

/// Handler state over `store`, with the configured LLM (if any).
pub fn build_state(config: &Config, store: Arc<SqliteStore>, mailer: Arc<dyn Mailer>) -> AppState {
    AppState::new(
        store,
        mailer,
        build_llm_client(&config.llm),
        config.auth.policy(),
        config.tutor.clone(),
    )
}

/// A wired application.
pub struct App {
    pub router: Router,
    /// Provider answering tutor questions, or `"templates"`.
    pub tutor: &'static str,
}

/// Open the database, migrate it and assemble the router.
pub fn build_app(config: &Config) -> Result<App> {
    let store = build_store(&config.database)?;
    let state = build_state(config, store, Arc::new(LogMailer));
    let tutor = state.tutor.backend();
    info!(database = %config.database.path, tutor, "Application wired");
    Ok(App {
        router: http::router(state, &config.server.cors_origins),
        tutor,
    })
}

/// Demo-data seeder over `store`.
pub fn build_seeder(config: &Config, store: Arc<SqliteStore>) -> SeedService {
    let auth = Arc::new(AuthService::new(
        store.clone(),
        Arc::new(LogMailer),
        config.auth.policy(),
    ));
    SeedService::new(auth, store.clone(), store.clone(), store.clone(), store)
}
