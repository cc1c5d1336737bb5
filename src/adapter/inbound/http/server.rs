//! Router assembly and the listener loop.

use axum::http::HeaderValue;
use axum::routing::{delete, get, post, put};
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handler::{
    account, admin, ai, career, course, dashboard, enrollment, notification, profile, system,
};
use super::state::AppState;
use crate::error::{ConfigError, Result};

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed browser origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "server.host",
            });
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}

const fn default_port() -> u16 {
    8000
}

/// CORS for the configured origins, or any origin when none are listed.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Every route of the API.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/auth/signup", post(account::sign_up))
        .route("/auth/signin", post(account::sign_in))
        .route("/auth/signout", post(account::sign_out))
        .route("/auth/password-reset", post(account::request_password_reset))
        .route(
            "/auth/password-reset/confirm",
            post(account::confirm_password_reset),
        )
        .route("/profile", get(profile::me).put(profile::update))
        .route("/admin/profiles", get(profile::list))
        .route("/admin/profiles/:id/role", put(profile::set_role))
        .route("/admin/overview", get(admin::overview))
        .route("/courses", get(course::list).post(course::create))
        .route("/courses/available", get(course::available))
        .route(
            "/courses/:id",
            get(course::get).put(course::update).delete(course::delete),
        )
        .route(
            "/courses/:id/modules",
            get(course::modules).post(course::add_module),
        )
        .route("/courses/:id/quizzes", get(course::quizzes))
        .route(
            "/enrollments",
            get(enrollment::list).post(enrollment::enroll),
        )
        .route("/enrollments/:id", delete(enrollment::unenroll))
        .route("/enrollments/:id/progress", put(enrollment::update_progress))
        .route(
            "/enrollments/:id/modules/:module_id/complete",
            post(enrollment::complete_module),
        )
        .route("/certifications", get(enrollment::certifications))
        .route(
            "/notifications",
            get(notification::list).post(notification::send),
        )
        .route("/notifications/read-all", put(notification::mark_all_read))
        .route("/notifications/:id/read", put(notification::mark_read))
        .route("/notifications/:id", delete(notification::delete))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/study-activity", post(dashboard::record_activity))
        .route("/ai/tutor", post(ai::tutor))
        .route("/ai/quiz", post(ai::generate_quiz))
        .route("/quizzes/:id", get(ai::quiz))
        .route("/quizzes/:id/attempts", post(ai::attempt))
        .route("/ai/research", post(ai::research))
        .route("/ai/research/guidance", post(ai::guidance))
        .route("/recommendations", get(career::recommendations))
        .route("/recommendations/saved", get(career::saved_recommendations))
        .route("/careers", get(career::list))
        .route("/careers/roadmap", get(career::roadmap))
        .route("/careers/:name", get(career::get))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

/// Serve until Ctrl-C.
pub async fn serve(app: Router, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
