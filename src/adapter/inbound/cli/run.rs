//! Handler for the `serve` command.

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::{load_config, output};
use crate::adapter::inbound::http;
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Migrate, wire and serve until Ctrl-C.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let config = load_config(args.config.config.as_deref())?;
    config.init_logging();

    let addr = args
        .bind
        .clone()
        .unwrap_or_else(|| config.server.bind_addr());
    let app = bootstrap::build_app(&config)?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Listening", format!("http://{addr}"));
    output::field("Database", &config.database.path);
    output::field("Tutor", app.tutor);

    http::serve(app.router, &addr).await
}
