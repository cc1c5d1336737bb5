//! Handlers for `migrate` and `seed`.

use crate::adapter::inbound::cli::command::ConfigPathArg;
use crate::adapter::inbound::cli::{load_config, output};
use crate::application::seed::DEMO_PASSWORD;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::factory::persistence::{build_store, migrate, open_pool};

/// Execute `migrate`.
pub fn execute_migrate(args: &ConfigPathArg) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let pool = open_pool(&config.database)?;
    let applied = migrate(&pool)?;

    output::field("Database", &config.database.path);
    if applied == 0 {
        output::success("Schema is up to date");
    } else {
        output::success(&format!("Applied {applied} migration(s)"));
    }
    Ok(())
}

/// Execute `seed`.
pub async fn execute_seed(args: &ConfigPathArg) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let store = build_store(&config.database)?;
    let seeder = bootstrap::build_seeder(&config, store);

    let pb = output::spinner("Seeding demo data");
    let report = match seeder.run().await {
        Ok(report) => report,
        Err(e) => {
            output::spinner_fail(&pb, "Seeding failed");
            return Err(e);
        }
    };

    if report.is_empty() {
        output::spinner_success(&pb, "Demo data already present");
        return Ok(());
    }
    output::spinner_success(&pb, "Demo data loaded");
    output::field("Profiles", report.profiles);
    output::field("Courses", report.courses);
    output::field("Modules", report.modules);
    output::field("Pathways", report.pathways);
    output::field("Enrollments", report.enrollments);
    output::field("Certifications", report.certifications);
    output::field("Recommendations", report.recommendations);
    output::hint(&format!(
        "sign in as admin@example.com with password {DEMO_PASSWORD}"
    ));
    Ok(())
}
