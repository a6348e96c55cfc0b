//! Default seed script - creates a full generation run.
//!
//! Run with:
//! ```
//! SIGNUP_HOST_URL=http://localhost:8080 cargo run -p test-data --bin seed
//! ```
//!
//! Without `SIGNUP_HOST_URL` the run goes against an in-memory host, which
//! is useful for checking what a configuration would produce.

use test_data::builders::{ScenarioBuilder, ScenarioResult};
use test_data::prelude::{HttpHost, MemoryHost};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let builder = ScenarioBuilder::new();
    let mut rng = rand::thread_rng();

    let result = match std::env::var("SIGNUP_HOST_URL") {
        Ok(base_url) => {
            let host = HttpHost::new(&base_url);
            host.check_health().await?;
            tracing::info!("Connected to host at {}", base_url);
            builder.run(&host, &mut rng).await
        }
        Err(_) => {
            tracing::info!("SIGNUP_HOST_URL not set; running against an in-memory host");
            builder.run(&MemoryHost::new(), &mut rng).await
        }
    };

    report(&result);
    Ok(())
}

fn report(result: &ScenarioResult) {
    tracing::info!("Seed completed!");
    tracing::info!("  Users:   {}", result.summary.users);
    tracing::info!("  Sheets:  {}", result.summary.sheets);
    tracing::info!("  Tasks:   {}", result.summary.tasks);
    tracing::info!("  Signups: {}", result.summary.signups);

    for error in result.errors() {
        tracing::warn!("  {}", error);
    }
}
