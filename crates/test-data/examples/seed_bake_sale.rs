//! Example: Seed a small bake-sale scenario against an in-memory host.
//!
//! This shows what one generation run produces without touching a live
//! service:
//! - 8 test accounts across the volunteer roles
//! - 2 single-day bake-sale sheets with 2-5 tasks each
//! - Roughly half of every task's capacity filled with signups
//!
//! Run with:
//! ```
//! cargo run --example seed_bake_sale
//! ```

use test_data::builders::ScenarioBuilder;
use test_data::prelude::MemoryHost;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let host = MemoryHost::new();
    let mut rng = rand::thread_rng();

    let result = ScenarioBuilder::bake_sale_demo().run(&host, &mut rng).await;

    tracing::info!("Scenario complete!");
    tracing::info!("  Users:   {}", result.summary.users);
    tracing::info!("  Sheets:  {}", result.summary.sheets);
    tracing::info!("  Tasks:   {}", result.summary.tasks);
    tracing::info!("  Signups: {}", result.summary.signups);

    if let Some(sheets) = &result.sheets {
        for sheet in &sheets.sheets {
            tracing::info!(
                "  Sheet '{}' ({}): {} tasks",
                sheet.title,
                sheet.sheet_type,
                sheet.task_count
            );
        }
    }

    for error in result.errors() {
        tracing::warn!("  {}", error);
    }

    Ok(())
}
