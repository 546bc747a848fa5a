use anyhow::Context;
use clap::Parser;
use trivia_api::config::Settings;
use trivia_api::db::{self, run_migrations};
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Apply database migrations and exit
    #[clap(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;

    let pool = db::establish_connection(&settings.database_url)
        .await
        .with_context(|| format!("Cannot connect to {}", settings.database_url))?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool).await.context("Migrations failed")?;
    if cli.migrate_only {
        return Ok(());
    }

    run_server(pool, &settings.address()).await
}
