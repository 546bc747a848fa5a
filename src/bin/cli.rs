use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trivia_api::db::{self, run_migrations};
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database url, e.g. sqlite:trivia.db
    database_url: String,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories and questions as csv into a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let pool = db::establish_connection(&cli.database_url)
        .await
        .context("Cannot connect to DB")?;
    run_migrations(&pool).await.context("Migrations failed")?;

    match cli.command {
        Commands::Export { path } => {
            db::transfer::export_data(&pool, &path)
                .await
                .context("Cannot export")?;
            tracing::info!("Exported data to {}", path.display());
        }
        Commands::Import { path } => {
            db::transfer::import_data(&pool, &path)
                .await
                .context("Cannot import")?;
            tracing::info!("Imported data from {}", path.display());
        }
    }
    Ok(())
}
