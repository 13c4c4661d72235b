mod config;
mod error;
mod host;
mod scheduler;

use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), error::AppError> {
    tracing_subscriber::fmt::init();

    if let Err(err) = dotenvy::dotenv() {
        tracing::debug!(%err, "no .env file loaded");
    }
    let cli = config::Cli::parse();

    // The engine is single-threaded; keep it and its scheduler on one LocalSet.
    let local = tokio::task::LocalSet::new();
    local.run_until(host::run(cli)).await
}
