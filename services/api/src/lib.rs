mod cli;
mod export;
mod infra;
mod routes;
mod server;

use district_stats::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
