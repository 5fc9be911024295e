mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use inclusion_metrics::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
