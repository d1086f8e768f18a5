mod analyze;
mod cli;
mod infra;
mod routes;
mod server;

use textrisk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
