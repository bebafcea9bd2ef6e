mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use bggov_fiscal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
