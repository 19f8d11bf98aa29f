mod cli;
mod infra;
mod routes;
mod seed;
mod server;

use stayfinder::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
