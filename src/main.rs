use std::sync::Arc;
use anyhow::Context;
use bb8_postgres::bb8::Pool;
use bb8_postgres::tokio_postgres::NoTls;
use bb8_postgres::PostgresConnectionManager;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;
use crate::config::Config;
use crate::controller::AppState;
use crate::repositories::postgres_repo::PostgresConnectionRepo;
use crate::service::TravelService;

pub mod config;
pub mod controller;
pub mod helpers;
pub mod models;
pub mod repositories;
pub mod service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    info!("Starting travel booking backend ({})", config.environment);

    let manager = PostgresConnectionManager::new(config.pg_config(), NoTls);
    let postgres_connection = Pool::builder()
        .max_size(config.postgres_pool_size)
        .build(manager)
        .await
        .context("Failed to build the postgres connection pool")?;

    repositories::migrations::run(&postgres_connection).await?;

    let travel_service = TravelService::new(Arc::new(PostgresConnectionRepo::new(postgres_connection)));
    controller::serve(
        AppState {
            travel_service: Arc::new(travel_service),
        },
        &config,
    )
    .await
}
