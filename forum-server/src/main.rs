use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::seeder::run_seeders;
use data::repositories::postgres::category_repository::PostgresCategoryRepository;
use data::repositories::postgres::role_repository::PostgresRoleRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url, settings.database_max_connections).await?;
    run_migrations(&pool).await?;
    seed(&pool).await?;

    let state = AppState::new(pool, &settings.jwt_secret, settings.jwt_ttl_seconds);
    server::run_http(&settings, state).await?;

    info!("server stopped");
    Ok(())
}

async fn seed(pool: &PgPool) -> Result<()> {
    let roles = PostgresRoleRepository::new(pool.clone());
    let categories = PostgresCategoryRepository::new(pool.clone());
    run_seeders(&roles, &categories)
        .await
        .context("failed to seed roles and categories")?;
    info!("seed data in place");
    Ok(())
}
