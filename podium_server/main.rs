use std::sync::Arc;

use podium_app::{app_bus::AppBus, config::Config};
use podium_core::{ApplicationError, Result};
use podium_db::{establish_connection_pool, uow::PostgresUnitOfWorkProvider};
use podium_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    setup_logging();
    let (config, app_bus) = setup_app().await?;
    let state = AppState::new(app_bus, &config)?;

    WebRouter::serve(state, config.port).await
}

async fn setup_app() -> Result<(Arc<Config>, Arc<AppBus>), ApplicationError> {
    let config = Arc::new(Config::from_env());
    let db_pool = establish_connection_pool().await?;

    sqlx::migrate!("../migrations")
        .run(&db_pool)
        .await
        .map_err(|e| ApplicationError::Unknown(e.to_string()))?;
    tracing::info!("Database migrations applied");

    let uow_provider = Arc::new(PostgresUnitOfWorkProvider::new(db_pool));
    let app_bus = Arc::new(AppBus::new(config.clone(), uow_provider));

    Ok((config, app_bus))
}
