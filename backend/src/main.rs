//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ballot_backend::inbound::http::health::HealthState;
use ballot_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr).with_store_timeout(settings.store_timeout());
    if let Some(database_url) = settings.database_url.as_deref() {
        config = config.with_db_pool(connect(&settings, database_url).await?);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::prometheus()?));

    info!(%bind_addr, "starting server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

async fn connect(settings: &ServerSettings, database_url: &str) -> std::io::Result<DbPool> {
    if settings.run_migrations() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
    }
    DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(std::io::Error::other)
}
