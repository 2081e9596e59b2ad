//! Backend entry-point: loads settings, prepares the user store, and serves
//! the exercise tracker API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use exercise_tracker::inbound::http::health::HealthState;
use exercise_tracker::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("invalid bind address: {e}"))
    })?;

    let mut config = ServerConfig::new(bind_addr);
    match settings.database_url() {
        Some(database_url) => {
            if settings.run_migrations {
                run_pending_migrations(database_url)
                    .await
                    .map_err(io::Error::other)?;
            }
            let pool = DbPool::new(
                PoolConfig::new(database_url).with_max_size(settings.db_max_connections),
            )
            .await
            .map_err(|e| io::Error::other(format!("database pool setup failed: {e}")))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database URL configured; users are kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "exercise tracker listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
