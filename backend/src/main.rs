//! Backend entry-point: loads settings, prepares the stores, and serves the
//! REST endpoints with their OpenAPI docs.

mod server;

use std::time::Duration;

use actix_web::web;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::cache::{CachePool, CachePoolConfig};
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, ServerSettings, create_server, drain_on_shutdown};

const MIGRATION_ATTEMPTS: u32 = 30;
const MIGRATION_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Apply migrations, retrying while the database is still starting.
async fn migrate_with_retry(database_url: &str) -> std::io::Result<()> {
    let mut attempt = 1;
    loop {
        match run_pending_migrations(database_url).await {
            Ok(()) => return Ok(()),
            Err(err) if attempt < MIGRATION_ATTEMPTS => {
                warn!(error = %err, attempt, "database not ready; retrying migrations");
                attempt += 1;
                tokio::time::sleep(MIGRATION_RETRY_DELAY).await;
            }
            Err(err) => {
                error!(error = %err, "giving up on database migrations");
                return Err(std::io::Error::other(err));
            }
        }
    }
}

async fn build_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mode = settings.create_user_errors().map_err(std::io::Error::other)?;
    let config = ServerConfig::new(bind_addr).with_create_user_errors(mode);

    if settings.in_memory {
        info!("running on in-memory adapters");
        return Ok(config);
    }

    let database_url = settings.database_url();
    migrate_with_retry(&database_url).await?;

    let mut pool_config = PoolConfig::new(database_url).with_min_idle(settings.db_min_idle);
    if let Some(max) = settings.db_max_connections {
        pool_config = pool_config.with_max_size(max);
    }
    let db_pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;

    let mut cache_config = CachePoolConfig::new(settings.redis_url());
    if let Some(max) = settings.cache_max_connections {
        cache_config = cache_config.with_max_size(max);
    }
    let cache_pool = CachePool::new(cache_config)
        .await
        .map_err(std::io::Error::other)?;

    Ok(config.with_db_pool(db_pool).with_cache_pool(cache_pool))
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::from_env().map_err(std::io::Error::other)?;
    let config = build_config(&settings).await?;
    let bind_addr = config.bind_addr;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");

    actix_web::rt::spawn(drain_on_shutdown(
        health_state,
        server.handle(),
        settings.shutdown_grace(),
        shutdown_signal(),
    ));

    server.await
}
