//! Server entry point: loads settings, prepares the item store and serves
//! the board.

mod server;

use std::ffi::OsString;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use ubuntucycle::inbound::http::health::HealthState;
use ubuntucycle::outbound::image_host::CloudinaryImageHost;
use ubuntucycle::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use ubuntucycle::settings::{ImageHostSettings, ServerSettings};

fn resolve_bind_addr(settings: &ServerSettings) -> std::io::Result<SocketAddr> {
    (settings.host(), settings.port())
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| {
            std::io::Error::other(format!(
                "no address resolved for {}:{}",
                settings.host(),
                settings.port()
            ))
        })
}

/// Apply migrations off the async runtime, then open the pool.
async fn prepare_database(settings: &ServerSettings, url: String) -> std::io::Result<DbPool> {
    let mut pool_config = PoolConfig::new(url.clone());
    if let Some(max_size) = settings.pool_max_size {
        pool_config = pool_config.with_max_size(max_size);
    }
    info!(database = %pool_config.redacted_url(), "preparing item store");

    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!(applied, "database migrations complete");

    DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))
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

    let server_settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("invalid server settings: {err}")))?;
    let image_settings = ImageHostSettings::load_from_iter([OsString::from("ubuntucycle")])
        .map_err(|err| std::io::Error::other(format!("invalid image host settings: {err}")))?;

    let bind_addr = resolve_bind_addr(&server_settings)?;
    let mut config = ServerConfig::new(bind_addr, server_settings.upload_limit_bytes());

    if let Some(url) = server_settings.database_url() {
        config = config.with_db_pool(prepare_database(&server_settings, url).await?);
    }

    if let Some(credentials) = image_settings.credentials() {
        let host = CloudinaryImageHost::new(
            credentials,
            image_settings.timeout(),
            Arc::new(DefaultClock),
        )
        .map_err(|err| std::io::Error::other(err.to_string()))?;
        config = config.with_image_host(Arc::new(host));
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting item board");
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
