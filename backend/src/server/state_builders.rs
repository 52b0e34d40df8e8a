//! Builders for the HTTP state and the item store behind it.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;
use tracing::{info, warn};

use ubuntucycle::domain::ItemRegistryService;
use ubuntucycle::domain::ports::{ItemRegistryCommand, ItemRegistryQuery};
use ubuntucycle::inbound::http::state::HttpState;
use ubuntucycle::outbound::memory::InMemoryItemRepository;
use ubuntucycle::outbound::persistence::{DbPool, DieselItemRepository};
use ubuntucycle::outbound::rendering::TeraPageRenderer;

use super::ServerConfig;

type RegistryPorts = (Arc<dyn ItemRegistryCommand>, Arc<dyn ItemRegistryQuery>);

fn registry_over<R>(repo: R, clock: Arc<dyn Clock>) -> RegistryPorts
where
    R: ubuntucycle::domain::ports::ItemRepository + 'static,
{
    let service = Arc::new(ItemRegistryService::new(Arc::new(repo), clock));
    (service.clone(), service)
}

/// Pick the item store: PostgreSQL when a pool is configured, memory
/// otherwise.
fn build_registry(pool: Option<&DbPool>, clock: Arc<dyn Clock>) -> RegistryPorts {
    match pool {
        Some(pool) => {
            info!(store = "postgres", "item store selected");
            registry_over(DieselItemRepository::new(pool.clone()), clock)
        }
        None => {
            warn!(
                store = "memory",
                "no database URL configured; items will not survive a restart"
            );
            registry_over(InMemoryItemRepository::new(), clock)
        }
    }
}

/// Assemble handler state from the server configuration.
///
/// # Errors
///
/// Returns an error when the embedded page templates fail to compile.
pub(super) fn build_http_state(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> std::io::Result<web::Data<HttpState>> {
    let (items, items_query) = build_registry(config.db_pool.as_ref(), clock.clone());
    let pages = TeraPageRenderer::new()
        .map_err(|err| std::io::Error::other(format!("page templates invalid: {err}")))?;

    let mut state = HttpState::new(items, items_query, Arc::new(pages), clock);
    match &config.image_host {
        Some(host) => state = state.with_image_host(host.clone()),
        None => info!("image host not configured; uploads disabled"),
    }
    Ok(web::Data::new(state))
}
