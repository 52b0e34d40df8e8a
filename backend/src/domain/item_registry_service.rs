//! Item registry domain service.
//!
//! Implements both driving ports over a single [`ItemRepository`]. The
//! repository owns the claim guard; this service validates input, stamps
//! creation time from the injected clock, and translates repository outcomes
//! into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    ClaimItemRequest, ClaimOutcome, CreateItemRequest, ItemRegistryCommand, ItemRegistryQuery,
    ItemRepository, ItemRepositoryError, SetItemStatusRequest,
};
use crate::domain::{ClaimNote, Error, InventorySummary, Item, ItemId};

/// Message returned when a claim hits an item that is no longer available.
pub const ITEM_UNAVAILABLE_MESSAGE: &str = "Item is not available for claiming";

/// Message returned for unknown item ids.
pub const ITEM_NOT_FOUND_MESSAGE: &str = "Item not found";

fn map_repository_error(error: ItemRepositoryError) -> Error {
    match error {
        ItemRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("item repository unavailable: {message}"))
        }
        ItemRepositoryError::Query { message } => {
            Error::internal(format!("item repository error: {message}"))
        }
    }
}

fn not_found(id: ItemId) -> Error {
    Error::not_found(ITEM_NOT_FOUND_MESSAGE)
        .with_details(serde_json::json!({ "itemId": id.to_string() }))
}

/// Item registry service implementing the command and query ports.
#[derive(Clone)]
pub struct ItemRegistryService<R> {
    item_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ItemRegistryService<R> {
    /// Create a registry over the repository, stamping items with `clock`.
    pub fn new(item_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { item_repo, clock }
    }
}

#[async_trait]
impl<R> ItemRegistryCommand for ItemRegistryService<R>
where
    R: ItemRepository,
{
    async fn create(&self, request: CreateItemRequest) -> Result<Item, Error> {
        let item = Item::create(ItemId::random(), request.into(), self.clock.utc()).map_err(
            |err| {
                Error::invalid_request(err.to_string())
                    .with_details(serde_json::json!({ "field": "title" }))
            },
        )?;

        self.item_repo
            .insert(&item)
            .await
            .map_err(map_repository_error)?;

        info!(item_id = %item.id(), title = item.title().as_str(), "item listed");
        Ok(item)
    }

    async fn claim(&self, request: ClaimItemRequest) -> Result<Item, Error> {
        let ClaimItemRequest {
            item_id,
            claimer_info,
        } = request;
        let note = ClaimNote::new(claimer_info).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(serde_json::json!({ "field": "claimer_info" }))
        })?;

        let outcome = self
            .item_repo
            .claim_if_available(&item_id, &note)
            .await
            .map_err(map_repository_error)?;

        match outcome {
            ClaimOutcome::Claimed(item) => {
                info!(item_id = %item_id, "item claimed");
                Ok(item)
            }
            ClaimOutcome::Unavailable(status) => {
                debug!(item_id = %item_id, status = %status, "claim refused");
                Err(Error::conflict(ITEM_UNAVAILABLE_MESSAGE).with_details(
                    serde_json::json!({ "itemId": item_id.to_string(), "status": status }),
                ))
            }
            ClaimOutcome::Missing => Err(not_found(item_id)),
        }
    }

    async fn admin_set_status(&self, request: SetItemStatusRequest) -> Result<Item, Error> {
        let SetItemStatusRequest {
            item_id,
            status,
            note,
        } = request;

        let updated = self
            .item_repo
            .override_status(&item_id, status, ClaimNote::optional(note))
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(item_id))?;

        info!(item_id = %item_id, status = %status, "item status overridden");
        Ok(updated)
    }
}

#[async_trait]
impl<R> ItemRegistryQuery for ItemRegistryService<R>
where
    R: ItemRepository,
{
    async fn list_all(&self) -> Result<Vec<Item>, Error> {
        let items = self
            .item_repo
            .list_newest_first()
            .await
            .map_err(map_repository_error)?;
        debug!(count = items.len(), "items listed");
        Ok(items)
    }

    async fn find(&self, item_id: ItemId) -> Result<Item, Error> {
        self.item_repo
            .find_by_id(&item_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(item_id))
    }

    async fn summarize(&self) -> Result<InventorySummary, Error> {
        let items = self.list_all().await?;
        Ok(InventorySummary::from_items(&items))
    }
}

#[cfg(test)]
#[path = "item_registry_service_tests.rs"]
mod tests;
