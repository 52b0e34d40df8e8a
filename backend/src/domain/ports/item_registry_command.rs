//! Driving port for item registry mutations.
//!
//! Inbound adapters create listings, claim them on behalf of visitors, and
//! apply admin status overrides through this port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Item, ItemDraft, ItemId, ItemStatus};

/// Request to list a new item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl From<CreateItemRequest> for ItemDraft {
    fn from(value: CreateItemRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
            category: value.category,
            image_url: value.image_url,
        }
    }
}

/// Request to claim an item for a visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimItemRequest {
    pub item_id: ItemId,
    pub claimer_info: String,
}

/// Request to override an item's status from the admin panel.
///
/// A missing or blank `note` clears the stored claimer note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetItemStatusRequest {
    pub item_id: ItemId,
    pub status: ItemStatus,
    pub note: Option<String>,
}

/// Driving port for item registry write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRegistryCommand: Send + Sync {
    /// Create an `Available` item. A blank title yields `invalid_request`.
    async fn create(&self, request: CreateItemRequest) -> Result<Item, Error>;

    /// Claim an `Available` item.
    ///
    /// Unknown ids yield `not_found`; items in any other status yield
    /// `conflict` and stay untouched.
    async fn claim(&self, request: ClaimItemRequest) -> Result<Item, Error>;

    /// Set status and note regardless of the current status.
    async fn admin_set_status(&self, request: SetItemStatusRequest) -> Result<Item, Error>;
}

/// Fixture command that builds items without persisting them.
#[derive(Debug, Clone, Copy)]
pub struct FixtureItemRegistryCommand {
    now: DateTime<Utc>,
}

impl Default for FixtureItemRegistryCommand {
    fn default() -> Self {
        Self { now: Utc::now() }
    }
}

#[async_trait]
impl ItemRegistryCommand for FixtureItemRegistryCommand {
    async fn create(&self, request: CreateItemRequest) -> Result<Item, Error> {
        Item::create(ItemId::random(), request.into(), self.now)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn claim(&self, request: ClaimItemRequest) -> Result<Item, Error> {
        Err(Error::not_found(format!("item {} not found", request.item_id)))
    }

    async fn admin_set_status(&self, request: SetItemStatusRequest) -> Result<Item, Error> {
        Err(Error::not_found(format!("item {} not found", request.item_id)))
    }
}
