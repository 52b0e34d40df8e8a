//! Driving port for item registry reads.

use async_trait::async_trait;

use crate::domain::{Error, InventorySummary, Item, ItemId};

/// Driving port for item registry read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRegistryQuery: Send + Sync {
    /// Every item, newest first.
    async fn list_all(&self) -> Result<Vec<Item>, Error>;

    /// One item by id; unknown ids yield `not_found`.
    async fn find(&self, item_id: ItemId) -> Result<Item, Error>;

    /// Inventory totals grouped by status and by category.
    async fn summarize(&self) -> Result<InventorySummary, Error>;
}

/// Fixture query over an empty board.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureItemRegistryQuery;

#[async_trait]
impl ItemRegistryQuery for FixtureItemRegistryQuery {
    async fn list_all(&self) -> Result<Vec<Item>, Error> {
        Ok(Vec::new())
    }

    async fn find(&self, item_id: ItemId) -> Result<Item, Error> {
        Err(Error::not_found(format!("item {item_id} not found")))
    }

    async fn summarize(&self) -> Result<InventorySummary, Error> {
        Ok(InventorySummary::from_items(&[]))
    }
}
