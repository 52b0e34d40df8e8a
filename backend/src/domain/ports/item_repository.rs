//! Port for item persistence.
//!
//! Adapters own writer serialisation: the claim guard runs as one
//! check-then-set unit inside the store, so two racing claims cannot both
//! succeed.

use async_trait::async_trait;

use crate::domain::{ClaimNote, Item, ItemId, ItemStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by item repository adapters.
    pub enum ItemRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "item repository query failed: {message}",
    }
}

/// Result of a guarded claim attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The item was `Available` and is now `Claimed`.
    Claimed(Item),
    /// The item exists but was not `Available`; nothing changed.
    Unavailable(ItemStatus),
    /// No item has the requested id.
    Missing,
}

/// Port for reading and mutating item records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a newly created item.
    async fn insert(&self, item: &Item) -> Result<(), ItemRepositoryError>;

    /// Return every item, newest `date_posted` first (ties by id, descending).
    async fn list_newest_first(&self) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Look up one item; `None` when the id is unknown.
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemRepositoryError>;

    /// Atomically move an `Available` item to `Claimed` with the note.
    async fn claim_if_available(
        &self,
        id: &ItemId,
        note: &ClaimNote,
    ) -> Result<ClaimOutcome, ItemRepositoryError>;

    /// Unconditionally set status and note; `None` when the id is unknown.
    async fn override_status(
        &self,
        id: &ItemId,
        status: ItemStatus,
        note: Option<ClaimNote>,
    ) -> Result<Option<Item>, ItemRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureItemRepository;

#[async_trait]
impl ItemRepository for FixtureItemRepository {
    async fn insert(&self, _item: &Item) -> Result<(), ItemRepositoryError> {
        Ok(())
    }

    async fn list_newest_first(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        Ok(None)
    }

    async fn claim_if_available(
        &self,
        _id: &ItemId,
        _note: &ClaimNote,
    ) -> Result<ClaimOutcome, ItemRepositoryError> {
        Ok(ClaimOutcome::Missing)
    }

    async fn override_status(
        &self,
        _id: &ItemId,
        _status: ItemStatus,
        _note: Option<ClaimNote>,
    ) -> Result<Option<Item>, ItemRepositoryError> {
        Ok(None)
    }
}
