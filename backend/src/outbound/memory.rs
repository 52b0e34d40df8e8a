//! In-process item store.
//!
//! Backs tests and the server when no database URL is configured. Every
//! mutation runs under the write lock, so the claim guard is a single
//! critical section.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ClaimOutcome, ItemRepository, ItemRepositoryError};
use crate::domain::{ClaimNote, Item, ItemId, ItemStatus, sort_newest_first};

/// Item repository held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    items: RwLock<HashMap<ItemId, Item>>,
}

impl InMemoryItemRepository {
    /// Build an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `items`.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let items = items.into_iter().map(|item| (item.id(), item)).collect();
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: &Item) -> Result<(), ItemRepositoryError> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id()) {
            return Err(ItemRepositoryError::query("item id already exists"));
        }
        items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn list_newest_first(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut listed: Vec<Item> = self.items.read().await.values().cloned().collect();
        sort_newest_first(&mut listed);
        Ok(listed)
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn claim_if_available(
        &self,
        id: &ItemId,
        note: &ClaimNote,
    ) -> Result<ClaimOutcome, ItemRepositoryError> {
        let mut items = self.items.write().await;
        let Some(item) = items.get_mut(id) else {
            return Ok(ClaimOutcome::Missing);
        };
        Ok(match item.claim(note.clone()) {
            Ok(()) => ClaimOutcome::Claimed(item.clone()),
            Err(status) => ClaimOutcome::Unavailable(status),
        })
    }

    async fn override_status(
        &self,
        id: &ItemId,
        status: ItemStatus,
        note: Option<ClaimNote>,
    ) -> Result<Option<Item>, ItemRepositoryError> {
        let mut items = self.items.write().await;
        Ok(items.get_mut(id).map(|item| {
            item.override_status(status, note);
            item.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ItemDraft;

    fn item(title: &str, minutes_ago: i64) -> Item {
        Item::create(
            ItemId::random(),
            ItemDraft {
                title: title.to_owned(),
                ..ItemDraft::default()
            },
            Utc::now() - Duration::minutes(minutes_ago),
        )
        .expect("valid item")
    }

    fn note(text: &str) -> ClaimNote {
        ClaimNote::new(text).expect("valid note")
    }

    #[fixture]
    fn chair() -> Item {
        item("Chair", 5)
    }

    #[rstest]
    #[tokio::test]
    async fn lists_newest_first() {
        let older = item("Older", 60);
        let newer = item("Newer", 1);
        let repo = InMemoryItemRepository::with_items([older.clone(), newer.clone()]);

        let listed = repo.list_newest_first().await.expect("list succeeds");

        assert_eq!(listed, vec![newer, older]);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_insert_is_rejected(chair: Item) {
        let repo = InMemoryItemRepository::new();
        repo.insert(&chair).await.expect("first insert succeeds");
        let error = repo.insert(&chair).await.expect_err("duplicate rejected");
        assert!(matches!(error, ItemRepositoryError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn second_claim_sees_claimed_status(chair: Item) {
        let id = chair.id();
        let repo = InMemoryItemRepository::with_items([chair]);

        let first = repo
            .claim_if_available(&id, &note("Bob"))
            .await
            .expect("claim runs");
        let second = repo
            .claim_if_available(&id, &note("Carol"))
            .await
            .expect("claim runs");

        assert!(matches!(first, ClaimOutcome::Claimed(ref item) if item.claimed_by_note() == Some(&note("Bob"))));
        assert_eq!(second, ClaimOutcome::Unavailable(ItemStatus::Claimed));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_id_is_missing() {
        let repo = InMemoryItemRepository::new();
        let outcome = repo
            .claim_if_available(&ItemId::random(), &note("Bob"))
            .await
            .expect("claim runs");
        assert_eq!(outcome, ClaimOutcome::Missing);

        let overridden = repo
            .override_status(&ItemId::random(), ItemStatus::Gone, None)
            .await
            .expect("override runs");
        assert!(overridden.is_none());

        let found = repo
            .find_by_id(&ItemId::random())
            .await
            .expect("lookup runs");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_id_returns_stored_item(chair: Item) {
        let repo = InMemoryItemRepository::with_items([chair.clone()]);
        let found = repo.find_by_id(&chair.id()).await.expect("lookup runs");
        assert_eq!(found, Some(chair));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_claims_have_exactly_one_winner(chair: Item) {
        const CLAIMERS: usize = 16;
        let id = chair.id();
        let repo = Arc::new(InMemoryItemRepository::with_items([chair]));

        let handles: Vec<_> = (0..CLAIMERS)
            .map(|n| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.claim_if_available(&id, &note(&format!("claimer {n}")))
                        .await
                        .expect("claim runs")
                })
            })
            .collect();

        let mut winners = 0;
        let mut refused = 0;
        for handle in handles {
            match handle.await.expect("task completes") {
                ClaimOutcome::Claimed(_) => winners += 1,
                ClaimOutcome::Unavailable(ItemStatus::Claimed) => refused += 1,
                other => panic!("unexpected outcome: {other:?}"),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(refused, CLAIMERS - 1);
        let stored = repo.list_newest_first().await.expect("list succeeds");
        assert_eq!(stored[0].status(), ItemStatus::Claimed);
    }
}
