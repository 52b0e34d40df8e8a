//! PostgreSQL-backed `ItemRepository` implementation using Diesel ORM.
//!
//! The claim guard is a conditional `UPDATE ... WHERE status = 'Available'`
//! so PostgreSQL's row lock serialises racing claims. A follow-up lookup in
//! the same transaction distinguishes an unknown id from a taken item.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ClaimOutcome, ItemRepository, ItemRepositoryError};
use crate::domain::{ClaimNote, Item, ItemId, ItemRecord, ItemStatus, ItemTitle};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ItemRow, NewItemRow, StatusOverride};
use super::pool::DbPool;
use super::schema::items;

/// Diesel-backed implementation of the item repository port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Raw result of the claim transaction, before domain decoding.
enum ClaimRows {
    Claimed(ItemRow),
    Unavailable(String),
    Missing,
}

fn decode_status(raw: &str) -> Result<ItemStatus, ItemRepositoryError> {
    raw.parse::<ItemStatus>()
        .map_err(|err| ItemRepositoryError::query(err.to_string()))
}

/// Convert a database row into a validated domain item.
fn row_to_item(row: ItemRow) -> Result<Item, ItemRepositoryError> {
    let ItemRow {
        id,
        title,
        description,
        category,
        image_url,
        status,
        claimed_by_note,
        date_posted,
    } = row;

    let title = ItemTitle::new(title).map_err(|err| ItemRepositoryError::query(err.to_string()))?;
    Ok(Item::from_record(ItemRecord {
        id: ItemId::from(id),
        title,
        description,
        category,
        image_url,
        status: decode_status(&status)?,
        claimed_by_note: ClaimNote::optional(claimed_by_note),
        date_posted,
    }))
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn insert(&self, item: &Item) -> Result<(), ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewItemRow {
            id: *item.id().as_uuid(),
            title: item.title().as_str(),
            description: item.description(),
            category: item.category(),
            image_url: item.image_url(),
            status: item.status().as_str(),
            claimed_by_note: item.claimed_by_note().map(ClaimNote::as_str),
            date_posted: item.date_posted(),
        };

        diesel::insert_into(items::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_newest_first(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ItemRow> = items::table
            .order((items::date_posted.desc(), items::id.desc()))
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = items::table
            .find(*id.as_uuid())
            .select(ItemRow::as_select())
            .first::<ItemRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_item).transpose()
    }

    async fn claim_if_available(
        &self,
        id: &ItemId,
        note: &ClaimNote,
    ) -> Result<ClaimOutcome, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let item_id: Uuid = *id.as_uuid();
        let note = note.as_str().to_owned();

        let rows: ClaimRows = conn
            .transaction(move |conn| {
                async move {
                    let claimed = diesel::update(
                        items::table.filter(
                            items::id
                                .eq(item_id)
                                .and(items::status.eq(ItemStatus::Available.as_str())),
                        ),
                    )
                    .set((
                        items::status.eq(ItemStatus::Claimed.as_str()),
                        items::claimed_by_note.eq(Some(note)),
                    ))
                    .returning(ItemRow::as_returning())
                    .get_result::<ItemRow>(conn)
                    .await
                    .optional()?;

                    if let Some(row) = claimed {
                        return Ok(ClaimRows::Claimed(row));
                    }

                    let current = items::table
                        .filter(items::id.eq(item_id))
                        .select(items::status)
                        .first::<String>(conn)
                        .await
                        .optional()?;

                    Ok::<_, diesel::result::Error>(
                        current.map_or(ClaimRows::Missing, ClaimRows::Unavailable),
                    )
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match rows {
            ClaimRows::Claimed(row) => row_to_item(row).map(ClaimOutcome::Claimed),
            ClaimRows::Unavailable(status) => decode_status(&status).map(ClaimOutcome::Unavailable),
            ClaimRows::Missing => Ok(ClaimOutcome::Missing),
        }
    }

    async fn override_status(
        &self,
        id: &ItemId,
        status: ItemStatus,
        note: Option<ClaimNote>,
    ) -> Result<Option<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = StatusOverride {
            status: status.as_str(),
            claimed_by_note: note.as_ref().map(ClaimNote::as_str),
        };

        let row = diesel::update(items::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(ItemRow::as_returning())
            .get_result::<ItemRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_item).transpose()
    }
}
