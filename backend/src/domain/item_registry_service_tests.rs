//! Tests for the item registry service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockItemRepository;
use crate::domain::{ErrorCode, ItemDraft, ItemStatus};

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[fixture]
fn clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

fn sample_item(title: &str) -> Item {
    Item::create(
        ItemId::random(),
        ItemDraft {
            title: title.to_owned(),
            ..ItemDraft::default()
        },
        fixture_timestamp(),
    )
    .expect("valid sample item")
}

fn service(repo: MockItemRepository, clock: Arc<dyn Clock>) -> ItemRegistryService<MockItemRepository> {
    ItemRegistryService::new(Arc::new(repo), clock)
}

#[rstest]
#[tokio::test]
async fn create_persists_available_item_stamped_by_clock(clock: Arc<dyn Clock>) {
    let mut repo = MockItemRepository::new();
    repo.expect_insert()
        .withf(|item| item.title().as_str() == "Chair" && item.status() == ItemStatus::Available)
        .times(1)
        .return_once(|_| Ok(()));

    let item = service(repo, clock)
        .create(CreateItemRequest {
            title: "Chair".to_owned(),
            category: Some(String::new()),
            ..CreateItemRequest::default()
        })
        .await
        .expect("create succeeds");

    assert_eq!(item.date_posted(), fixture_timestamp());
    assert_eq!(item.category(), None);
    assert!(item.claimed_by_note().is_none());
}

#[rstest]
#[tokio::test]
async fn create_rejects_blank_title_without_persisting(clock: Arc<dyn Clock>) {
    let mut repo = MockItemRepository::new();
    repo.expect_insert().times(0);

    let error = service(repo, clock)
        .create(CreateItemRequest {
            title: "   ".to_owned(),
            ..CreateItemRequest::default()
        })
        .await
        .expect_err("blank title rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn claim_returns_updated_item(clock: Arc<dyn Clock>) {
    let mut claimed = sample_item("Chair");
    let id = claimed.id();
    claimed
        .claim(ClaimNote::new("Bob").expect("valid note"))
        .expect("claimable");
    let expected = claimed.clone();

    let mut repo = MockItemRepository::new();
    repo.expect_claim_if_available()
        .withf(move |item_id, note| *item_id == id && note.as_str() == "Bob")
        .times(1)
        .return_once(move |_, _| Ok(ClaimOutcome::Claimed(claimed)));

    let item = service(repo, clock)
        .claim(ClaimItemRequest {
            item_id: id,
            claimer_info: "Bob".to_owned(),
        })
        .await
        .expect("claim succeeds");

    assert_eq!(item, expected);
}

#[rstest]
#[case(ItemStatus::Claimed)]
#[case(ItemStatus::Gone)]
#[tokio::test]
async fn claim_maps_unavailable_to_conflict(clock: Arc<dyn Clock>, #[case] status: ItemStatus) {
    let mut repo = MockItemRepository::new();
    repo.expect_claim_if_available()
        .times(1)
        .return_once(move |_, _| Ok(ClaimOutcome::Unavailable(status)));

    let error = service(repo, clock)
        .claim(ClaimItemRequest {
            item_id: ItemId::random(),
            claimer_info: "Carol".to_owned(),
        })
        .await
        .expect_err("unavailable item");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), ITEM_UNAVAILABLE_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn claim_maps_missing_to_not_found(clock: Arc<dyn Clock>) {
    let mut repo = MockItemRepository::new();
    repo.expect_claim_if_available()
        .times(1)
        .return_once(|_, _| Ok(ClaimOutcome::Missing));

    let error = service(repo, clock)
        .claim(ClaimItemRequest {
            item_id: ItemId::random(),
            claimer_info: "Dave".to_owned(),
        })
        .await
        .expect_err("missing item");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn claim_rejects_blank_claimer_before_touching_store(clock: Arc<dyn Clock>) {
    let mut repo = MockItemRepository::new();
    repo.expect_claim_if_available().times(0);

    let error = service(repo, clock)
        .claim(ClaimItemRequest {
            item_id: ItemId::random(),
            claimer_info: " ".to_owned(),
        })
        .await
        .expect_err("blank claimer rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn admin_set_status_clears_blank_note(clock: Arc<dyn Clock>) {
    let mut item = sample_item("Lamp");
    let id = item.id();
    item.override_status(ItemStatus::Gone, None);

    let mut repo = MockItemRepository::new();
    repo.expect_override_status()
        .withf(move |item_id, status, note| {
            *item_id == id && *status == ItemStatus::Gone && note.is_none()
        })
        .times(1)
        .return_once(move |_, _, _| Ok(Some(item)));

    let updated = service(repo, clock)
        .admin_set_status(SetItemStatusRequest {
            item_id: id,
            status: ItemStatus::Gone,
            note: Some("  ".to_owned()),
        })
        .await
        .expect("override succeeds");

    assert_eq!(updated.status(), ItemStatus::Gone);
}

#[rstest]
#[tokio::test]
async fn admin_set_status_reports_unknown_id(clock: Arc<dyn Clock>) {
    let mut repo = MockItemRepository::new();
    repo.expect_override_status()
        .times(1)
        .return_once(|_, _, _| Ok(None));

    let error = service(repo, clock)
        .admin_set_status(SetItemStatusRequest {
            item_id: ItemId::random(),
            status: ItemStatus::Available,
            note: None,
        })
        .await
        .expect_err("unknown id");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(ItemRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(ItemRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn list_all_maps_repository_errors(
    clock: Arc<dyn Clock>,
    #[case] repo_error: ItemRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockItemRepository::new();
    repo.expect_list_newest_first()
        .times(1)
        .return_once(move || Err(repo_error));

    let error = service(repo, clock)
        .list_all()
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn summarize_counts_listed_items(clock: Arc<dyn Clock>) {
    let mut gone = sample_item("Kettle");
    gone.override_status(ItemStatus::Gone, None);
    let items = vec![sample_item("Chair"), gone];

    let mut repo = MockItemRepository::new();
    repo.expect_list_newest_first()
        .times(1)
        .return_once(move || Ok(items));

    let summary = service(repo, clock)
        .summarize()
        .await
        .expect("summary succeeds");

    assert_eq!(summary.total, 2);
    assert_eq!(summary.count_for(ItemStatus::Available), 1);
    assert_eq!(summary.count_for(ItemStatus::Gone), 1);
}

#[rstest]
#[tokio::test]
async fn find_returns_stored_item(clock: Arc<dyn Clock>) {
    let stored = sample_item("Lamp");
    let id = stored.id();
    let expected = stored.clone();
    let mut repo = MockItemRepository::new();
    repo.expect_find_by_id()
        .withf(move |candidate| *candidate == id)
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let found = service(repo, clock).find(id).await.expect("item found");

    assert_eq!(found, expected);
}

#[rstest]
#[tokio::test]
async fn find_reports_unknown_item_as_not_found(clock: Arc<dyn Clock>) {
    let mut repo = MockItemRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));

    let error = service(repo, clock)
        .find(ItemId::random())
        .await
        .expect_err("unknown id");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), ITEM_NOT_FOUND_MESSAGE);
}
