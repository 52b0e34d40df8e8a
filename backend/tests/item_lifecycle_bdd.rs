//! Behaviour tests for the item lifecycle through the registry ports.

use std::sync::{Arc, Mutex};

use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;
use ubuntucycle::domain::ports::{
    ClaimItemRequest, CreateItemRequest, ItemRegistryCommand, ItemRegistryQuery,
    SetItemStatusRequest,
};
use ubuntucycle::domain::{
    ClaimNote, Error, ErrorCode, ITEM_UNAVAILABLE_MESSAGE, Item, ItemRegistryService, ItemStatus,
};
use ubuntucycle::outbound::memory::InMemoryItemRepository;

struct BoardWorld {
    runtime: Runtime,
    registry: ItemRegistryService<InMemoryItemRepository>,
    last_result: Option<Result<Item, Error>>,
}

impl std::fmt::Debug for BoardWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardWorld")
            .field("last_result", &self.last_result)
            .finish_non_exhaustive()
    }
}

impl BoardWorld {
    fn items(&self) -> Vec<Item> {
        self.runtime
            .block_on(self.registry.list_all())
            .expect("listing succeeds")
    }

    fn newest(&self) -> Item {
        self.items()
            .into_iter()
            .next()
            .expect("board holds at least one item")
    }

    fn create(&mut self, title: &str) {
        let result = self.runtime.block_on(self.registry.create(CreateItemRequest {
            title: title.to_owned(),
            ..CreateItemRequest::default()
        }));
        self.last_result = Some(result);
    }

    fn claim_newest(&mut self, claimer: &str) {
        let item_id = self.newest().id();
        let result = self.runtime.block_on(self.registry.claim(ClaimItemRequest {
            item_id,
            claimer_info: claimer.to_owned(),
        }));
        self.last_result = Some(result);
    }

    fn last_error(&self) -> &Error {
        match self.last_result.as_ref().expect("an operation ran") {
            Ok(item) => panic!("expected failure, got {item:?}"),
            Err(error) => error,
        }
    }
}

#[fixture]
fn world() -> Mutex<BoardWorld> {
    let runtime = Runtime::new().expect("tokio runtime");
    let registry = ItemRegistryService::new(
        Arc::new(InMemoryItemRepository::new()),
        Arc::new(DefaultClock),
    );
    Mutex::new(BoardWorld {
        runtime,
        registry,
        last_result: None,
    })
}

#[given("an empty item board")]
fn an_empty_item_board(world: &Mutex<BoardWorld>) {
    let world = world.lock().expect("world lock");
    assert!(world.items().is_empty());
}

#[given("a listed item already claimed by Bob")]
fn a_listed_item_already_claimed_by_bob(world: &Mutex<BoardWorld>) {
    let mut world = world.lock().expect("world lock");
    world.create("Camping stove");
    world.claim_newest("Bob");
    assert!(matches!(world.last_result, Some(Ok(_))));
}

#[when("the admin lists an item titled {title}")]
fn the_admin_lists_an_item_titled(world: &Mutex<BoardWorld>, title: String) {
    world.lock().expect("world lock").create(&title);
}

#[when("the admin lists an item with a blank title")]
fn the_admin_lists_an_item_with_a_blank_title(world: &Mutex<BoardWorld>) {
    world.lock().expect("world lock").create("   ");
}

#[when("a visitor claims the newest item as {claimer}")]
fn a_visitor_claims_the_newest_item(world: &Mutex<BoardWorld>, claimer: String) {
    world.lock().expect("world lock").claim_newest(&claimer);
}

#[when("the admin marks the newest item as Available with a blank note")]
fn the_admin_marks_the_newest_item_available(world: &Mutex<BoardWorld>) {
    let mut world = world.lock().expect("world lock");
    let item_id = world.newest().id();
    let result = world
        .runtime
        .block_on(world.registry.admin_set_status(SetItemStatusRequest {
            item_id,
            status: ItemStatus::Available,
            note: Some("  ".to_owned()),
        }));
    world.last_result = Some(result);
}

#[then("the board item count is {count}")]
fn the_board_item_count_is(world: &Mutex<BoardWorld>, count: usize) {
    assert_eq!(world.lock().expect("world lock").items().len(), count);
}

#[then("the newest item is available")]
fn the_newest_item_is_available(world: &Mutex<BoardWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.newest().status(), ItemStatus::Available);
}

#[then("the claim succeeds")]
fn the_claim_succeeds(world: &Mutex<BoardWorld>) {
    let world = world.lock().expect("world lock");
    let claimed = world
        .last_result
        .as_ref()
        .expect("claim ran")
        .as_ref()
        .expect("claim succeeded");
    assert_eq!(claimed.status(), ItemStatus::Claimed);
}

#[then("the newest item is claimed by {claimer}")]
fn the_newest_item_is_claimed_by(world: &Mutex<BoardWorld>, claimer: String) {
    let world = world.lock().expect("world lock");
    let newest = world.newest();
    assert_eq!(newest.status(), ItemStatus::Claimed);
    assert_eq!(
        newest.claimed_by_note().map(ClaimNote::as_str),
        Some(claimer.as_str())
    );
}

#[then("the claim is rejected as unavailable")]
fn the_claim_is_rejected_as_unavailable(world: &Mutex<BoardWorld>) {
    let world = world.lock().expect("world lock");
    let error = world.last_error();
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), ITEM_UNAVAILABLE_MESSAGE);
}

#[then("the newest item has no claim note")]
fn the_newest_item_has_no_claim_note(world: &Mutex<BoardWorld>) {
    let world = world.lock().expect("world lock");
    assert!(world.newest().claimed_by_note().is_none());
}

#[then("the request is rejected as invalid")]
fn the_request_is_rejected_as_invalid(world: &Mutex<BoardWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.last_error().code(), ErrorCode::InvalidRequest);
}

#[scenario(path = "tests/features/item_lifecycle.feature", index = 0)]
fn visitor_claims_new_item(world: Mutex<BoardWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/item_lifecycle.feature", index = 1)]
fn second_claim_is_refused(world: Mutex<BoardWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/item_lifecycle.feature", index = 2)]
fn admin_returns_item_to_board(world: Mutex<BoardWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/item_lifecycle.feature", index = 3)]
fn untitled_listing_is_rejected(world: Mutex<BoardWorld>) {
    drop(world);
}
