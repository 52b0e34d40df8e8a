//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Item, ItemDraft, ItemId, ItemRegistryService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryItemRepository;
use crate::outbound::rendering::TeraPageRenderer;

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Instant used by every handler test.
pub fn board_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Available item posted `days_ago` days before [`board_now`].
pub fn listed_item(title: &str, category: Option<&str>, days_ago: i64) -> Item {
    Item::create(
        ItemId::random(),
        ItemDraft {
            title: title.to_owned(),
            category: category.map(str::to_owned),
            ..ItemDraft::default()
        },
        board_now() - Duration::days(days_ago),
    )
    .expect("valid fixture item")
}

/// HTTP state wired to the real registry over an in-memory store.
///
/// Returns the store as well so tests can inspect it after a request.
pub fn board_state(items: Vec<Item>) -> (HttpState, Arc<InMemoryItemRepository>) {
    let repo = Arc::new(InMemoryItemRepository::with_items(items));
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(board_now()));
    let registry = Arc::new(ItemRegistryService::new(repo.clone(), clock.clone()));
    let pages = Arc::new(TeraPageRenderer::new().expect("templates compile"));
    let state = HttpState::new(registry.clone(), registry, pages, clock);
    (state, repo)
}
