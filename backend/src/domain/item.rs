//! Item data model for the sharing board.
//!
//! An [`Item`] is the only entity the board stores. Its lifecycle is
//! `Available` → `Claimed` → `Gone`, with the admin able to set any status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised while building items and their value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemValidationError {
    /// The title was empty once whitespace was trimmed.
    #[error("item title must not be empty")]
    EmptyTitle,
    /// The claimer note was empty once whitespace was trimmed.
    #[error("claimer information must not be empty")]
    EmptyClaimNote,
    /// The status string is not one of the known lifecycle states.
    #[error("unknown item status: {value}")]
    UnknownStatus { value: String },
}

/// Stable item identifier, generated once and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ItemId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Non-empty, trimmed item title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemTitle(String);

impl ItemTitle {
    /// Validate and construct a title.
    pub fn new(title: impl Into<String>) -> Result<Self, ItemValidationError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ItemValidationError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ItemTitle> for String {
    fn from(value: ItemTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for ItemTitle {
    type Error = ItemValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle state of an item.
///
/// The set is closed: storage and every inbound path reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Available,
    Claimed,
    Gone,
}

impl ItemStatus {
    /// Every status in display order.
    pub const ALL: [ItemStatus; 3] = [Self::Available, Self::Claimed, Self::Gone];

    /// Canonical text form, as stored and rendered.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Claimed => "Claimed",
            Self::Gone => "Gone",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ItemValidationError;

    /// Parse the exact, case-sensitive status name.
    ///
    /// # Examples
    /// ```
    /// use ubuntucycle::domain::ItemStatus;
    ///
    /// assert_eq!("Gone".parse::<ItemStatus>(), Ok(ItemStatus::Gone));
    /// assert!("gone".parse::<ItemStatus>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ItemValidationError::UnknownStatus {
                value: s.to_owned(),
            })
    }
}

/// Free-form note recording who claimed an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClaimNote(String);

impl ClaimNote {
    /// Validate and construct a note; blank input is rejected.
    pub fn new(note: impl Into<String>) -> Result<Self, ItemValidationError> {
        let note = note.into();
        if note.trim().is_empty() {
            return Err(ItemValidationError::EmptyClaimNote);
        }
        Ok(Self(note))
    }

    /// Interpret optional admin input, where blank means "clear the note".
    pub fn optional(note: Option<String>) -> Option<Self> {
        note.and_then(|value| Self::new(value).ok())
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ClaimNote> for String {
    fn from(value: ClaimNote) -> Self {
        value.0
    }
}

impl TryFrom<String> for ClaimNote {
    type Error = ItemValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Raw input for creating an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// Fully hydrated item state, as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: ItemId,
    pub title: ItemTitle,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub status: ItemStatus,
    pub claimed_by_note: Option<ClaimNote>,
    pub date_posted: DateTime<Utc>,
}

/// A listing on the board.
///
/// ## Invariants
/// - `title` is non-empty and trimmed.
/// - `description`, `category`, and `image_url` are never empty strings.
/// - `date_posted` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    title: ItemTitle,
    description: Option<String>,
    category: Option<String>,
    image_url: Option<String>,
    status: ItemStatus,
    claimed_by_note: Option<ClaimNote>,
    date_posted: DateTime<Utc>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl Item {
    /// Create a new `Available` item from a draft.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use ubuntucycle::domain::{Item, ItemDraft, ItemId, ItemStatus};
    ///
    /// let draft = ItemDraft { title: " Chair ".into(), description: Some(String::new()), ..ItemDraft::default() };
    /// let item = Item::create(ItemId::random(), draft, Utc::now()).expect("valid draft");
    /// assert_eq!(item.title().as_str(), "Chair");
    /// assert_eq!(item.status(), ItemStatus::Available);
    /// assert!(item.description().is_none());
    /// ```
    pub fn create(
        id: ItemId,
        draft: ItemDraft,
        date_posted: DateTime<Utc>,
    ) -> Result<Self, ItemValidationError> {
        let ItemDraft {
            title,
            description,
            category,
            image_url,
        } = draft;
        Ok(Self {
            id,
            title: ItemTitle::new(title)?,
            description: non_blank(description),
            category: non_blank(category),
            image_url: non_blank(image_url),
            status: ItemStatus::Available,
            claimed_by_note: None,
            date_posted,
        })
    }

    /// Rebuild an item from stored state.
    pub fn from_record(record: ItemRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: non_blank(record.description),
            category: non_blank(record.category),
            image_url: non_blank(record.image_url),
            status: record.status,
            claimed_by_note: record.claimed_by_note,
            date_posted: record.date_posted,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Validated, trimmed title.
    pub fn title(&self) -> &ItemTitle {
        &self.title
    }

    /// Free-text description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Category label, if any.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// URL of the hosted image, if any.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> ItemStatus {
        self.status
    }

    /// Note left by the claimer or the admin.
    pub fn claimed_by_note(&self) -> Option<&ClaimNote> {
        self.claimed_by_note.as_ref()
    }

    /// Creation time; the board sorts on it.
    pub fn date_posted(&self) -> DateTime<Utc> {
        self.date_posted
    }

    /// Public claim transition; only permitted while `Available`.
    ///
    /// Returns the current status as the error when the item is taken.
    pub fn claim(&mut self, note: ClaimNote) -> Result<(), ItemStatus> {
        if self.status != ItemStatus::Available {
            return Err(self.status);
        }
        self.status = ItemStatus::Claimed;
        self.claimed_by_note = Some(note);
        Ok(())
    }

    /// Admin override; any status, note replaced (or cleared) unconditionally.
    pub fn override_status(&mut self, status: ItemStatus, note: Option<ClaimNote>) {
        self.status = status;
        self.claimed_by_note = note;
    }
}

/// Sort items newest first, breaking ties on the identifier (descending).
pub fn sort_newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| {
        b.date_posted
            .cmp(&a.date_posted)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Label used for items that carry no category.
pub const UNCATEGORISED_LABEL: &str = "No category";

/// Count of items in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: ItemStatus,
    pub count: usize,
}

/// Count of items sharing one category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Aggregate inventory report.
///
/// `by_status` always lists all three statuses in lifecycle order.
/// `by_category` is sorted by label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total: usize,
    pub by_status: Vec<StatusCount>,
    pub by_category: Vec<CategoryCount>,
}

impl InventorySummary {
    /// Tally the supplied items.
    pub fn from_items(items: &[Item]) -> Self {
        let by_status = ItemStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: items.iter().filter(|item| item.status == status).count(),
            })
            .collect();

        let mut categories = std::collections::BTreeMap::<&str, usize>::new();
        for item in items {
            let label = item.category().unwrap_or(UNCATEGORISED_LABEL);
            *categories.entry(label).or_default() += 1;
        }
        let by_category = categories
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_owned(),
                count,
            })
            .collect();

        Self {
            total: items.len(),
            by_status,
            by_category,
        }
    }

    /// Count for one status.
    pub fn count_for(&self, status: ItemStatus) -> usize {
        self.by_status
            .iter()
            .find(|entry| entry.status == status)
            .map_or(0, |entry| entry.count)
    }
}
