//! Demo listings for local development.
//!
//! Fills an empty store with a fixed catalogue of realistic items whose
//! posting dates are spread over the last thirty days.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use rand::Rng;
use thiserror::Error;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{
    ClaimNote, Item, ItemId, ItemRecord, ItemStatus, ItemTitle, ItemValidationError,
};

const MAX_DAYS_AGO: i64 = 30;
const MAX_HOURS_AGO: i64 = 23;

struct DemoEntry {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    status: ItemStatus,
    claimed_by_note: Option<&'static str>,
}

const fn available(
    title: &'static str,
    description: &'static str,
    category: &'static str,
) -> DemoEntry {
    DemoEntry {
        title,
        description,
        category,
        status: ItemStatus::Available,
        claimed_by_note: None,
    }
}

const CATALOGUE: [DemoEntry; 15] = [
    available(
        "Vintage Wooden Coffee Table",
        "Solid wood coffee table with minor scratches. 120cm x 60cm x 45cm.",
        "Furniture",
    ),
    available(
        "Children's Bicycle (Age 5-8)",
        "Red and blue kids bike with training wheels. Some rust on the chain but rides fine.",
        "Sports & Recreation",
    ),
    DemoEntry {
        title: "Set of 6 Dinner Plates",
        description: "White ceramic plates, barely used. One has a small chip.",
        category: "Kitchen & Dining",
        status: ItemStatus::Claimed,
        claimed_by_note: Some("Sarah M. - picking up this weekend"),
    },
    available(
        "HP Laptop (2019 Model)",
        "8GB RAM, 256GB SSD. Battery is tired but it works plugged in. Charger included.",
        "Electronics",
    ),
    available(
        "Garden Tools Set",
        "Spade, rake, hoe and hand trowel. Worn but all functional.",
        "Garden & Outdoor",
    ),
    DemoEntry {
        title: "Baby Stroller",
        description: "Lightweight stroller for infants to toddlers. Folds easily.",
        category: "Baby & Kids",
        status: ItemStatus::Gone,
        claimed_by_note: None,
    },
    available(
        "Stack of Programming Books",
        "Eight books on Python, JavaScript and web development. Some highlighting.",
        "Books & Media",
    ),
    available(
        "Winter Coat (Size M)",
        "Navy waterproof winter coat, size medium, in good condition.",
        "Clothing",
    ),
    DemoEntry {
        title: "Desk Lamp with LED Bulb",
        description: "Adjustable black metal desk lamp with an LED bulb.",
        category: "Home & Office",
        status: ItemStatus::Claimed,
        claimed_by_note: Some("Alex K. - will collect tomorrow evening"),
    },
    available(
        "Yoga Mat and Blocks",
        "Purple 6mm yoga mat with two foam blocks. Lightly used.",
        "Sports & Recreation",
    ),
    available(
        "Microwave Oven",
        "Samsung 800W microwave in full working order. Manual included.",
        "Appliances",
    ),
    available(
        "Potted Plants (3 varieties)",
        "Snake plant, pothos and rubber tree, pots included.",
        "Garden & Outdoor",
    ),
    DemoEntry {
        title: "Board Game Collection",
        description: "Monopoly, Scrabble, Risk, Catan and Ticket to Ride. All complete.",
        category: "Toys & Games",
        status: ItemStatus::Claimed,
        claimed_by_note: Some("The Johnson Family - picking up this Saturday"),
    },
    available(
        "Electric Kettle",
        "Stainless steel 1.7L kettle with automatic shut-off. Some limescale.",
        "Kitchen & Dining",
    ),
    available(
        "Acoustic Guitar",
        "Yamaha acoustic guitar with soft case. A few dings, sounds lovely.",
        "Musical Instruments",
    ),
];

/// Number of demo listings the seeder writes.
pub const DEMO_CATALOGUE_SIZE: usize = CATALOGUE.len();

/// Result of a seeding attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoSeedOutcome {
    /// The catalogue was written.
    Seeded { inserted: usize },
    /// The store already held items and the run was not forced.
    Skipped { existing: usize },
}

/// Errors raised while seeding demo listings.
#[derive(Debug, Error)]
pub enum DemoSeedingError {
    #[error("demo entry failed validation: {0}")]
    InvalidEntry(#[from] ItemValidationError),
    #[error("demo data persistence error: {0}")]
    Persistence(#[from] ItemRepositoryError),
}

/// Writes the demo catalogue through the item repository.
#[derive(Clone)]
pub struct DemoCatalogueSeeder<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> DemoCatalogueSeeder<R> {
    /// Seeder writing through `repository`, dating entries back from `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> DemoCatalogueSeeder<R>
where
    R: ItemRepository,
{
    /// Insert every demo listing unless the store is already populated.
    ///
    /// `force` seeds regardless of existing items.
    ///
    /// # Errors
    ///
    /// Returns [`DemoSeedingError`] when the store cannot be read or written.
    pub async fn seed(
        &self,
        rng: &mut impl Rng,
        force: bool,
    ) -> Result<DemoSeedOutcome, DemoSeedingError> {
        let existing = self.repository.list_newest_first().await?.len();
        if existing > 0 && !force {
            return Ok(DemoSeedOutcome::Skipped { existing });
        }

        let now = self.clock.utc();
        for entry in &CATALOGUE {
            let age = Duration::days(rng.gen_range(0..=MAX_DAYS_AGO))
                + Duration::hours(rng.gen_range(0..=MAX_HOURS_AGO));
            let item = demo_item(entry, now - age)?;
            self.repository.insert(&item).await?;
        }

        Ok(DemoSeedOutcome::Seeded {
            inserted: CATALOGUE.len(),
        })
    }
}

fn demo_item(
    entry: &DemoEntry,
    date_posted: chrono::DateTime<chrono::Utc>,
) -> Result<Item, ItemValidationError> {
    let claimed_by_note = entry.claimed_by_note.map(ClaimNote::new).transpose()?;
    Ok(Item::from_record(ItemRecord {
        id: ItemId::random(),
        title: ItemTitle::new(entry.title)?,
        description: Some(entry.description.to_owned()),
        category: Some(entry.category.to_owned()),
        image_url: None,
        status: entry.status,
        claimed_by_note,
        date_posted,
    }))
}
