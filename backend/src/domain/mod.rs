//! Domain primitives, ports, and services.
//!
//! Purpose: define the item entity and the registry behaviour used by the
//! HTTP adapters and the maintenance binaries. Keep types transport agnostic
//! and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-neutral failure payload.
//! - Item and its value types: the single listing entity.
//! - ItemRegistryService: implements the registry driving ports.
//! - DemoCatalogueSeeder: fills an empty store with demo listings.
//! - TraceId: request-scoped correlation identifier.

pub mod demo_catalogue;
pub mod error;
pub mod item;
mod item_registry_service;
pub mod ports;
pub mod trace_id;

pub use self::demo_catalogue::{
    DEMO_CATALOGUE_SIZE, DemoCatalogueSeeder, DemoSeedOutcome, DemoSeedingError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::item::{
    CategoryCount, ClaimNote, InventorySummary, Item, ItemDraft, ItemId, ItemRecord, ItemStatus,
    ItemTitle, ItemValidationError, StatusCount, UNCATEGORISED_LABEL, sort_newest_first,
};
pub use self::item_registry_service::{
    ITEM_NOT_FOUND_MESSAGE, ITEM_UNAVAILABLE_MESSAGE, ItemRegistryService,
};
pub use self::trace_id::TraceId;

