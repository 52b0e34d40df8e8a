//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod image_host;
mod item_registry_command;
mod item_registry_query;
mod item_repository;
mod page_renderer;

#[cfg(test)]
pub use image_host::MockImageHost;
pub use image_host::{ImageHost, ImageHostError, ImageUpload};
#[cfg(test)]
pub use item_registry_command::MockItemRegistryCommand;
pub use item_registry_command::{
    ClaimItemRequest, CreateItemRequest, FixtureItemRegistryCommand, ItemRegistryCommand,
    SetItemStatusRequest,
};
#[cfg(test)]
pub use item_registry_query::MockItemRegistryQuery;
pub use item_registry_query::{FixtureItemRegistryQuery, ItemRegistryQuery};
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{
    ClaimOutcome, FixtureItemRepository, ItemRepository, ItemRepositoryError,
};
#[cfg(test)]
pub use page_renderer::MockPageRenderer;
pub use page_renderer::{BoardPage, FixturePageRenderer, PageRenderError, PageRenderer};
