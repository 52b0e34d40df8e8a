//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed item repository using Diesel ORM
//! - **memory**: in-process item repository for tests and database-less runs
//! - **image_host**: Cloudinary uploads over reqwest
//! - **rendering**: Tera HTML pages
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod image_host;
pub mod memory;
pub mod persistence;
pub mod rendering;
