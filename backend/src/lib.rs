//! UbuntuCycle: a community item-sharing board.
//!
//! Visitors browse listed items and claim available ones; an administrator
//! adds listings and overrides their status. The crate is laid out as ports
//! and adapters: [`domain`] holds the item model and registry,
//! [`inbound`] the Actix handlers, [`outbound`] the store, image host and
//! page renderer adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
