//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{ImageHost, ItemRegistryCommand, ItemRegistryQuery, PageRenderer};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub items: Arc<dyn ItemRegistryCommand>,
    pub items_query: Arc<dyn ItemRegistryQuery>,
    pub pages: Arc<dyn PageRenderer>,
    /// Absent when no image host credentials are configured.
    pub image_host: Option<Arc<dyn ImageHost>>,
    /// Supplies the "now" shown on rendered pages.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Bundle the ports without an image host.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use ubuntucycle::domain::ports::{
    ///     FixtureItemRegistryCommand, FixtureItemRegistryQuery, FixturePageRenderer,
    /// };
    /// use ubuntucycle::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureItemRegistryCommand::default()),
    ///     Arc::new(FixtureItemRegistryQuery),
    ///     Arc::new(FixturePageRenderer),
    ///     Arc::new(DefaultClock),
    /// );
    /// assert!(state.image_host.is_none());
    /// ```
    pub fn new(
        items: Arc<dyn ItemRegistryCommand>,
        items_query: Arc<dyn ItemRegistryQuery>,
        pages: Arc<dyn PageRenderer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            items,
            items_query,
            pages,
            image_host: None,
            clock,
        }
    }

    /// Attach an image host for admin uploads.
    #[must_use]
    pub fn with_image_host(mut self, image_host: Arc<dyn ImageHost>) -> Self {
        self.image_host = Some(image_host);
        self
    }
}
