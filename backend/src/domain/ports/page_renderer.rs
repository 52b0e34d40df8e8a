//! Port for turning item listings into HTML pages.

use chrono::{DateTime, Utc};

use crate::domain::Item;

use super::define_port_error;

define_port_error! {
    /// Errors raised while rendering a page.
    pub enum PageRenderError {
        /// The template failed to render.
        Template { message: String } => "page template failed to render: {message}",
    }
}

/// Which board page to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardPage {
    /// Visitor-facing list with claim forms.
    Public,
    /// Admin panel with the add form and status controls.
    Admin,
}

/// Port for rendering board pages.
///
/// Implementations receive the items in display order, the full status list,
/// and the current time.
#[cfg_attr(test, mockall::automock)]
pub trait PageRenderer: Send + Sync {
    fn render(
        &self,
        page: BoardPage,
        items: &[Item],
        now: DateTime<Utc>,
    ) -> Result<String, PageRenderError>;
}

/// Fixture renderer that lists item titles, one per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePageRenderer;

impl PageRenderer for FixturePageRenderer {
    fn render(
        &self,
        page: BoardPage,
        items: &[Item],
        _now: DateTime<Utc>,
    ) -> Result<String, PageRenderError> {
        let heading = match page {
            BoardPage::Public => "board",
            BoardPage::Admin => "admin",
        };
        let mut body = format!("{heading}\n");
        for item in items {
            body.push_str(item.title().as_str());
            body.push('\n');
        }
        Ok(body)
    }
}
