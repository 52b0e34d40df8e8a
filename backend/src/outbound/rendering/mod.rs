//! Tera-backed implementation of the `PageRenderer` port.
//!
//! Templates are compiled into the binary and auto-escaped, so item text
//! supplied by visitors or admins is never interpreted as markup.

use chrono::{DateTime, Utc};
use tera::{Context, Tera};

use crate::domain::ports::{BoardPage, PageRenderError, PageRenderer};
use crate::domain::{Item, ItemStatus};

const BASE_TEMPLATE: &str = include_str!("templates/base.html");
const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
const ADMIN_TEMPLATE: &str = include_str!("templates/admin.html");

/// Page renderer over the embedded board templates.
#[derive(Debug)]
pub struct TeraPageRenderer {
    tera: Tera,
}

impl TeraPageRenderer {
    /// Compile the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns `PageRenderError::Template` if a template fails to parse.
    pub fn new() -> Result<Self, PageRenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_templates(vec![
            ("base.html", BASE_TEMPLATE),
            ("index.html", INDEX_TEMPLATE),
            ("admin.html", ADMIN_TEMPLATE),
        ])
        .map_err(|err| PageRenderError::template(describe(&err)))?;
        Ok(Self { tera })
    }
}

fn template_name(page: BoardPage) -> &'static str {
    match page {
        BoardPage::Public => "index.html",
        BoardPage::Admin => "admin.html",
    }
}

/// Flatten Tera's nested error chain into one message.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl PageRenderer for TeraPageRenderer {
    fn render(
        &self,
        page: BoardPage,
        items: &[Item],
        now: DateTime<Utc>,
    ) -> Result<String, PageRenderError> {
        let mut context = Context::new();
        context.insert("items", items);
        context.insert("statuses", &ItemStatus::ALL);
        context.insert("now", &now);

        self.tera
            .render(template_name(page), &context)
            .map_err(|err| PageRenderError::template(describe(&err)))
    }
}
