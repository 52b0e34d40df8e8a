//! Print every listed item and the inventory summary.
//!
//! # Examples
//! ```sh
//! DATABASE_URL=postgres://localhost/board cargo run --bin inspect-items
//! ```

use std::io::{self, Write};

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use ubuntucycle::domain::{InventorySummary, Item, UNCATEGORISED_LABEL};
use ubuntucycle::domain::ports::ItemRepository;
use ubuntucycle::outbound::persistence::{DbPool, DieselItemRepository, PoolConfig};
use ubuntucycle::settings::FALLBACK_DATABASE_URL_VAR;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;
const RULE_WIDTH: usize = 80;

/// `inspect-items` command arguments.
#[derive(Debug, Parser)]
#[command(name = "inspect-items", about = "Report the items on the board", version)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url", env = FALLBACK_DATABASE_URL_VAR)]
    database_url: Option<String>,
}

fn preview(description: Option<&str>) -> String {
    let text = description.unwrap_or_default();
    let mut shortened: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    if text.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        shortened.push_str("...");
    }
    shortened
}

fn write_item(out: &mut impl Write, item: &Item) -> io::Result<()> {
    writeln!(out, "Title: {}", item.title().as_str())?;
    writeln!(
        out,
        "Category: {}",
        item.category().unwrap_or(UNCATEGORISED_LABEL)
    )?;
    writeln!(out, "Status: {}", item.status())?;
    if let Some(note) = item.claimed_by_note() {
        writeln!(out, "Claimed by: {}", note.as_str())?;
    }
    writeln!(out, "Description: {}", preview(item.description()))?;
    writeln!(out, "Posted: {}", item.date_posted().format("%Y-%m-%d %H:%M"))?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn write_report(out: &mut impl Write, items: &[Item]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "No items found.");
    }

    writeln!(out, "Found {} items:\n", items.len())?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    for item in items {
        write_item(out, item)?;
    }

    let summary = InventorySummary::from_items(items);
    writeln!(out, "\nSummary by Status:")?;
    for entry in &summary.by_status {
        writeln!(out, "{}: {}", entry.status, entry.count)?;
    }
    writeln!(out, "\nSummary by Category:")?;
    for entry in &summary.by_category {
        writeln!(out, "{}: {}", entry.category, entry.count)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let url = args
        .database_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| eyre!("database URL missing: set --database-url or DATABASE_URL"))?;

    let pool = DbPool::new(PoolConfig::new(url))
        .await
        .wrap_err("create database pool")?;
    let items = DieselItemRepository::new(pool)
        .list_newest_first()
        .await
        .wrap_err("list items")?;

    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, &items)?;
    Ok(())
}
