//! JSON read API over the item registry.
//!
//! ```text
//! GET /api/v1/items
//! GET /api/v1/items/summary
//! ```

use actix_web::{get, web};

use crate::domain::{InventorySummary, Item};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, InventorySummarySchema, ItemSchema};
use crate::inbound::http::state::HttpState;

/// Every item, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/items",
    responses(
        (status = 200, description = "Items ordered newest first", body = [ItemSchema]),
        (status = 503, description = "Item store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/items")]
pub async fn list_items(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Item>>> {
    let items = state.items_query.list_all().await?;
    Ok(web::Json(items))
}

/// Inventory totals by status and by category.
#[utoipa::path(
    get,
    path = "/api/v1/items/summary",
    responses(
        (status = 200, description = "Inventory summary", body = InventorySummarySchema),
        (status = 503, description = "Item store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "summarizeItems"
)]
#[get("/items/summary")]
pub async fn item_summary(state: web::Data<HttpState>) -> ApiResult<web::Json<InventorySummary>> {
    let summary = state.items_query.summarize().await?;
    Ok(web::Json(summary))
}
