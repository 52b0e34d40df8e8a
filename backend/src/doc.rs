//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the JSON endpoints (claim, item list, summary and
//! health probes) and the schema wrappers from
//! [`crate::inbound::http::schemas`]. The HTML pages and the admin form
//! posts are browser flows and stay out of the document.
//!
//! Swagger UI serves it in debug builds; `openapi-dump` prints it.

use utoipa::OpenApi;

use crate::inbound::http::claims::{ClaimForm, ClaimResponse};
use crate::inbound::http::schemas::{
    CategoryCountSchema, ErrorCodeSchema, ErrorSchema, InventorySummarySchema, ItemSchema,
    ItemStatusSchema, StatusCountSchema,
};

/// OpenAPI document for the board's JSON surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "UbuntuCycle item board API",
        description = "Claim endpoint, read-only item API and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::claims::claim_item,
        crate::inbound::http::inventory::list_items,
        crate::inbound::http::inventory::item_summary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ItemSchema,
        ItemStatusSchema,
        InventorySummarySchema,
        StatusCountSchema,
        CategoryCountSchema,
        ClaimForm,
        ClaimResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "items", description = "Item listing and claiming"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
