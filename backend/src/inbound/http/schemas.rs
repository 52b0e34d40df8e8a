//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and are registered with utoipa
//! under the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested item does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The item is not in a state that allows the operation.
    #[schema(rename = "conflict")]
    Conflict,
    /// The item store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Item not found")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ItemStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ItemStatus)]
pub enum ItemStatusSchema {
    Available,
    Claimed,
    Gone,
}

/// OpenAPI schema for [`crate::domain::Item`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Item, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ItemSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Wooden chair")]
    title: String,
    description: Option<String>,
    #[schema(example = "Furniture")]
    category: Option<String>,
    image_url: Option<String>,
    status: ItemStatusSchema,
    /// Note left by the claimer or the administrator.
    claimed_by_note: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    date_posted: String,
}

/// OpenAPI schema for [`crate::domain::StatusCount`].
#[derive(ToSchema)]
#[schema(as = crate::domain::StatusCount)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StatusCountSchema {
    status: ItemStatusSchema,
    count: u64,
}

/// OpenAPI schema for [`crate::domain::CategoryCount`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CategoryCount)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CategoryCountSchema {
    /// Category label, or "No category" for items without one.
    category: String,
    count: u64,
}

/// OpenAPI schema for [`crate::domain::InventorySummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::InventorySummary, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InventorySummarySchema {
    total: u64,
    /// One entry per status, in lifecycle order.
    by_status: Vec<StatusCountSchema>,
    /// One entry per category label, sorted by label.
    by_category: Vec<CategoryCountSchema>,
}

#[cfg(test)]
mod tests {
    use utoipa::PartialSchema;

    use super::*;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_to_json::<ErrorSchema>().contains("traceId"));
    }

    #[test]
    fn item_schema_matches_wire_names() {
        assert_eq!(ItemSchema::name(), "crate.domain.Item");
        let schema_json = schema_to_json::<ItemSchema>();
        for field in ["imageUrl", "claimedByNote", "datePosted"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }

    #[test]
    fn summary_schema_matches_wire_names() {
        let schema_json = schema_to_json::<InventorySummarySchema>();
        assert!(schema_json.contains("byStatus"));
        assert!(schema_json.contains("byCategory"));
    }
}
