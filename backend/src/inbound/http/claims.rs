//! Public claim endpoint.
//!
//! ```text
//! POST /items/{id}/claim   claimer_info=Bob%2C%20flat%204
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ClaimItemRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_item_id;

/// Message returned after a successful claim.
pub const CLAIM_SUCCESS_MESSAGE: &str = "Item claimed successfully";

/// Urlencoded claim form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ClaimForm {
    /// Free-text note identifying the claimer.
    #[serde(default)]
    pub claimer_info: String,
}

/// Body returned after a successful claim.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClaimResponse {
    #[schema(example = "Item claimed successfully")]
    pub message: String,
    #[schema(value_type = String, format = Uuid)]
    pub item_id: String,
}

/// Claim an available item.
#[utoipa::path(
    post,
    path = "/items/{id}/claim",
    params(("id" = String, Path, description = "Item identifier")),
    request_body(content = ClaimForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Item claimed", body = ClaimResponse),
        (status = 400, description = "Blank claimer info or item not available", body = ErrorSchema),
        (status = 404, description = "Item not found", body = ErrorSchema),
        (status = 503, description = "Item store unavailable", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "claimItem"
)]
#[post("/items/{id}/claim")]
pub async fn claim_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ClaimForm>,
) -> ApiResult<web::Json<ClaimResponse>> {
    let item_id = parse_item_id(&path.into_inner())?;
    let ClaimForm { claimer_info } = form.into_inner();

    let item = state
        .items
        .claim(ClaimItemRequest {
            item_id,
            claimer_info,
        })
        .await?;

    Ok(web::Json(ClaimResponse {
        message: CLAIM_SUCCESS_MESSAGE.to_owned(),
        item_id: item.id().to_string(),
    }))
}
