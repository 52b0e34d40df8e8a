//! Admin panel form endpoints.
//!
//! ```text
//! POST /admin/items/add                   multipart: title, description, category, image
//! POST /admin/items/{id}/update_status    status=Gone&claimed_by_note=
//! ```
//!
//! Both endpoints answer `303 See Other` back to the admin panel so the
//! browser reloads the listing after a successful submit.

use actix_multipart::form::MultipartForm;
use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_web::http::header;
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::ItemTitle;
use crate::domain::ports::{CreateItemRequest, ImageUpload, SetItemStatusRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, missing_field_error, parse_item_id, parse_status,
};

const ADMIN_PATH: &str = "/admin";

/// Multipart form submitted by the admin add panel.
#[derive(MultipartForm)]
pub struct AddItemForm {
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub category: Option<Text<String>>,
    pub image: Option<Bytes>,
}

/// Urlencoded admin status form.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub claimed_by_note: Option<String>,
}

fn back_to_admin() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, ADMIN_PATH))
        .finish()
}

/// Upload once when a host is configured. Failures never block the listing.
async fn host_image(state: &HttpState, upload: ImageUpload) -> Option<String> {
    let Some(host) = state.image_host.as_ref() else {
        debug!(file_name = %upload.file_name, "image host not configured; skipping upload");
        return None;
    };
    match host.upload(upload).await {
        Ok(url) => Some(url),
        Err(error) => {
            warn!(%error, "image upload failed; listing item without image");
            None
        }
    }
}

/// Add a listing, optionally hosting an attached image first.
///
/// The title is checked before any upload so a rejected form never leaves an
/// orphaned image on the host.
#[post("/admin/items/add")]
pub async fn add_item(
    state: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<AddItemForm>,
) -> ApiResult<HttpResponse> {
    let AddItemForm {
        title,
        description,
        category,
        image,
    } = form;
    let title = title
        .map(Text::into_inner)
        .ok_or_else(|| missing_field_error(FieldName::new("title")))?;
    ItemTitle::new(title.as_str())
        .map_err(|err| invalid_field_error(FieldName::new("title"), &err))?;

    let upload = image.and_then(|file| {
        ImageUpload::from_parts(
            file.file_name,
            file.content_type.map(|mime| mime.to_string()),
            file.data.to_vec(),
        )
    });
    let image_url = match upload {
        Some(upload) => host_image(&state, upload).await,
        None => None,
    };

    state
        .items
        .create(CreateItemRequest {
            title,
            description: description.map(Text::into_inner),
            category: category.map(Text::into_inner),
            image_url,
        })
        .await?;

    Ok(back_to_admin())
}

/// Override an item's status and note.
///
/// Unknown items answer 404 before the submitted status is examined.
#[post("/admin/items/{id}/update_status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<StatusForm>,
) -> ApiResult<HttpResponse> {
    let item_id = parse_item_id(&path.into_inner())?;
    state.items_query.find(item_id).await?;
    let StatusForm {
        status,
        claimed_by_note,
    } = form.into_inner();
    let status = parse_status(&status, FieldName::new("status"))?;

    state
        .items
        .admin_set_status(SetItemStatusRequest {
            item_id,
            status,
            note: claimed_by_note,
        })
        .await?;

    Ok(back_to_admin())
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
