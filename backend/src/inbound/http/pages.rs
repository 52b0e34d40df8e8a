//! HTML board pages.
//!
//! ```text
//! GET /       public board
//! GET /admin  admin panel
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::BoardPage;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

async fn render_board(state: &HttpState, page: BoardPage) -> ApiResult<HttpResponse> {
    let items = state.items_query.list_all().await?;
    let html = state
        .pages
        .render(page, &items, state.clock.utc())
        .map_err(|err| {
            error!(error = %err, ?page, "board page failed to render");
            Error::internal(err.to_string())
        })?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}

/// Public board listing every item newest first.
#[get("/")]
pub async fn public_board(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    render_board(&state, BoardPage::Public).await
}

/// Admin panel with the add form and per-item status controls.
#[get("/admin")]
pub async fn admin_board(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    render_board(&state, BoardPage::Admin).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    use super::*;
    use crate::domain::ports::{MockPageRenderer, PageRenderError};
    use crate::inbound::http::test_utils::{board_state, listed_item};

    async fn get_page(state: HttpState, uri: &str) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(public_board)
                .service(admin_board),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await
    }

    #[actix_web::test]
    async fn public_board_lists_newest_first() {
        let (state, _) = board_state(vec![
            listed_item("Old bookshelf", Some("Furniture"), 10),
            listed_item("New kettle", None, 1),
        ]);

        let res = get_page(state, "/").await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get("content-type")
                .and_then(|value| value.to_str().ok()),
            Some("text/html; charset=utf-8")
        );
        let html = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8 page");
        let newest = html.find("New kettle").expect("newest rendered");
        let oldest = html.find("Old bookshelf").expect("oldest rendered");
        assert!(newest < oldest);
    }

    #[actix_web::test]
    async fn admin_board_renders_status_controls() {
        let item = listed_item("Desk lamp", None, 2);
        let (state, _) = board_state(vec![item.clone()]);

        let res = get_page(state, "/admin").await;

        assert_eq!(res.status(), StatusCode::OK);
        let html = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8 page");
        assert!(html.contains(&format!("/admin/items/{}/update_status", item.id())));
    }

    #[actix_web::test]
    async fn render_failure_is_internal_error() {
        let (mut state, _) = board_state(Vec::new());
        let mut pages = MockPageRenderer::new();
        pages
            .expect_render()
            .returning(|_, _, _| Err(PageRenderError::template("missing block")));
        state.pages = Arc::new(pages);

        let res = get_page(state, "/").await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Error = test::read_body_json(res).await;
        assert_eq!(body.message(), "Internal server error");
    }
}
