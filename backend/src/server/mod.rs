//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::sync::Arc;

use actix_multipart::form::MultipartFormConfig;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use ubuntucycle::Trace;
#[cfg(debug_assertions)]
use ubuntucycle::doc::ApiDoc;
use ubuntucycle::inbound::http::admin::{add_item, update_status};
use ubuntucycle::inbound::http::claims::claim_item;
use ubuntucycle::inbound::http::health::{HealthState, live, ready};
use ubuntucycle::inbound::http::inventory::{item_summary, list_items};
use ubuntucycle::inbound::http::pages::{admin_board, public_board};
use ubuntucycle::inbound::http::state::HttpState;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    upload_limit_bytes: usize,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        upload_limit_bytes,
    } = deps;

    let uploads = MultipartFormConfig::default()
        .total_limit(upload_limit_bytes)
        .memory_limit(upload_limit_bytes);

    let api = web::scope("/api/v1")
        .service(list_items)
        .service(item_summary);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(uploads)
        .wrap(Trace)
        .service(api)
        .service(public_board)
        .service(admin_board)
        .service(claim_item)
        .service(add_item)
        .service(update_status)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the page templates fail to compile or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config, Arc::new(DefaultClock))?;
    let ServerConfig {
        bind_addr,
        upload_limit_bytes,
        db_pool: _,
        image_host: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            upload_limit_bytes,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! End-to-end checks through the fully wired application.

    use std::net::{Ipv4Addr, SocketAddr};

    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;
    use ubuntucycle::domain::TRACE_ID_HEADER;

    use super::*;

    fn deps() -> AppDependencies {
        let config = ServerConfig::new(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)), 1024 * 1024);
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&config, Arc::new(DefaultClock)).expect("state builds"),
            upload_limit_bytes: config.upload_limit_bytes,
        }
    }

    #[actix_web::test]
    async fn every_response_carries_a_trace_id() {
        let app = test::init_service(build_app(deps())).await;

        for uri in ["/", "/admin", "/api/v1/items", "/health/live"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert!(res.status().is_success(), "{uri} answered {}", res.status());
            assert!(res.headers().contains_key(TRACE_ID_HEADER), "{uri} lacks trace id");
        }
    }

    #[actix_web::test]
    async fn claim_on_unknown_item_reports_trace_id_in_body() {
        let app = test::init_service(build_app(deps())).await;
        let req = test::TestRequest::post()
            .uri("/items/not-an-id/claim")
            .insert_header(("content-type", "application/x-www-form-urlencoded"))
            .set_payload("claimer_info=Bob")
            .to_request();

        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("trace id header");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["traceId"], Value::String(header));
        assert_eq!(body["code"], Value::String("not_found".to_owned()));
    }
}
