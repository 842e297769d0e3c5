//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;
mod state_builders;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub(crate) use metrics::prometheus;
pub use settings::ServerSettings;

#[cfg(feature = "metrics")]
use metrics::OptionalMetrics;
use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};

use ballot_backend::Trace;
#[cfg(debug_assertions)]
use ballot_backend::doc::ApiDoc;
use ballot_backend::inbound::http::configure_api;
use ballot_backend::inbound::http::health::{HealthState, live, ready};
use ballot_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and return the running [`Server`].
///
/// Readiness flips once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let http_state = build_http_state(&config, &clock);
    let server_health_state = health_state.clone();

    #[cfg(feature = "metrics")]
    let metrics = OptionalMetrics::new(config.prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());
        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.clone());
        app
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;

    fn loopback() -> ServerConfig {
        ServerConfig::new(([127, 0, 0, 1], 0).into())
    }

    #[rstest]
    #[actix_rt::test]
    async fn create_server_marks_ready() {
        let health = web::Data::new(HealthState::new());
        assert!(!health.is_ready());

        let _server = create_server(health.clone(), loopback()).expect("server binds");

        assert!(health.is_ready());
    }

    #[cfg(feature = "metrics")]
    #[rstest]
    #[actix_rt::test]
    async fn create_server_accepts_metrics() {
        let health = web::Data::new(HealthState::new());
        let config = loopback().with_metrics(Some(prometheus().expect("registry builds")));

        let _server = create_server(health.clone(), config).expect("server binds");

        assert!(health.is_ready());
    }

    #[rstest]
    #[actix_web::test]
    async fn app_serves_probes_and_api_with_trace_header() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let state = build_http_state(&loopback(), &clock);
        let app = actix_test::init_service(build_app(health, state)).await;

        let ready_response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(ready_response.status(), StatusCode::OK);

        let users = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users").to_request(),
        )
        .await;
        assert_eq!(users.status(), StatusCode::OK);
        assert!(users.headers().contains_key("trace-id"));
    }
}
