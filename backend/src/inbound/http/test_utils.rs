//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::TimeDelta;

use crate::Trace;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::test_support::FixtureClock;

/// In-memory state plus the clock driving it.
pub fn memory_state() -> (HttpState, Arc<FixtureClock>) {
    let clock = Arc::new(FixtureClock::default());
    (HttpState::in_memory(clock.clone()), clock)
}

/// Full API surface over `state`, wrapped in the trace middleware.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}

/// Step between creates so listings have a stable order.
pub const TICK: TimeDelta = TimeDelta::seconds(1);
