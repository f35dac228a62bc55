//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::counter::increment_counter;
use super::health::health;
use super::state::HttpState;
use super::users::{create_user, list_users};
use super::{json_config, not_found};
use crate::Trace;

/// Build an app wired like the production server around `state`.
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
        .app_data(json_config())
        .wrap(Trace)
        .service(health)
        .service(create_user)
        .service(list_users)
        .service(increment_counter)
        .default_service(web::to(not_found))
}
