//! Test helpers for inbound HTTP components.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};

use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::{api_scope, route_not_found};
use crate::middleware::Trace;

/// Initialise the API with `ports`, wrapped in the tracing middleware.
pub(crate) async fn init_api(
    ports: HttpStatePorts,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(ports)))
            .wrap(Trace)
            .service(api_scope())
            .default_service(web::to(route_not_found)),
    )
    .await
}
