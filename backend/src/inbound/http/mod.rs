//! HTTP inbound adapter exposing REST endpoints.

use actix_web::{HttpResponse, Scope, web};

use crate::domain::Error;

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod topics;
pub mod validation;
pub mod votes;

pub use error::ApiResult;

/// Message returned for requests that match no route.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Recurso não encontrado.";

/// Scope mounting every voting endpoint under `/api/v1`.
///
/// JSON and query extraction failures are rendered with the shared error
/// body.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
        .service(topics::create_topic)
        .service(topics::list_topics)
        .service(topics::get_topic)
        .service(topics::start_voting_session)
        .service(votes::vote_by_topic)
        .service(votes::vote_by_session)
        .service(votes::topic_results)
}

/// Fallback for unmatched routes.
pub async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found(ROUTE_NOT_FOUND_MESSAGE))
}
