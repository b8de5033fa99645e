//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every voting endpoint plus the health probes
//! - **Schemas**: request/response DTOs and the shared [`ErrorBody`]
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::health::{ProbeBody, ProbeStatus, StorageKind};
use crate::inbound::http::schemas::{ErrorBody, FieldErrorBody};
use crate::inbound::http::topics::{
    CreateTopicBody, TopicListItem, TopicPageResponse, TopicResponse, VotingSessionResponse,
};
use crate::inbound::http::votes::{
    SessionStatusDto, SessionVotesResponse, TopicResultsResponse, VoteResponse, VoteResultDto,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Voting backend API",
        description = "Topics, voting sessions, votes and result tallies."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::topics::create_topic,
        crate::inbound::http::topics::list_topics,
        crate::inbound::http::topics::get_topic,
        crate::inbound::http::topics::start_voting_session,
        crate::inbound::http::votes::vote_by_topic,
        crate::inbound::http::votes::vote_by_session,
        crate::inbound::http::votes::topic_results,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateTopicBody,
        TopicResponse,
        TopicListItem,
        TopicPageResponse,
        VotingSessionResponse,
        VoteResponse,
        SessionVotesResponse,
        SessionStatusDto,
        VoteResultDto,
        TopicResultsResponse,
        ErrorBody,
        FieldErrorBody,
        ProbeBody,
        ProbeStatus,
        StorageKind
    )),
    tags(
        (name = "topics", description = "Topic management and voting sessions"),
        (name = "votes", description = "Vote casting and results"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
