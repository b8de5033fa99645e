//! Topic HTTP handlers.
//!
//! ```text
//! POST /api/v1/topic
//! GET  /api/v1/topic/list?page&size&order&orderBy
//! GET  /api/v1/topic/{topicId}
//! POST /api/v1/topic/{topicId}/startVotingSession?durationInMinutes
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{CreateTopicRequest, StartSessionRequest};
use crate::domain::{
    FieldViolations, SessionDuration, Topic, TopicPage, TopicPageRequest, TopicSummary,
    VotingSession,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_integer_or, parse_uuid, record};

const TOPIC_ID: FieldName = FieldName::new("topicId");
const PAGE: FieldName = FieldName::new("page");
const SIZE: FieldName = FieldName::new("size");
const DURATION: FieldName = FieldName::new("durationInMinutes");

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_SIZE: i64 = 10;
const DEFAULT_ORDER: &str = "desc";
const DEFAULT_ORDER_BY: &str = "createdAt";

/// Request payload for creating a topic.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateTopicBody {
    /// Unique title, at most 50 characters.
    #[schema(example = "Reforma do estatuto")]
    pub title: Option<String>,
    /// Description, at most 500 characters.
    #[schema(example = "Votação sobre a reforma do estatuto da cooperativa")]
    pub description: Option<String>,
}

/// Topic as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicResponse {
    /// Topic identifier.
    pub uuid: Uuid,
    /// Unique title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Instant the topic was created.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<Topic> for TopicResponse {
    fn from(value: Topic) -> Self {
        Self {
            uuid: value.id,
            title: value.title,
            description: value.description,
            created_at: value.created_at,
        }
    }
}

/// Voting session as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VotingSessionResponse {
    /// Session identifier.
    pub uuid: Uuid,
    /// Instant the session opened.
    #[schema(value_type = String, format = DateTime)]
    pub start_time: DateTime<Utc>,
    /// Instant the session stops accepting votes.
    #[schema(value_type = String, format = DateTime)]
    pub end_time: DateTime<Utc>,
}

impl From<VotingSession> for VotingSessionResponse {
    fn from(value: VotingSession) -> Self {
        Self {
            uuid: value.id,
            start_time: value.start_time,
            end_time: value.end_time,
        }
    }
}

/// Listing row: a topic and its most recently started session, if any.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicListItem {
    /// Topic identifier.
    pub id: Uuid,
    /// Unique title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Instant the topic was created.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    /// Latest session, if any was started.
    pub session_id: Option<Uuid>,
    /// Start of the latest session.
    #[schema(value_type = Option<String>, format = DateTime)]
    pub session_start_time: Option<DateTime<Utc>>,
    /// End of the latest session.
    #[schema(value_type = Option<String>, format = DateTime)]
    pub session_end_time: Option<DateTime<Utc>>,
}

impl From<TopicSummary> for TopicListItem {
    fn from(value: TopicSummary) -> Self {
        let TopicSummary {
            topic,
            latest_session,
        } = value;
        Self {
            id: topic.id,
            title: topic.title,
            description: topic.description,
            created_at: topic.created_at,
            session_id: latest_session.map(|session| session.id),
            session_start_time: latest_session.map(|session| session.start_time),
            session_end_time: latest_session.map(|session| session.end_time),
        }
    }
}

/// One page of topics.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicPageResponse {
    /// Rows of this page.
    pub content: Vec<TopicListItem>,
    /// One-based page number.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Topics across all pages.
    pub total_elements: u64,
    /// Number of pages at this size.
    pub total_pages: u64,
}

impl From<TopicPage> for TopicPageResponse {
    fn from(value: TopicPage) -> Self {
        let total_pages = value.total_pages();
        Self {
            page: value.request.page(),
            size: value.request.size(),
            total_elements: value.total_elements,
            total_pages,
            content: value.content.into_iter().map(TopicListItem::from).collect(),
        }
    }
}

/// Raw paging parameters; parsed by [`parse_page_query`].
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TopicListQuery {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 10).
    pub size: Option<String>,
    /// `asc` or `desc` (default `desc`).
    pub order: Option<String>,
    /// `createdAt`, `title` or `description` (default `createdAt`).
    pub order_by: Option<String>,
}

/// Raw session parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StartSessionQuery {
    /// Session length in minutes (default 1).
    pub duration_in_minutes: Option<String>,
}

fn parse_page_query(query: &TopicListQuery) -> Result<TopicPageRequest, FieldViolations> {
    let mut violations = FieldViolations::default();
    let page = record(
        parse_integer_or(query.page.as_deref(), PAGE, DEFAULT_PAGE),
        &mut violations,
    );
    let size = record(
        parse_integer_or(query.size.as_deref(), SIZE, DEFAULT_SIZE),
        &mut violations,
    );
    let order = query.order.as_deref().unwrap_or(DEFAULT_ORDER);
    let order_by = query.order_by.as_deref().unwrap_or(DEFAULT_ORDER_BY);

    // Unparseable numbers are already reported; defaults keep the remaining
    // checks running so every violation is returned at once.
    let request = TopicPageRequest::new(
        page.unwrap_or(DEFAULT_PAGE),
        size.unwrap_or(DEFAULT_SIZE),
        order,
        order_by,
    );
    match request {
        Ok(request) if violations.is_empty() => Ok(request),
        Ok(_) => Err(violations),
        Err(mut rest) => {
            rest.extend(violations);
            Err(rest)
        }
    }
}

fn parse_start_session(
    topic_id: &str,
    query: &StartSessionQuery,
) -> Result<StartSessionRequest, FieldViolations> {
    let mut violations = FieldViolations::default();
    let topic_id = record(parse_uuid(topic_id, TOPIC_ID), &mut violations);
    let duration = record(
        parse_integer_or(query.duration_in_minutes.as_deref(), DURATION, 1)
            .and_then(SessionDuration::from_minutes),
        &mut violations,
    );

    match (topic_id, duration) {
        (Some(topic_id), Some(duration)) if violations.is_empty() => Ok(StartSessionRequest {
            topic_id,
            duration,
        }),
        _ => Err(violations),
    }
}

/// Create a topic.
#[utoipa::path(
    post,
    path = "/api/v1/topic",
    request_body = CreateTopicBody,
    responses(
        (status = 201, description = "Topic created", body = TopicResponse),
        (status = 400, description = "Invalid fields", body = ErrorBody),
        (status = 409, description = "Title already in use", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["topics"],
    operation_id = "createTopic"
)]
#[post("/topic")]
pub async fn create_topic(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTopicBody>,
) -> ApiResult<HttpResponse> {
    let CreateTopicBody { title, description } = payload.into_inner();
    let topic = state
        .topics
        .create_topic(CreateTopicRequest { title, description })
        .await?;
    Ok(HttpResponse::Created().json(TopicResponse::from(topic)))
}

/// List topics with their latest voting session.
#[utoipa::path(
    get,
    path = "/api/v1/topic/list",
    params(TopicListQuery),
    responses(
        (status = 200, description = "Page of topics", body = TopicPageResponse),
        (status = 400, description = "Invalid paging", body = ErrorBody)
    ),
    tags = ["topics"],
    operation_id = "listTopics"
)]
#[get("/topic/list")]
pub async fn list_topics(
    state: web::Data<HttpState>,
    query: web::Query<TopicListQuery>,
) -> ApiResult<web::Json<TopicPageResponse>> {
    let request = parse_page_query(&query)?;
    let page = state.topics_query.list_topics(request).await?;
    Ok(web::Json(TopicPageResponse::from(page)))
}

/// Fetch one topic.
#[utoipa::path(
    get,
    path = "/api/v1/topic/{topicId}",
    params(("topicId" = String, Path, description = "Topic identifier")),
    responses(
        (status = 200, description = "Topic", body = TopicResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "Unknown topic", body = ErrorBody)
    ),
    tags = ["topics"],
    operation_id = "getTopic"
)]
#[get("/topic/{topic_id}")]
pub async fn get_topic(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TopicResponse>> {
    let topic_id = parse_uuid(&path, TOPIC_ID).map_err(FieldViolations::from)?;
    let topic = state.topics_query.get_topic(topic_id).await?;
    Ok(web::Json(TopicResponse::from(topic)))
}

/// Open a voting session on a topic.
#[utoipa::path(
    post,
    path = "/api/v1/topic/{topicId}/startVotingSession",
    params(
        ("topicId" = String, Path, description = "Topic identifier"),
        StartSessionQuery
    ),
    responses(
        (status = 201, description = "Session opened", body = VotingSessionResponse),
        (status = 400, description = "Invalid duration or identifier", body = ErrorBody),
        (status = 404, description = "Unknown topic", body = ErrorBody),
        (status = 409, description = "A session is already open", body = ErrorBody)
    ),
    tags = ["topics"],
    operation_id = "startVotingSession"
)]
#[post("/topic/{topic_id}/startVotingSession")]
pub async fn start_voting_session(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<StartSessionQuery>,
) -> ApiResult<HttpResponse> {
    let request = parse_start_session(&path, &query)?;
    let session = state.sessions.start_session(request).await?;
    Ok(HttpResponse::Created().json(VotingSessionResponse::from(session)))
}

#[cfg(test)]
#[path = "topics_tests.rs"]
mod tests;
