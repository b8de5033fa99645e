//! Vote HTTP handlers.
//!
//! ```text
//! POST /api/v1/vote/topic/{topicId}?cpf&vote
//! POST /api/v1/vote/votingSession/{sessionId}?cpf&vote
//! GET  /api/v1/vote/topic/{topicId}/results
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::CastVoteRequest;
use crate::domain::{
    Choice, FieldViolations, SessionStatus, SessionVotes, TopicResults, Vote, VoteResult,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_bool, parse_uuid, record, require};

const TOPIC_ID: FieldName = FieldName::new("topicId");
const SESSION_ID: FieldName = FieldName::new("sessionId");
const CPF: FieldName = FieldName::new("cpf");
const VOTE: FieldName = FieldName::new("vote");

/// Raw ballot parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BallotQuery {
    /// Voter CPF; punctuation is ignored.
    pub cpf: Option<String>,
    /// `true` in favour, `false` against.
    pub vote: Option<String>,
}

/// Reporting status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatusDto {
    /// The session has not ended yet.
    Open,
    /// The session end lies in the past.
    Finished,
}

impl From<SessionStatus> for SessionStatusDto {
    fn from(value: SessionStatus) -> Self {
        match value {
            SessionStatus::Open => Self::Open,
            SessionStatus::Finished => Self::Finished,
        }
    }
}

/// Outcome of a tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteResultDto {
    /// More votes in favour.
    Favorable,
    /// More votes against.
    Against,
    /// Equal counts.
    Tied,
}

impl From<VoteResult> for VoteResultDto {
    fn from(value: VoteResult) -> Self {
        match value {
            VoteResult::Favorable => Self::Favorable,
            VoteResult::Against => Self::Against,
            VoteResult::Tied => Self::Tied,
        }
    }
}

/// A vote as listed in the results.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    /// Voter CPF, digits only.
    #[schema(example = "52998224725")]
    pub cpf: String,
    /// `true` in favour.
    pub vote: bool,
    /// Instant the vote was recorded.
    #[schema(value_type = String, format = DateTime)]
    pub voted_at: DateTime<Utc>,
}

impl From<Vote> for VoteResponse {
    fn from(value: Vote) -> Self {
        Self {
            cpf: value.cpf.as_str().to_owned(),
            vote: value.choice.into(),
            voted_at: value.voted_at,
        }
    }
}

/// A session and the votes cast in it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionVotesResponse {
    /// Session identifier.
    pub uuid: Uuid,
    /// Instant the session opened.
    #[schema(value_type = String, format = DateTime)]
    pub start_time: DateTime<Utc>,
    /// Instant the session stops accepting votes.
    #[schema(value_type = String, format = DateTime)]
    pub end_time: DateTime<Utc>,
    /// Status at the time of the request.
    pub status: SessionStatusDto,
    /// Votes cast in this session, oldest first.
    pub votes: Vec<VoteResponse>,
}

impl From<SessionVotes> for SessionVotesResponse {
    fn from(value: SessionVotes) -> Self {
        Self {
            uuid: value.session.id,
            start_time: value.session.start_time,
            end_time: value.session.end_time,
            status: value.status.into(),
            votes: value.votes.into_iter().map(VoteResponse::from).collect(),
        }
    }
}

/// Tally of a topic.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicResultsResponse {
    /// Topic identifier.
    pub uuid: Uuid,
    /// Topic title.
    pub title: String,
    /// Topic description.
    pub description: String,
    /// Instant the topic was created.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    /// Every session of the topic with its votes.
    pub voting_sessions_votes: Vec<SessionVotesResponse>,
    /// Votes in favour across all sessions.
    pub favorable_votes: u64,
    /// Votes against across all sessions.
    pub against_votes: u64,
    /// Result so far; absent when nobody voted.
    pub current_result: Option<VoteResultDto>,
    /// Result once every session finished.
    pub final_result: Option<VoteResultDto>,
    /// Human-readable current result.
    #[schema(example = "Maioria dos votos FAVORÁVEIS até o momento")]
    pub current_result_text: String,
    /// Human-readable final result.
    #[schema(example = "Ainda há sessões de votação em andamento")]
    pub final_result_text: String,
}

impl From<TopicResults> for TopicResultsResponse {
    fn from(value: TopicResults) -> Self {
        let TopicResults {
            topic,
            sessions,
            favorable_votes,
            against_votes,
            current_result,
            final_result,
            current_result_text,
            final_result_text,
        } = value;
        Self {
            uuid: topic.id,
            title: topic.title,
            description: topic.description,
            created_at: topic.created_at,
            voting_sessions_votes: sessions
                .into_iter()
                .map(SessionVotesResponse::from)
                .collect(),
            favorable_votes,
            against_votes,
            current_result: current_result.map(VoteResultDto::from),
            final_result: final_result.map(VoteResultDto::from),
            current_result_text,
            final_result_text,
        }
    }
}

fn parse_ballot(
    raw_id: &str,
    id_field: FieldName,
    query: BallotQuery,
) -> Result<(Uuid, CastVoteRequest), FieldViolations> {
    let mut violations = FieldViolations::default();
    let id = record(parse_uuid(raw_id, id_field), &mut violations);
    let cpf = record(require(query.cpf, CPF), &mut violations);
    let vote = record(parse_bool(query.vote, VOTE), &mut violations);

    match (id, cpf, vote) {
        (Some(id), Some(cpf), Some(vote)) => Ok((
            id,
            CastVoteRequest {
                cpf,
                choice: Choice::from(vote),
            },
        )),
        _ => Err(violations),
    }
}

/// Vote on a topic through its latest open session.
#[utoipa::path(
    post,
    path = "/api/v1/vote/topic/{topicId}",
    params(("topicId" = String, Path, description = "Topic identifier"), BallotQuery),
    responses(
        (status = 204, description = "Vote recorded"),
        (status = 400, description = "Invalid input or ineligible voter", body = ErrorBody),
        (status = 404, description = "No open session for the topic", body = ErrorBody),
        (status = 409, description = "Voter already voted on the topic", body = ErrorBody),
        (status = 503, description = "Eligibility checker or store unavailable", body = ErrorBody)
    ),
    tags = ["votes"],
    operation_id = "voteByTopic"
)]
#[post("/vote/topic/{topic_id}")]
pub async fn vote_by_topic(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<BallotQuery>,
) -> ApiResult<HttpResponse> {
    let (topic_id, ballot) = parse_ballot(&path, TOPIC_ID, query.into_inner())?;
    state.votes.vote_by_topic(topic_id, ballot).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Vote in a specific open session.
#[utoipa::path(
    post,
    path = "/api/v1/vote/votingSession/{sessionId}",
    params(("sessionId" = String, Path, description = "Voting session identifier"), BallotQuery),
    responses(
        (status = 204, description = "Vote recorded"),
        (status = 400, description = "Invalid input or ineligible voter", body = ErrorBody),
        (status = 404, description = "Session missing or closed", body = ErrorBody),
        (status = 409, description = "Voter already voted on the topic", body = ErrorBody),
        (status = 503, description = "Eligibility checker or store unavailable", body = ErrorBody)
    ),
    tags = ["votes"],
    operation_id = "voteBySession"
)]
#[post("/vote/votingSession/{session_id}")]
pub async fn vote_by_session(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<BallotQuery>,
) -> ApiResult<HttpResponse> {
    let (session_id, ballot) = parse_ballot(&path, SESSION_ID, query.into_inner())?;
    state.votes.vote_by_session(session_id, ballot).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Tally a topic.
#[utoipa::path(
    get,
    path = "/api/v1/vote/topic/{topicId}/results",
    params(("topicId" = String, Path, description = "Topic identifier")),
    responses(
        (status = 200, description = "Topic results", body = TopicResultsResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "Unknown topic", body = ErrorBody)
    ),
    tags = ["votes"],
    operation_id = "topicResults"
)]
#[get("/vote/topic/{topic_id}/results")]
pub async fn topic_results(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TopicResultsResponse>> {
    let topic_id = parse_uuid(&path, TOPIC_ID).map_err(FieldViolations::from)?;
    let results = state.results.topic_results(topic_id).await?;
    Ok(web::Json(TopicResultsResponse::from(results)))
}

#[cfg(test)]
#[path = "votes_tests.rs"]
mod tests;
