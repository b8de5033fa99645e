//! Driving port for casting votes.
//!
//! A vote can target a topic (landing in its latest open session) or a
//! specific session. Both paths share the same eligibility and one-vote-per
//! topic rules.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Choice, Cpf, Error, Vote};

/// Ballot submitted by a voter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastVoteRequest {
    /// Raw identity as received; punctuation is stripped by the service.
    pub cpf: String,
    pub choice: Choice,
}

/// Domain use-case port for casting votes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteCommand: Send + Sync {
    /// Vote in the latest open session of `topic_id`.
    async fn vote_by_topic(&self, topic_id: Uuid, request: CastVoteRequest)
    -> Result<Vote, Error>;

    /// Vote in the open session `session_id`.
    async fn vote_by_session(
        &self,
        session_id: Uuid,
        request: CastVoteRequest,
    ) -> Result<Vote, Error>;
}

/// Fixture command accepting every ballot without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteCommand;

impl FixtureVoteCommand {
    fn accept(session_id: Uuid, topic_id: Uuid, request: CastVoteRequest) -> Vote {
        Vote {
            id: Uuid::new_v4(),
            session_id,
            topic_id,
            cpf: Cpf::normalize(&request.cpf),
            choice: request.choice,
            voted_at: Utc::now(),
        }
    }
}

#[async_trait]
impl VoteCommand for FixtureVoteCommand {
    async fn vote_by_topic(
        &self,
        topic_id: Uuid,
        request: CastVoteRequest,
    ) -> Result<Vote, Error> {
        Ok(Self::accept(Uuid::new_v4(), topic_id, request))
    }

    async fn vote_by_session(
        &self,
        session_id: Uuid,
        request: CastVoteRequest,
    ) -> Result<Vote, Error> {
        Ok(Self::accept(session_id, Uuid::new_v4(), request))
    }
}
