//! Vote casting service.
//!
//! Both entry points resolve an open session first, then share one casting
//! routine: normalise the identity, reject a repeat vote on the topic, ask the
//! eligibility checker, and store the vote.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::ports::{
    CastVoteRequest, Eligibility, EligibilityChecker, VoteCommand, VoteRepository,
    VotingSessionRepository,
};
use crate::domain::voting_service_support::{
    ALREADY_VOTED_MESSAGE, INELIGIBLE_MESSAGE, NO_OPEN_SESSION_FOR_TOPIC_MESSAGE,
    NO_OPEN_SESSION_WITH_ID_MESSAGE, map_eligibility_error, map_session_repository_error,
    map_vote_repository_error,
};
use crate::domain::{Cpf, Error, Vote, VotingSession};

/// Service recording votes in open sessions.
#[derive(Clone)]
pub struct VoteService<S, V, E: ?Sized> {
    session_repo: Arc<S>,
    vote_repo: Arc<V>,
    eligibility: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<S, V, E: ?Sized> VoteService<S, V, E> {
    /// Create a vote service.
    pub fn new(
        session_repo: Arc<S>,
        vote_repo: Arc<V>,
        eligibility: Arc<E>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session_repo,
            vote_repo,
            eligibility,
            clock,
        }
    }
}

impl<S, V, E> VoteService<S, V, E>
where
    S: VotingSessionRepository,
    V: VoteRepository,
    E: EligibilityChecker + ?Sized,
{
    async fn cast(
        &self,
        session: VotingSession,
        request: CastVoteRequest,
        now: DateTime<Utc>,
    ) -> Result<Vote, Error> {
        let cpf = Cpf::normalize(&request.cpf);

        let already_voted = self
            .vote_repo
            .exists_for_topic(&session.topic_id, &cpf)
            .await
            .map_err(map_vote_repository_error)?;
        if already_voted {
            return Err(Error::conflict(ALREADY_VOTED_MESSAGE));
        }

        let verdict = self
            .eligibility
            .check(&cpf)
            .await
            .map_err(map_eligibility_error)?;
        if verdict == Eligibility::Ineligible {
            debug!(session_id = %session.id, "ineligible voter rejected");
            return Err(Error::invalid_request(INELIGIBLE_MESSAGE));
        }

        let vote = Vote {
            id: Uuid::new_v4(),
            session_id: session.id,
            topic_id: session.topic_id,
            cpf,
            choice: request.choice,
            voted_at: now,
        };
        self.vote_repo
            .save(&vote)
            .await
            .map_err(map_vote_repository_error)?;

        info!(
            topic_id = %vote.topic_id,
            session_id = %vote.session_id,
            vote_id = %vote.id,
            "vote recorded"
        );
        Ok(vote)
    }
}

#[async_trait]
impl<S, V, E> VoteCommand for VoteService<S, V, E>
where
    S: VotingSessionRepository,
    V: VoteRepository,
    E: EligibilityChecker + ?Sized,
{
    async fn vote_by_topic(
        &self,
        topic_id: Uuid,
        request: CastVoteRequest,
    ) -> Result<Vote, Error> {
        let now = self.clock.utc();
        let session = self
            .session_repo
            .find_latest_open_for_topic(&topic_id, now)
            .await
            .map_err(map_session_repository_error)?
            .ok_or_else(|| Error::not_found(NO_OPEN_SESSION_FOR_TOPIC_MESSAGE))?;
        self.cast(session, request, now).await
    }

    async fn vote_by_session(
        &self,
        session_id: Uuid,
        request: CastVoteRequest,
    ) -> Result<Vote, Error> {
        let now = self.clock.utc();
        let session = self
            .session_repo
            .find_open_by_id(&session_id, now)
            .await
            .map_err(map_session_repository_error)?
            .ok_or_else(|| Error::not_found(NO_OPEN_SESSION_WITH_ID_MESSAGE))?;
        self.cast(session, request, now).await
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod tests;
