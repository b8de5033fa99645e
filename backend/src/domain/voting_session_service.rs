//! Voting session domain service.
//!
//! A topic may have many sessions over its lifetime but at most one open at
//! any instant. The service rejects an obvious overlap before resolving the
//! topic; the repository's exclusive insert settles concurrent requests.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    StartSessionRequest, TOPIC_NOT_FOUND_MESSAGE, TopicRepository, VotingSessionCommand,
    VotingSessionRepository,
};
use crate::domain::voting_service_support::{
    SESSION_IN_PROGRESS_MESSAGE, map_session_repository_error, map_topic_repository_error,
};
use crate::domain::{Error, VotingSession};

/// Service opening voting sessions on existing topics.
#[derive(Clone)]
pub struct VotingSessionService<T, S> {
    topic_repo: Arc<T>,
    session_repo: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<T, S> VotingSessionService<T, S> {
    /// Create a session service from its repositories and clock.
    pub fn new(topic_repo: Arc<T>, session_repo: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            topic_repo,
            session_repo,
            clock,
        }
    }
}

#[async_trait]
impl<T, S> VotingSessionCommand for VotingSessionService<T, S>
where
    T: TopicRepository,
    S: VotingSessionRepository,
{
    async fn start_session(&self, request: StartSessionRequest) -> Result<VotingSession, Error> {
        let now = self.clock.utc();
        let open = self
            .session_repo
            .exists_open_for_topic(&request.topic_id, now)
            .await
            .map_err(map_session_repository_error)?;
        if open {
            return Err(Error::conflict(SESSION_IN_PROGRESS_MESSAGE));
        }

        let topic = self
            .topic_repo
            .find_by_id(&request.topic_id)
            .await
            .map_err(map_topic_repository_error)?
            .ok_or_else(|| Error::not_found(TOPIC_NOT_FOUND_MESSAGE))?;

        let session = VotingSession::start(Uuid::new_v4(), topic.id, now, request.duration);
        self.session_repo
            .insert_exclusive(&session)
            .await
            .map_err(map_session_repository_error)?;

        info!(
            topic_id = %topic.id,
            session_id = %session.id,
            duration_minutes = request.duration.minutes(),
            "voting session opened"
        );
        Ok(session)
    }
}

#[cfg(test)]
#[path = "voting_session_service_tests.rs"]
mod tests;
