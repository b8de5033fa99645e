//! Results service: loads a topic's sessions and votes and tallies them.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    TOPIC_NOT_FOUND_MESSAGE, TopicRepository, VoteRepository, VoteResultsQuery,
    VotingSessionRepository,
};
use crate::domain::voting_service_support::{
    map_session_repository_error, map_topic_repository_error, map_vote_repository_error,
};
use crate::domain::{Error, TopicResults, tally};

/// Service computing current and final results for a topic.
#[derive(Clone)]
pub struct VoteResultsService<T, S, V> {
    topic_repo: Arc<T>,
    session_repo: Arc<S>,
    vote_repo: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<T, S, V> VoteResultsService<T, S, V> {
    /// Create a results service.
    pub fn new(
        topic_repo: Arc<T>,
        session_repo: Arc<S>,
        vote_repo: Arc<V>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            topic_repo,
            session_repo,
            vote_repo,
            clock,
        }
    }
}

#[async_trait]
impl<T, S, V> VoteResultsQuery for VoteResultsService<T, S, V>
where
    T: TopicRepository,
    S: VotingSessionRepository,
    V: VoteRepository,
{
    async fn topic_results(&self, topic_id: Uuid) -> Result<TopicResults, Error> {
        let topic = self
            .topic_repo
            .find_by_id(&topic_id)
            .await
            .map_err(map_topic_repository_error)?
            .ok_or_else(|| Error::not_found(TOPIC_NOT_FOUND_MESSAGE))?;

        let sessions = self
            .session_repo
            .list_for_topic(&topic.id)
            .await
            .map_err(map_session_repository_error)?;
        let votes = self
            .vote_repo
            .list_for_topic(&topic.id)
            .await
            .map_err(map_vote_repository_error)?;

        Ok(tally(topic, sessions, votes, self.clock.utc()))
    }
}

#[cfg(test)]
#[path = "vote_results_service_tests.rs"]
mod tests;
