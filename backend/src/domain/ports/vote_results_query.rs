//! Driving port for topic vote results.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, TopicResults};

use super::TOPIC_NOT_FOUND_MESSAGE;

/// Domain use-case port for tallying a topic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteResultsQuery: Send + Sync {
    /// Tally every session and vote of `topic_id` as of now.
    async fn topic_results(&self, topic_id: Uuid) -> Result<TopicResults, Error>;
}

/// Fixture query with no topics to report on.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteResultsQuery;

#[async_trait]
impl VoteResultsQuery for FixtureVoteResultsQuery {
    async fn topic_results(&self, _topic_id: Uuid) -> Result<TopicResults, Error> {
        Err(Error::not_found(TOPIC_NOT_FOUND_MESSAGE))
    }
}
