//! Port for vote persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Cpf, Vote};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vote repository adapters.
    pub enum VoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "vote repository query failed: {message}",
        /// The identity already voted on the topic.
        Duplicate { topic_id: Uuid } =>
            "identity already voted on topic {topic_id}",
    }
}

/// Port for recording votes and reading them back per topic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Whether `cpf` voted in any session of `topic_id`.
    async fn exists_for_topic(&self, topic_id: &Uuid, cpf: &Cpf)
    -> Result<bool, VoteRepositoryError>;

    /// Every vote cast on `topic_id`, across all of its sessions.
    async fn list_for_topic(&self, topic_id: &Uuid) -> Result<Vec<Vote>, VoteRepositoryError>;

    /// Persist a vote; a second vote for the same (topic, identity) fails with
    /// [`VoteRepositoryError::Duplicate`].
    async fn save(&self, vote: &Vote) -> Result<(), VoteRepositoryError>;
}

/// Fixture implementation for tests that do not exercise vote persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteRepository;

#[async_trait]
impl VoteRepository for FixtureVoteRepository {
    async fn exists_for_topic(
        &self,
        _topic_id: &Uuid,
        _cpf: &Cpf,
    ) -> Result<bool, VoteRepositoryError> {
        Ok(false)
    }

    async fn list_for_topic(&self, _topic_id: &Uuid) -> Result<Vec<Vote>, VoteRepositoryError> {
        Ok(Vec::new())
    }

    async fn save(&self, _vote: &Vote) -> Result<(), VoteRepositoryError> {
        Ok(())
    }
}
