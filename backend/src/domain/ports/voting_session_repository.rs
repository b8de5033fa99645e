//! Port for voting session persistence and open-session lookups.
//!
//! "Open" always means `end_time > now` for the `now` passed in by the caller;
//! adapters never read the wall clock themselves.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::VotingSession;

use super::define_port_error;

define_port_error! {
    /// Errors raised by voting session repository adapters.
    pub enum VotingSessionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "voting session repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "voting session repository query failed: {message}",
        /// Another session for the topic was still open at insert time.
        OpenSessionExists { topic_id: Uuid } =>
            "topic {topic_id} already has an open voting session",
    }
}

/// Port for storing and querying voting sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VotingSessionRepository: Send + Sync {
    /// Whether any session of `topic_id` is open at `now`.
    async fn exists_open_for_topic(
        &self,
        topic_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, VotingSessionRepositoryError>;

    /// The most recently started session of `topic_id` open at `now`.
    async fn find_latest_open_for_topic(
        &self,
        topic_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<VotingSession>, VotingSessionRepositoryError>;

    /// The session `session_id` if it is open at `now`.
    async fn find_open_by_id(
        &self,
        session_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<VotingSession>, VotingSessionRepositoryError>;

    /// Every session of `topic_id`, oldest first.
    async fn list_for_topic(
        &self,
        topic_id: &Uuid,
    ) -> Result<Vec<VotingSession>, VotingSessionRepositoryError>;

    /// Insert `session` unless another session of the same topic is open at
    /// its start time.
    ///
    /// Adapters serialise this per topic; a concurrent winner surfaces as
    /// [`VotingSessionRepositoryError::OpenSessionExists`].
    async fn insert_exclusive(
        &self,
        session: &VotingSession,
    ) -> Result<(), VotingSessionRepositoryError>;
}

/// Fixture implementation for tests that do not exercise session persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVotingSessionRepository;

#[async_trait]
impl VotingSessionRepository for FixtureVotingSessionRepository {
    async fn exists_open_for_topic(
        &self,
        _topic_id: &Uuid,
        _now: DateTime<Utc>,
    ) -> Result<bool, VotingSessionRepositoryError> {
        Ok(false)
    }

    async fn find_latest_open_for_topic(
        &self,
        _topic_id: &Uuid,
        _now: DateTime<Utc>,
    ) -> Result<Option<VotingSession>, VotingSessionRepositoryError> {
        Ok(None)
    }

    async fn find_open_by_id(
        &self,
        _session_id: &Uuid,
        _now: DateTime<Utc>,
    ) -> Result<Option<VotingSession>, VotingSessionRepositoryError> {
        Ok(None)
    }

    async fn list_for_topic(
        &self,
        _topic_id: &Uuid,
    ) -> Result<Vec<VotingSession>, VotingSessionRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert_exclusive(
        &self,
        _session: &VotingSession,
    ) -> Result<(), VotingSessionRepositoryError> {
        Ok(())
    }
}
