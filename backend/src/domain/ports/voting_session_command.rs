//! Driving port for opening voting sessions.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Error, SessionDuration, VotingSession};

/// Request to open a session on a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartSessionRequest {
    pub topic_id: Uuid,
    pub duration: SessionDuration,
}

/// Domain use-case port for opening voting sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VotingSessionCommand: Send + Sync {
    /// Open a session starting now, unless the topic already has one open.
    async fn start_session(&self, request: StartSessionRequest) -> Result<VotingSession, Error>;
}

/// Fixture command that opens sessions without storing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVotingSessionCommand;

#[async_trait]
impl VotingSessionCommand for FixtureVotingSessionCommand {
    async fn start_session(&self, request: StartSessionRequest) -> Result<VotingSession, Error> {
        Ok(VotingSession::start(
            Uuid::new_v4(),
            request.topic_id,
            Utc::now(),
            request.duration,
        ))
    }
}
