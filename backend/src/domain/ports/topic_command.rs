//! Driving port for creating topics.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Error, Topic, TopicDraft};

/// Raw input for a new topic, validated by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTopicRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Domain use-case port for registering topics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicCommand: Send + Sync {
    /// Validate and store a new topic with a unique title.
    async fn create_topic(&self, request: CreateTopicRequest) -> Result<Topic, Error>;
}

/// Fixture command that validates input and echoes the topic without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTopicCommand;

#[async_trait]
impl TopicCommand for FixtureTopicCommand {
    async fn create_topic(&self, request: CreateTopicRequest) -> Result<Topic, Error> {
        let draft = TopicDraft::new(request.title, request.description)?;
        Ok(draft.into_topic(Uuid::new_v4(), Utc::now()))
    }
}
