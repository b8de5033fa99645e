//! Driving port for reading topics.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Topic, TopicPage, TopicPageRequest};

/// Message returned when no topic matches an identifier.
pub const TOPIC_NOT_FOUND_MESSAGE: &str =
    "Não foi possível encontrar pauta ativa com o ID informado.";

/// Domain use-case port for topic lookups and listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicQuery: Send + Sync {
    /// Fetch one topic.
    async fn get_topic(&self, topic_id: Uuid) -> Result<Topic, Error>;

    /// Page through topics with their latest voting session.
    async fn list_topics(&self, request: TopicPageRequest) -> Result<TopicPage, Error>;
}

/// Fixture query backed by an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTopicQuery;

#[async_trait]
impl TopicQuery for FixtureTopicQuery {
    async fn get_topic(&self, _topic_id: Uuid) -> Result<Topic, Error> {
        Err(Error::not_found(TOPIC_NOT_FOUND_MESSAGE))
    }

    async fn list_topics(&self, request: TopicPageRequest) -> Result<TopicPage, Error> {
        Ok(TopicPage {
            content: Vec::new(),
            request,
            total_elements: 0,
        })
    }
}
