//! Port for topic persistence and topic listings.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Topic, TopicPage, TopicPageRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by topic repository adapters.
    pub enum TopicRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "topic repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "topic repository query failed: {message}",
        /// The store rejected the insert because the title is taken.
        DuplicateTitle { title: String } =>
            "topic title already exists: {title}",
    }
}

/// Port for storing and reading topics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Whether a topic with exactly this title exists.
    async fn exists_by_title(&self, title: &str) -> Result<bool, TopicRepositoryError>;

    /// Persist a new topic.
    async fn save(&self, topic: &Topic) -> Result<(), TopicRepositoryError>;

    /// Find a topic by id.
    async fn find_by_id(&self, topic_id: &Uuid) -> Result<Option<Topic>, TopicRepositoryError>;

    /// Page through topics, each joined with its latest session.
    async fn list_with_latest_session(
        &self,
        request: &TopicPageRequest,
    ) -> Result<TopicPage, TopicRepositoryError>;
}

/// Fixture implementation for tests that do not exercise topic persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTopicRepository;

#[async_trait]
impl TopicRepository for FixtureTopicRepository {
    async fn exists_by_title(&self, _title: &str) -> Result<bool, TopicRepositoryError> {
        Ok(false)
    }

    async fn save(&self, _topic: &Topic) -> Result<(), TopicRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _topic_id: &Uuid) -> Result<Option<Topic>, TopicRepositoryError> {
        Ok(None)
    }

    async fn list_with_latest_session(
        &self,
        request: &TopicPageRequest,
    ) -> Result<TopicPage, TopicRepositoryError> {
        Ok(TopicPage {
            content: Vec::new(),
            request: *request,
            total_elements: 0,
        })
    }
}
