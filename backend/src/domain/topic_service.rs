//! Topic domain service implementing the topic command and query ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    CreateTopicRequest, TOPIC_NOT_FOUND_MESSAGE, TopicCommand, TopicQuery, TopicRepository,
};
use crate::domain::voting_service_support::{
    TOPIC_TITLE_TAKEN_MESSAGE, map_topic_repository_error,
};
use crate::domain::{Error, Topic, TopicDraft, TopicPage, TopicPageRequest};

/// Topic service backed by a [`TopicRepository`].
#[derive(Clone)]
pub struct TopicService<R> {
    topic_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TopicService<R> {
    /// Create a topic service.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use voting_backend::domain::TopicService;
    /// # use voting_backend::domain::ports::{CreateTopicRequest, FixtureTopicRepository, TopicCommand};
    /// # async fn example() -> Result<(), voting_backend::domain::Error> {
    /// let service = TopicService::new(Arc::new(FixtureTopicRepository), Arc::new(DefaultClock));
    /// let topic = service
    ///     .create_topic(CreateTopicRequest {
    ///         title: Some("Orçamento".into()),
    ///         description: Some("Aprovação do orçamento anual".into()),
    ///     })
    ///     .await?;
    /// # let _ = topic;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(topic_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { topic_repo, clock }
    }
}

#[async_trait]
impl<R> TopicCommand for TopicService<R>
where
    R: TopicRepository,
{
    async fn create_topic(&self, request: CreateTopicRequest) -> Result<Topic, Error> {
        let draft = TopicDraft::new(request.title, request.description)?;

        let taken = self
            .topic_repo
            .exists_by_title(draft.title())
            .await
            .map_err(map_topic_repository_error)?;
        if taken {
            return Err(Error::conflict(TOPIC_TITLE_TAKEN_MESSAGE));
        }

        let topic = draft.into_topic(Uuid::new_v4(), self.clock.utc());
        self.topic_repo
            .save(&topic)
            .await
            .map_err(map_topic_repository_error)?;

        info!(topic_id = %topic.id, "topic created");
        Ok(topic)
    }
}

#[async_trait]
impl<R> TopicQuery for TopicService<R>
where
    R: TopicRepository,
{
    async fn get_topic(&self, topic_id: Uuid) -> Result<Topic, Error> {
        self.topic_repo
            .find_by_id(&topic_id)
            .await
            .map_err(map_topic_repository_error)?
            .ok_or_else(|| Error::not_found(TOPIC_NOT_FOUND_MESSAGE))
    }

    async fn list_topics(&self, request: TopicPageRequest) -> Result<TopicPage, Error> {
        self.topic_repo
            .list_with_latest_session(&request)
            .await
            .map_err(map_topic_repository_error)
    }
}

#[cfg(test)]
#[path = "topic_service_tests.rs"]
mod tests;
