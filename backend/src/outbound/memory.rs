//! In-process store implementing every voting repository port.
//!
//! Used when no database is configured and by the integration tests. State
//! lives behind one mutex, so each operation is atomic with respect to the
//! others and the exclusive-insert and duplicate rules hold under concurrency.

use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    TopicRepository, TopicRepositoryError, VoteRepository, VoteRepositoryError,
    VotingSessionRepository, VotingSessionRepositoryError,
};
use crate::domain::{
    Cpf, SortDirection, Topic, TopicPage, TopicPageRequest, TopicSortField, TopicSummary, Vote,
    VotingSession,
};

#[derive(Debug, Default)]
struct State {
    topics: Vec<Topic>,
    sessions: Vec<VotingSession>,
    votes: Vec<Vote>,
}

impl State {
    fn latest_session(&self, topic_id: Uuid) -> Option<&VotingSession> {
        self.sessions
            .iter()
            .filter(|session| session.topic_id == topic_id)
            .max_by_key(|session| session.start_time)
    }

    fn latest_open_session(&self, topic_id: Uuid, now: DateTime<Utc>) -> Option<&VotingSession> {
        self.sessions
            .iter()
            .filter(|session| session.topic_id == topic_id && session.accepts_votes_at(now))
            .max_by_key(|session| session.start_time)
    }
}

/// Mutex-guarded store shared by the topic, session and vote repositories.
#[derive(Debug, Default)]
pub struct InMemoryVotingStore {
    state: Mutex<State>,
}

impl InMemoryVotingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

fn compare_topics(a: &Topic, b: &Topic, field: TopicSortField, direction: SortDirection) -> Ordering {
    let by_field = match field {
        TopicSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        TopicSortField::Title => a.title.cmp(&b.title),
        TopicSortField::Description => a.description.cmp(&b.description),
    };
    let by_field = match direction {
        SortDirection::Asc => by_field,
        SortDirection::Desc => by_field.reverse(),
    };
    by_field.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl TopicRepository for InMemoryVotingStore {
    async fn exists_by_title(&self, title: &str) -> Result<bool, TopicRepositoryError> {
        let state = self.lock().map_err(TopicRepositoryError::query)?;
        Ok(state.topics.iter().any(|topic| topic.title == title))
    }

    async fn save(&self, topic: &Topic) -> Result<(), TopicRepositoryError> {
        let mut state = self.lock().map_err(TopicRepositoryError::query)?;
        if state.topics.iter().any(|stored| stored.title == topic.title) {
            return Err(TopicRepositoryError::duplicate_title(topic.title.clone()));
        }
        state.topics.push(topic.clone());
        Ok(())
    }

    async fn find_by_id(&self, topic_id: &Uuid) -> Result<Option<Topic>, TopicRepositoryError> {
        let state = self.lock().map_err(TopicRepositoryError::query)?;
        Ok(state.topics.iter().find(|topic| topic.id == *topic_id).cloned())
    }

    async fn list_with_latest_session(
        &self,
        request: &TopicPageRequest,
    ) -> Result<TopicPage, TopicRepositoryError> {
        let state = self.lock().map_err(TopicRepositoryError::query)?;
        let mut topics: Vec<&Topic> = state.topics.iter().collect();
        topics.sort_by(|a, b| compare_topics(a, b, request.sort_field(), request.direction()));

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = topics
            .into_iter()
            .skip(offset)
            .take(request.size() as usize)
            .map(|topic| TopicSummary {
                topic: topic.clone(),
                latest_session: state.latest_session(topic.id).map(VotingSession::window),
            })
            .collect();

        Ok(TopicPage {
            content,
            request: *request,
            total_elements: state.topics.len() as u64,
        })
    }
}

#[async_trait]
impl VotingSessionRepository for InMemoryVotingStore {
    async fn exists_open_for_topic(
        &self,
        topic_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, VotingSessionRepositoryError> {
        let state = self.lock().map_err(VotingSessionRepositoryError::query)?;
        Ok(state.latest_open_session(*topic_id, now).is_some())
    }

    async fn find_latest_open_for_topic(
        &self,
        topic_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<VotingSession>, VotingSessionRepositoryError> {
        let state = self.lock().map_err(VotingSessionRepositoryError::query)?;
        Ok(state.latest_open_session(*topic_id, now).copied())
    }

    async fn find_open_by_id(
        &self,
        session_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<VotingSession>, VotingSessionRepositoryError> {
        let state = self.lock().map_err(VotingSessionRepositoryError::query)?;
        Ok(state
            .sessions
            .iter()
            .find(|session| session.id == *session_id && session.accepts_votes_at(now))
            .copied())
    }

    async fn list_for_topic(
        &self,
        topic_id: &Uuid,
    ) -> Result<Vec<VotingSession>, VotingSessionRepositoryError> {
        let state = self.lock().map_err(VotingSessionRepositoryError::query)?;
        let mut sessions: Vec<VotingSession> = state
            .sessions
            .iter()
            .filter(|session| session.topic_id == *topic_id)
            .copied()
            .collect();
        sessions.sort_by_key(|session| session.start_time);
        Ok(sessions)
    }

    async fn insert_exclusive(
        &self,
        session: &VotingSession,
    ) -> Result<(), VotingSessionRepositoryError> {
        let mut state = self.lock().map_err(VotingSessionRepositoryError::query)?;
        if state
            .latest_open_session(session.topic_id, session.start_time)
            .is_some()
        {
            return Err(VotingSessionRepositoryError::open_session_exists(
                session.topic_id,
            ));
        }
        state.sessions.push(*session);
        Ok(())
    }
}

#[async_trait]
impl VoteRepository for InMemoryVotingStore {
    async fn exists_for_topic(
        &self,
        topic_id: &Uuid,
        cpf: &Cpf,
    ) -> Result<bool, VoteRepositoryError> {
        let state = self.lock().map_err(VoteRepositoryError::query)?;
        Ok(state
            .votes
            .iter()
            .any(|vote| vote.topic_id == *topic_id && vote.cpf == *cpf))
    }

    async fn list_for_topic(&self, topic_id: &Uuid) -> Result<Vec<Vote>, VoteRepositoryError> {
        let state = self.lock().map_err(VoteRepositoryError::query)?;
        Ok(state
            .votes
            .iter()
            .filter(|vote| vote.topic_id == *topic_id)
            .cloned()
            .collect())
    }

    async fn save(&self, vote: &Vote) -> Result<(), VoteRepositoryError> {
        let mut state = self.lock().map_err(VoteRepositoryError::query)?;
        if state
            .votes
            .iter()
            .any(|stored| stored.topic_id == vote.topic_id && stored.cpf == vote.cpf)
        {
            return Err(VoteRepositoryError::duplicate(vote.topic_id));
        }
        state.votes.push(vote.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{Choice, SessionDuration};
    use crate::test_support::fixture_now;

    fn topic(title: &str, minutes_after: i64) -> Topic {
        Topic {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            description: format!("Descrição de {title}"),
            created_at: fixture_now() + TimeDelta::minutes(minutes_after),
        }
    }

    #[fixture]
    fn store() -> InMemoryVotingStore {
        InMemoryVotingStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_title_is_rejected(store: InMemoryVotingStore) {
        TopicRepository::save(&store, &topic("Pauta", 0))
            .await
            .expect("first save");
        let error = TopicRepository::save(&store, &topic("Pauta", 1))
            .await
            .expect_err("same title");
        assert_eq!(error, TopicRepositoryError::duplicate_title("Pauta"));
    }

    #[rstest]
    #[case("asc", "title", ["A", "B", "C"])]
    #[case("desc", "title", ["C", "B", "A"])]
    #[case("desc", "createdAt", ["B", "A", "C"])]
    #[tokio::test]
    async fn listing_sorts_and_pages(
        store: InMemoryVotingStore,
        #[case] order: &str,
        #[case] order_by: &str,
        #[case] expected: [&str; 3],
    ) {
        for (title, offset) in [("C", 0), ("A", 1), ("B", 2)] {
            TopicRepository::save(&store, &topic(title, offset))
                .await
                .expect("save");
        }

        let first = TopicPageRequest::new(1, 2, order, order_by).expect("paging");
        let second = TopicPageRequest::new(2, 2, order, order_by).expect("paging");
        let mut titles = Vec::new();
        for request in [first, second] {
            let page = store
                .list_with_latest_session(&request)
                .await
                .expect("listing");
            assert_eq!(page.total_elements, 3);
            assert_eq!(page.total_pages(), 2);
            titles.extend(page.content.into_iter().map(|summary| summary.topic.title));
        }
        assert_eq!(titles, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn listing_carries_latest_session(store: InMemoryVotingStore) {
        let topic = topic("Pauta", 0);
        TopicRepository::save(&store, &topic).await.expect("save");
        let first = VotingSession::start(
            Uuid::new_v4(),
            topic.id,
            fixture_now(),
            SessionDuration::default(),
        );
        let later = VotingSession::start(
            Uuid::new_v4(),
            topic.id,
            fixture_now() + TimeDelta::minutes(5),
            SessionDuration::default(),
        );
        store.insert_exclusive(&first).await.expect("first session");
        store.insert_exclusive(&later).await.expect("later session");

        let request = TopicPageRequest::new(1, 10, "desc", "createdAt").expect("paging");
        let page = store
            .list_with_latest_session(&request)
            .await
            .expect("listing");
        assert_eq!(page.content[0].latest_session, Some(later.window()));
    }

    #[rstest]
    #[tokio::test]
    async fn overlapping_session_is_rejected(store: InMemoryVotingStore) {
        let topic_id = Uuid::new_v4();
        let duration = SessionDuration::from_minutes(10).expect("duration");
        let first = VotingSession::start(Uuid::new_v4(), topic_id, fixture_now(), duration);
        let overlapping = VotingSession::start(
            Uuid::new_v4(),
            topic_id,
            fixture_now() + TimeDelta::minutes(9),
            duration,
        );
        let after = VotingSession::start(
            Uuid::new_v4(),
            topic_id,
            fixture_now() + TimeDelta::minutes(10),
            duration,
        );

        store.insert_exclusive(&first).await.expect("first");
        let error = store
            .insert_exclusive(&overlapping)
            .await
            .expect_err("overlap");
        assert_eq!(
            error,
            VotingSessionRepositoryError::open_session_exists(topic_id)
        );
        store.insert_exclusive(&after).await.expect("after expiry");
    }

    #[rstest]
    #[tokio::test]
    async fn open_lookups_respect_end_time(store: InMemoryVotingStore) {
        let session = VotingSession::start(
            Uuid::new_v4(),
            Uuid::new_v4(),
            fixture_now(),
            SessionDuration::default(),
        );
        store.insert_exclusive(&session).await.expect("insert");

        let still_open = fixture_now() + TimeDelta::seconds(59);
        let closed = fixture_now() + TimeDelta::minutes(1);
        assert_eq!(
            store
                .find_open_by_id(&session.id, still_open)
                .await
                .expect("lookup"),
            Some(session)
        );
        assert_eq!(
            store
                .find_latest_open_for_topic(&session.topic_id, closed)
                .await
                .expect("lookup"),
            None
        );
    }

    #[rstest]
    #[tokio::test]
    async fn second_vote_on_topic_is_duplicate(store: InMemoryVotingStore) {
        let topic_id = Uuid::new_v4();
        let vote = |session_id| Vote {
            id: Uuid::new_v4(),
            session_id,
            topic_id,
            cpf: Cpf::normalize("52998224725"),
            choice: Choice::Favorable,
            voted_at: fixture_now(),
        };

        VoteRepository::save(&store, &vote(Uuid::new_v4()))
            .await
            .expect("first vote");
        let error = VoteRepository::save(&store, &vote(Uuid::new_v4()))
            .await
            .expect_err("second vote in another session");
        assert_eq!(error, VoteRepositoryError::duplicate(topic_id));
        assert!(
            store
                .exists_for_topic(&topic_id, &Cpf::normalize("529.982.247-25"))
                .await
                .expect("lookup")
        );
    }
}
