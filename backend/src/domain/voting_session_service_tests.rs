//! Tests for the voting session service.

use std::sync::Arc;

use chrono::TimeDelta;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockTopicRepository, MockVotingSessionRepository, VotingSessionRepositoryError,
};
use crate::domain::{ErrorCode, SessionDuration, Topic};
use crate::test_support::{MutableClock, fixture_now};

#[fixture]
fn topic() -> Topic {
    Topic {
        id: Uuid::new_v4(),
        title: "Eleição do conselho".to_owned(),
        description: "Escolha dos novos conselheiros".to_owned(),
        created_at: fixture_now(),
    }
}

fn topic_repo_with(topic: Option<Topic>) -> MockTopicRepository {
    let mut repo = MockTopicRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(topic));
    repo
}

fn service(
    topics: MockTopicRepository,
    sessions: MockVotingSessionRepository,
) -> VotingSessionService<MockTopicRepository, MockVotingSessionRepository> {
    VotingSessionService::new(
        Arc::new(topics),
        Arc::new(sessions),
        Arc::new(MutableClock::default()),
    )
}

fn request(topic_id: Uuid, minutes: i64) -> StartSessionRequest {
    StartSessionRequest {
        topic_id,
        duration: SessionDuration::from_minutes(minutes).expect("valid duration"),
    }
}

#[rstest]
#[tokio::test]
async fn start_session_opens_window_from_now(topic: Topic) {
    let topic_id = topic.id;
    let mut sessions = MockVotingSessionRepository::new();
    sessions
        .expect_exists_open_for_topic()
        .withf(move |id, now| *id == topic_id && *now == fixture_now())
        .return_once(|_, _| Ok(false));
    sessions
        .expect_insert_exclusive()
        .times(1)
        .return_once(|_| Ok(()));

    let session = service(topic_repo_with(Some(topic)), sessions)
        .start_session(request(topic_id, 5))
        .await
        .expect("session opened");

    assert_eq!(session.topic_id, topic_id);
    assert_eq!(session.start_time, fixture_now());
    assert_eq!(session.end_time, fixture_now() + TimeDelta::minutes(5));
}

#[rstest]
#[tokio::test]
async fn start_session_requires_existing_topic() {
    let mut sessions = MockVotingSessionRepository::new();
    sessions
        .expect_exists_open_for_topic()
        .return_once(|_, _| Ok(false));
    sessions.expect_insert_exclusive().times(0);

    let error = service(topic_repo_with(None), sessions)
        .start_session(request(Uuid::new_v4(), 1))
        .await
        .expect_err("missing topic");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), TOPIC_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn start_session_rejects_open_session_before_topic_lookup(topic: Topic) {
    let topic_id = topic.id;
    let mut topics = MockTopicRepository::new();
    topics.expect_find_by_id().times(0);
    let mut sessions = MockVotingSessionRepository::new();
    sessions
        .expect_exists_open_for_topic()
        .return_once(|_, _| Ok(true));
    sessions.expect_insert_exclusive().times(0);

    let error = service(topics, sessions)
        .start_session(request(topic_id, 1))
        .await
        .expect_err("session already open");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), SESSION_IN_PROGRESS_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn start_session_reports_lost_race_as_conflict(topic: Topic) {
    let topic_id = topic.id;
    let mut sessions = MockVotingSessionRepository::new();
    sessions
        .expect_exists_open_for_topic()
        .return_once(|_, _| Ok(false));
    sessions.expect_insert_exclusive().return_once(|session| {
        Err(VotingSessionRepositoryError::open_session_exists(
            session.topic_id,
        ))
    });

    let error = service(topic_repo_with(Some(topic)), sessions)
        .start_session(request(topic_id, 1))
        .await
        .expect_err("concurrent session won");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn start_session_maps_connection_failure(topic: Topic) {
    let topic_id = topic.id;
    let mut sessions = MockVotingSessionRepository::new();
    sessions
        .expect_exists_open_for_topic()
        .return_once(|_, _| Err(VotingSessionRepositoryError::connection("pool timed out")));
    let mut topics = MockTopicRepository::new();
    topics.expect_find_by_id().times(0);

    let error = service(topics, sessions)
        .start_session(request(topic_id, 1))
        .await
        .expect_err("store unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
