//! Tests for the topic service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockTopicRepository, TopicRepositoryError};
use crate::domain::{ErrorCode, SessionWindow, TopicSummary};
use crate::test_support::{MutableClock, fixture_now};

#[fixture]
fn request() -> CreateTopicRequest {
    CreateTopicRequest {
        title: Some("Reforma da sede".to_owned()),
        description: Some("Aprovar o orçamento da reforma".to_owned()),
    }
}

fn service(repo: MockTopicRepository) -> TopicService<MockTopicRepository> {
    TopicService::new(Arc::new(repo), Arc::new(MutableClock::default()))
}

#[rstest]
#[tokio::test]
async fn create_topic_stores_and_stamps_topic(request: CreateTopicRequest) {
    let mut repo = MockTopicRepository::new();
    repo.expect_exists_by_title()
        .with(eq("Reforma da sede"))
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_save()
        .withf(|topic| topic.title == "Reforma da sede")
        .times(1)
        .return_once(|_| Ok(()));

    let topic = service(repo)
        .create_topic(request)
        .await
        .expect("topic created");

    assert_eq!(topic.created_at, fixture_now());
    assert_eq!(topic.description, "Aprovar o orçamento da reforma");
}

#[rstest]
#[tokio::test]
async fn create_topic_rejects_taken_title(request: CreateTopicRequest) {
    let mut repo = MockTopicRepository::new();
    repo.expect_exists_by_title().return_once(|_| Ok(true));
    repo.expect_save().times(0);

    let error = service(repo)
        .create_topic(request)
        .await
        .expect_err("duplicate title");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), TOPIC_TITLE_TAKEN_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn create_topic_maps_racing_duplicate_to_conflict(request: CreateTopicRequest) {
    let mut repo = MockTopicRepository::new();
    repo.expect_exists_by_title().return_once(|_| Ok(false));
    repo.expect_save()
        .return_once(|topic| Err(TopicRepositoryError::duplicate_title(topic.title.clone())));

    let error = service(repo)
        .create_topic(request)
        .await
        .expect_err("duplicate title");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn create_topic_validates_before_touching_the_store() {
    let mut repo = MockTopicRepository::new();
    repo.expect_exists_by_title().times(0);

    let error = service(repo)
        .create_topic(CreateTopicRequest {
            title: Some("x".repeat(51)),
            description: None,
        })
        .await
        .expect_err("invalid input");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("field errors");
    let fields: Vec<_> = details["errors"]
        .as_array()
        .expect("array")
        .iter()
        .map(|entry| entry["field"].as_str().expect("field"))
        .collect();
    assert_eq!(fields, ["description", "title"]);
}

#[rstest]
#[tokio::test]
async fn get_topic_reports_missing_topic() {
    let mut repo = MockTopicRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let error = service(repo)
        .get_topic(Uuid::new_v4())
        .await
        .expect_err("missing topic");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), TOPIC_NOT_FOUND_MESSAGE);
}

#[rstest]
#[case(TopicRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(TopicRepositoryError::query("bad sql"), ErrorCode::InternalError)]
#[tokio::test]
async fn get_topic_maps_repository_failures(
    #[case] failure: TopicRepositoryError,
    #[case] code: ErrorCode,
) {
    let mut repo = MockTopicRepository::new();
    repo.expect_find_by_id().return_once(move |_| Err(failure));

    let error = service(repo)
        .get_topic(Uuid::new_v4())
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), code);
}

#[rstest]
#[tokio::test]
async fn list_topics_passes_page_through() {
    let request = TopicPageRequest::new(2, 1, "asc", "title").expect("valid paging");
    let topic = Topic {
        id: Uuid::new_v4(),
        title: "Pauta".to_owned(),
        description: "Descrição".to_owned(),
        created_at: fixture_now(),
    };
    let summary = TopicSummary {
        latest_session: Some(SessionWindow {
            id: Uuid::new_v4(),
            start_time: fixture_now(),
            end_time: fixture_now(),
        }),
        topic,
    };
    let expected = summary.clone();

    let mut repo = MockTopicRepository::new();
    repo.expect_list_with_latest_session()
        .with(eq(request))
        .return_once(move |request| {
            Ok(TopicPage {
                content: vec![summary],
                request: *request,
                total_elements: 3,
            })
        });

    let page = service(repo)
        .list_topics(request)
        .await
        .expect("listing");

    assert_eq!(page.content, vec![expected]);
    assert_eq!(page.total_pages(), 3);
}
