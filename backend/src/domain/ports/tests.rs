//! Behaviour of the port fixtures used by unit tests and local wiring.

use chrono::Utc;
use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::{Choice, Cpf, ErrorCode, SessionDuration, TopicPageRequest};

fn first_page() -> TopicPageRequest {
    TopicPageRequest::new(1, 10, "desc", "createdAt").expect("valid paging")
}

#[rstest]
#[tokio::test]
async fn fixture_repositories_report_nothing_stored() {
    let topic_id = Uuid::new_v4();
    let now = Utc::now();

    assert!(
        !FixtureTopicRepository
            .exists_by_title("Pauta")
            .await
            .expect("lookup")
    );
    assert!(
        FixtureTopicRepository
            .find_by_id(&topic_id)
            .await
            .expect("lookup")
            .is_none()
    );
    assert!(
        FixtureVotingSessionRepository
            .find_latest_open_for_topic(&topic_id, now)
            .await
            .expect("lookup")
            .is_none()
    );
    assert!(
        FixtureVoteRepository
            .list_for_topic(&topic_id)
            .await
            .expect("lookup")
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn fixture_topic_listing_echoes_request() {
    let page = FixtureTopicQuery
        .list_topics(first_page())
        .await
        .expect("listing");
    assert_eq!(page.request, first_page());
    assert_eq!(page.total_pages(), 0);
}

#[rstest]
#[tokio::test]
async fn fixture_lookups_are_not_found() {
    let topic = FixtureTopicQuery
        .get_topic(Uuid::new_v4())
        .await
        .expect_err("no topics");
    let results = FixtureVoteResultsQuery
        .topic_results(Uuid::new_v4())
        .await
        .expect_err("no topics");
    assert_eq!(topic.code(), ErrorCode::NotFound);
    assert_eq!(results.message(), TOPIC_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn fixture_commands_accept_input() {
    let topic_id = Uuid::new_v4();
    let session = FixtureVotingSessionCommand
        .start_session(StartSessionRequest {
            topic_id,
            duration: SessionDuration::default(),
        })
        .await
        .expect("session");
    assert_eq!(session.topic_id, topic_id);

    let vote = FixtureVoteCommand
        .vote_by_topic(
            topic_id,
            CastVoteRequest {
                cpf: "529.982.247-25".to_owned(),
                choice: Choice::Favorable,
            },
        )
        .await
        .expect("vote");
    assert_eq!(vote.cpf, Cpf::normalize("52998224725"));
    assert_eq!(vote.topic_id, topic_id);
}

#[rstest]
#[tokio::test]
async fn fixture_checker_approves() {
    let verdict = FixtureEligibilityChecker
        .check(&Cpf::normalize("52998224725"))
        .await
        .expect("verdict");
    assert_eq!(verdict, Eligibility::Eligible);
}
