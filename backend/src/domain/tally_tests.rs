//! Tests for topic result aggregation.

use chrono::{TimeDelta, TimeZone};
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::{Cpf, SessionDuration};

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn topic(now: DateTime<Utc>) -> Topic {
    Topic {
        id: Uuid::new_v4(),
        title: "Reforma da sede".to_owned(),
        description: "Aprovar orçamento da reforma".to_owned(),
        created_at: now - TimeDelta::hours(1),
    }
}

fn session_started(topic: &Topic, start: DateTime<Utc>, minutes: i64) -> VotingSession {
    let duration = SessionDuration::from_minutes(minutes).expect("valid duration");
    VotingSession::start(Uuid::new_v4(), topic.id, start, duration)
}

fn votes_for(session: &VotingSession, choices: &[bool]) -> Vec<Vote> {
    choices
        .iter()
        .enumerate()
        .map(|(index, choice)| Vote {
            id: Uuid::new_v4(),
            session_id: session.id,
            topic_id: session.topic_id,
            cpf: Cpf::from_normalized(format!("{index:011}")),
            choice: Choice::from(*choice),
            voted_at: session.start_time,
        })
        .collect()
}

#[rstest]
fn majority_favorable_while_open(topic: Topic, now: DateTime<Utc>) {
    let session = session_started(&topic, now, 10);
    let votes = votes_for(&session, &[true, true, false]);

    let results = tally(topic, vec![session], votes, now);

    assert_eq!(results.favorable_votes, 2);
    assert_eq!(results.against_votes, 1);
    assert_eq!(results.current_result, Some(VoteResult::Favorable));
    assert_eq!(results.final_result, None);
    assert_eq!(
        results.current_result_text,
        "Maioria dos votos FAVORÁVEIS até o momento"
    );
    assert_eq!(
        results.final_result_text,
        "Ainda há sessões de votação em andamento"
    );
}

#[rstest]
fn tie_while_open_is_reported_so_far(topic: Topic, now: DateTime<Utc>) {
    let session = session_started(&topic, now, 10);
    let votes = votes_for(&session, &[true, false]);

    let results = tally(topic, vec![session], votes, now);

    assert_eq!(results.current_result, Some(VoteResult::Tied));
    assert_eq!(results.current_result_text, "Votos EMPATADOS até o momento");
}

#[rstest]
fn finished_sessions_report_final_result(topic: Topic, now: DateTime<Utc>) {
    let session = session_started(&topic, now - TimeDelta::minutes(30), 5);
    let votes = votes_for(&session, &[false, false]);

    let results = tally(topic, vec![session], votes, now);

    assert_eq!(results.sessions[0].status, SessionStatus::Finished);
    assert_eq!(results.favorable_votes, 0);
    assert_eq!(results.against_votes, 2);
    assert_eq!(results.final_result, Some(VoteResult::Against));
    assert_eq!(results.current_result_text, "Maioria dos votos CONTRA");
    assert_eq!(results.final_result_text, "Maioria dos votos CONTRA");
}

#[rstest]
fn session_without_votes_reports_no_votes(topic: Topic, now: DateTime<Utc>) {
    let session = session_started(&topic, now, 1);

    let results = tally(topic, vec![session], Vec::new(), now);

    assert_eq!(results.current_result, None);
    assert_eq!(results.final_result, None);
    assert_eq!(results.current_result_text, "Nenhum voto até o momento");
}

#[rstest]
fn finished_session_without_votes_has_no_final_result(topic: Topic, now: DateTime<Utc>) {
    let session = session_started(&topic, now - TimeDelta::hours(1), 1);

    let results = tally(topic, vec![session], Vec::new(), now);

    assert_eq!(results.final_result, None);
    assert_eq!(results.final_result_text, "Nenhum voto até o momento");
}

#[rstest]
fn topic_without_sessions_counts_as_in_progress(topic: Topic, now: DateTime<Utc>) {
    let results = tally(topic, Vec::new(), Vec::new(), now);

    assert!(results.sessions.is_empty());
    assert_eq!(
        results.final_result_text,
        "Ainda há sessões de votação em andamento"
    );
}

#[rstest]
fn votes_are_summed_across_sessions(topic: Topic, now: DateTime<Utc>) {
    let first = session_started(&topic, now - TimeDelta::hours(2), 5);
    let second = session_started(&topic, now - TimeDelta::hours(1), 5);
    let mut votes = votes_for(&first, &[true]);
    votes.extend(votes_for(&second, &[true, false]));

    let results = tally(topic, vec![first, second], votes, now);

    assert_eq!(results.sessions[0].votes.len(), 1);
    assert_eq!(results.sessions[1].votes.len(), 2);
    assert_eq!(results.favorable_votes, 2);
    assert_eq!(results.final_result, Some(VoteResult::Favorable));
    assert_eq!(results.final_result_text, "Maioria dos votos FAVORÁVEIS");
}

#[rstest]
fn one_open_session_withholds_final_result(topic: Topic, now: DateTime<Utc>) {
    let finished = session_started(&topic, now - TimeDelta::hours(2), 5);
    let open = session_started(&topic, now, 5);
    let votes = votes_for(&finished, &[false]);

    let results = tally(topic, vec![finished, open], votes, now);

    assert_eq!(results.current_result, Some(VoteResult::Against));
    assert_eq!(results.final_result, None);
}

#[rstest]
fn session_ending_exactly_now_is_still_open(topic: Topic, now: DateTime<Utc>) {
    let session = session_started(&topic, now - TimeDelta::minutes(5), 5);

    let results = tally(topic, vec![session], Vec::new(), now);

    assert_eq!(results.sessions[0].status, SessionStatus::Open);
}
