//! Tally of a topic's votes across all of its voting sessions.
//!
//! The current result reflects every vote cast so far. The final result is
//! only reported once at least one session exists and every session is
//! finished.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Choice, SessionStatus, Topic, Vote, VotingSession};

const SO_FAR: &str = "até o momento";
const NO_VOTES_TEXT: &str = "Nenhum voto até o momento";
const SESSIONS_IN_PROGRESS_TEXT: &str = "Ainda há sessões de votação em andamento";

/// Outcome of a tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteResult {
    /// Strict majority in favour.
    Favorable,
    /// Strict majority against.
    Against,
    /// Equal, non-zero counts.
    Tied,
}

/// A session with the votes cast in it and its status at tally time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionVotes {
    /// The session.
    pub session: VotingSession,
    /// Status at tally time.
    pub status: SessionStatus,
    /// Votes cast in the session.
    pub votes: Vec<Vote>,
}

/// Aggregated results for a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicResults {
    /// The topic tallied.
    pub topic: Topic,
    /// Per-session breakdown.
    pub sessions: Vec<SessionVotes>,
    /// Votes in favour across every session.
    pub favorable_votes: u64,
    /// Votes against across every session.
    pub against_votes: u64,
    /// Result from the votes cast so far, absent when nobody voted.
    pub current_result: Option<VoteResult>,
    /// Result once voting is over, absent while any session is open.
    pub final_result: Option<VoteResult>,
    /// Human-readable current result.
    pub current_result_text: String,
    /// Human-readable final result.
    pub final_result_text: String,
}

/// Tally `votes` over `sessions` for `topic` as seen at `now`.
///
/// Votes whose session is not in `sessions` are ignored.
///
/// # Examples
/// ```
/// use chrono::{TimeDelta, Utc};
/// use uuid::Uuid;
/// use voting_backend::domain::{
///     tally, Choice, Cpf, SessionDuration, Topic, Vote, VoteResult, VotingSession,
/// };
///
/// let now = Utc::now();
/// let topic = Topic {
///     id: Uuid::new_v4(),
///     title: "Pauta".into(),
///     description: "Descrição".into(),
///     created_at: now,
/// };
/// let session = VotingSession::start(Uuid::new_v4(), topic.id, now, SessionDuration::default());
/// let vote = Vote {
///     id: Uuid::new_v4(),
///     session_id: session.id,
///     topic_id: topic.id,
///     cpf: Cpf::normalize("52998224725"),
///     choice: Choice::Against,
///     voted_at: now,
/// };
///
/// let results = tally(topic, vec![session], vec![vote], now + TimeDelta::minutes(2));
/// assert_eq!(results.final_result, Some(VoteResult::Against));
/// assert_eq!(results.final_result_text, "Maioria dos votos CONTRA");
/// ```
pub fn tally(
    topic: Topic,
    sessions: Vec<VotingSession>,
    votes: Vec<Vote>,
    now: DateTime<Utc>,
) -> TopicResults {
    let mut sessions: Vec<SessionVotes> = sessions
        .into_iter()
        .map(|session| SessionVotes {
            status: session.status_at(now),
            session,
            votes: Vec::new(),
        })
        .collect();

    for vote in votes {
        if let Some(entry) = sessions
            .iter_mut()
            .find(|entry| entry.session.id == vote.session_id)
        {
            entry.votes.push(vote);
        }
    }

    let (favorable_votes, against_votes) = sessions
        .iter()
        .flat_map(|entry| entry.votes.iter())
        .fold((0_u64, 0_u64), |(favorable, against), vote| match vote.choice {
            Choice::Favorable => (favorable + 1, against),
            Choice::Against => (favorable, against + 1),
        });

    let has_open_sessions =
        sessions.is_empty() || sessions.iter().any(|s| s.status == SessionStatus::Open);
    let current_result = current_result(favorable_votes, against_votes);
    let final_result = if has_open_sessions {
        None
    } else {
        current_result
    };
    let current_result_text = result_text(current_result, has_open_sessions);
    let final_result_text = if has_open_sessions {
        SESSIONS_IN_PROGRESS_TEXT.to_owned()
    } else {
        current_result_text.clone()
    };

    TopicResults {
        topic,
        sessions,
        favorable_votes,
        against_votes,
        current_result,
        final_result,
        current_result_text,
        final_result_text,
    }
}

fn current_result(favorable: u64, against: u64) -> Option<VoteResult> {
    match (favorable, against) {
        (0, 0) => None,
        (f, a) if f == a => Some(VoteResult::Tied),
        (f, a) if f > a => Some(VoteResult::Favorable),
        _ => Some(VoteResult::Against),
    }
}

fn result_text(result: Option<VoteResult>, so_far: bool) -> String {
    let headline = match result {
        None => return NO_VOTES_TEXT.to_owned(),
        Some(VoteResult::Tied) => "Votos EMPATADOS",
        Some(VoteResult::Favorable) => "Maioria dos votos FAVORÁVEIS",
        Some(VoteResult::Against) => "Maioria dos votos CONTRA",
    };
    if so_far {
        format!("{headline} {SO_FAR}")
    } else {
        headline.to_owned()
    }
}

#[cfg(test)]
#[path = "tally_tests.rs"]
mod tests;
