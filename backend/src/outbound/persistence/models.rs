//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them
//! to and from domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{topics, votes, voting_sessions};
use crate::domain::{Choice, Cpf, SessionWindow, Topic, Vote, VotingSession};

/// Row struct for reading from the topics table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = topics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TopicRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<TopicRow> for Topic {
    fn from(row: TopicRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for new topics.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = topics)]
pub(crate) struct NewTopicRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Topic> for NewTopicRow<'a> {
    fn from(topic: &'a Topic) -> Self {
        Self {
            id: topic.id,
            title: topic.title.as_str(),
            description: topic.description.as_str(),
            created_at: topic.created_at,
        }
    }
}

/// Row struct for the voting_sessions table; also used for inserts.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = voting_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VotingSessionRow {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<VotingSessionRow> for VotingSession {
    fn from(row: VotingSessionRow) -> Self {
        Self {
            id: row.id,
            topic_id: row.topic_id,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

impl From<VotingSessionRow> for SessionWindow {
    fn from(row: VotingSessionRow) -> Self {
        VotingSession::from(row).window()
    }
}

impl From<&VotingSession> for VotingSessionRow {
    fn from(session: &VotingSession) -> Self {
        Self {
            id: session.id,
            topic_id: session.topic_id,
            start_time: session.start_time,
            end_time: session.end_time,
        }
    }
}

/// Row struct for reading from the votes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoteRow {
    pub id: Uuid,
    pub voting_session_id: Uuid,
    pub topic_id: Uuid,
    pub cpf: String,
    pub choice: bool,
    pub voted_at: DateTime<Utc>,
}

impl From<VoteRow> for Vote {
    fn from(row: VoteRow) -> Self {
        Self {
            id: row.id,
            session_id: row.voting_session_id,
            topic_id: row.topic_id,
            cpf: Cpf::from_normalized(row.cpf),
            choice: Choice::from(row.choice),
            voted_at: row.voted_at,
        }
    }
}

/// Insertable struct for new votes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = votes)]
pub(crate) struct NewVoteRow<'a> {
    pub id: Uuid,
    pub voting_session_id: Uuid,
    pub topic_id: Uuid,
    pub cpf: &'a str,
    pub choice: bool,
    pub voted_at: DateTime<Utc>,
}

impl<'a> From<&'a Vote> for NewVoteRow<'a> {
    fn from(vote: &'a Vote) -> Self {
        Self {
            id: vote.id,
            voting_session_id: vote.session_id,
            topic_id: vote.topic_id,
            cpf: vote.cpf.as_str(),
            choice: vote.choice.into(),
            voted_at: vote.voted_at,
        }
    }
}
