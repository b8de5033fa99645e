//! Voting sessions: bounded windows during which a topic accepts votes.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FieldViolation, SessionWindow};

/// Reporting status of a session relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// The end instant has not been passed yet.
    Open,
    /// The end instant lies strictly in the past.
    Finished,
}

/// Requested length of a voting session, in whole minutes (at least one).
///
/// # Examples
/// ```
/// use voting_backend::domain::SessionDuration;
///
/// assert_eq!(SessionDuration::default().minutes(), 1);
/// assert!(SessionDuration::from_minutes(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDuration(u32);

/// Largest accepted length: a signed 32-bit minute count.
const MAX_DURATION_MINUTES: i64 = i32::MAX as i64;

const MAX_DURATION_MESSAGE: &str = "Informe um valor menor ou igual a 2147483647";

impl SessionDuration {
    /// Validate a raw minute count.
    pub fn from_minutes(minutes: i64) -> Result<Self, FieldViolation> {
        if minutes < 1 {
            return Err(FieldViolation::new(
                "durationInMinutes",
                "Informe um valor maior ou igual a 1",
            ));
        }
        if minutes > MAX_DURATION_MINUTES {
            return Err(FieldViolation::new("durationInMinutes", MAX_DURATION_MESSAGE));
        }
        u32::try_from(minutes)
            .map(Self)
            .map_err(|_| FieldViolation::new("durationInMinutes", MAX_DURATION_MESSAGE))
    }

    /// Duration in minutes.
    pub fn minutes(self) -> u32 {
        self.0
    }

    fn as_delta(self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.0))
    }
}

impl Default for SessionDuration {
    fn default() -> Self {
        Self(1)
    }
}

/// A voting session bound to a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotingSession {
    /// Session identifier.
    pub id: Uuid,
    /// Owning topic.
    pub topic_id: Uuid,
    /// Instant the session was opened.
    pub start_time: DateTime<Utc>,
    /// Instant after which the session no longer accepts votes.
    pub end_time: DateTime<Utc>,
}

impl VotingSession {
    /// Open a session on `topic_id` starting at `now`.
    pub fn start(id: Uuid, topic_id: Uuid, now: DateTime<Utc>, duration: SessionDuration) -> Self {
        Self {
            id,
            topic_id,
            start_time: now,
            end_time: now + duration.as_delta(),
        }
    }

    /// Whether the session accepts votes at `now` (`end_time > now`).
    pub fn accepts_votes_at(&self, now: DateTime<Utc>) -> bool {
        self.end_time > now
    }

    /// Reporting status at `now`; finished only once `now > end_time`.
    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        if now > self.end_time {
            SessionStatus::Finished
        } else {
            SessionStatus::Open
        }
    }

    /// Identifier and window, as shown in topic listings.
    pub fn window(&self) -> SessionWindow {
        SessionWindow {
            id: self.id,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}
