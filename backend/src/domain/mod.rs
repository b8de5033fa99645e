//! Domain primitives, aggregates and services.
//!
//! Purpose: define the voting model (topics, sessions, votes, tallies) and
//! the use-case services behind the driving ports. Nothing here knows about
//! HTTP or SQL; adapters talk to the domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: request-scoped correlation identifier.
//! - Topic, VotingSession, Vote and their validated inputs.
//! - `tally`: result computation over a topic's sessions and votes.
//! - Topic, session, vote and results services implementing the driving
//!   ports.

pub mod error;
mod field_violations;
pub mod ports;
mod tally;
mod topic;
mod topic_service;
mod trace_id;
mod vote;
mod vote_results_service;
mod vote_service;
mod voting_service_support;
mod voting_session;
mod voting_session_service;

pub use self::error::{Error, ErrorCode};
pub use self::field_violations::{FieldViolation, FieldViolations, VALIDATION_FAILED_MESSAGE};
pub use self::tally::{SessionVotes, TopicResults, VoteResult, tally};
pub use self::topic::{
    DESCRIPTION_MAX, PAGE_MIN_MESSAGE, SessionWindow, SortDirection, TITLE_MAX, Topic,
    TopicDraft, TopicPage, TopicPageRequest, TopicSortField, TopicSummary,
};
pub use self::topic_service::TopicService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::vote::{CPF_LEN, Choice, Cpf, Vote};
pub use self::vote_results_service::VoteResultsService;
pub use self::vote_service::VoteService;
pub use self::voting_service_support::{
    ALREADY_VOTED_MESSAGE, INELIGIBLE_MESSAGE, NO_OPEN_SESSION_FOR_TOPIC_MESSAGE,
    NO_OPEN_SESSION_WITH_ID_MESSAGE, SESSION_IN_PROGRESS_MESSAGE, TOPIC_TITLE_TAKEN_MESSAGE,
};
pub use self::voting_session::{SessionDuration, SessionStatus, VotingSession};
pub use self::voting_session_service::VotingSessionService;

