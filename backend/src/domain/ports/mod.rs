//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are implemented by domain services and
//! called by inbound adapters. Driven ports (`*Repository`,
//! [`EligibilityChecker`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod eligibility_checker;
mod topic_command;
mod topic_query;
mod topic_repository;
mod vote_command;
mod vote_repository;
mod vote_results_query;
mod voting_session_command;
mod voting_session_repository;

#[cfg(test)]
pub use eligibility_checker::MockEligibilityChecker;
pub use eligibility_checker::{
    Eligibility, EligibilityCheckError, EligibilityChecker, FixtureEligibilityChecker,
};
#[cfg(test)]
pub use topic_command::MockTopicCommand;
pub use topic_command::{CreateTopicRequest, FixtureTopicCommand, TopicCommand};
#[cfg(test)]
pub use topic_query::MockTopicQuery;
pub use topic_query::{FixtureTopicQuery, TOPIC_NOT_FOUND_MESSAGE, TopicQuery};
#[cfg(test)]
pub use topic_repository::MockTopicRepository;
pub use topic_repository::{FixtureTopicRepository, TopicRepository, TopicRepositoryError};
#[cfg(test)]
pub use vote_command::MockVoteCommand;
pub use vote_command::{CastVoteRequest, FixtureVoteCommand, VoteCommand};
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{FixtureVoteRepository, VoteRepository, VoteRepositoryError};
#[cfg(test)]
pub use vote_results_query::MockVoteResultsQuery;
pub use vote_results_query::{FixtureVoteResultsQuery, VoteResultsQuery};
#[cfg(test)]
pub use voting_session_command::MockVotingSessionCommand;
pub use voting_session_command::{
    FixtureVotingSessionCommand, StartSessionRequest, VotingSessionCommand,
};
#[cfg(test)]
pub use voting_session_repository::MockVotingSessionRepository;
pub use voting_session_repository::{
    FixtureVotingSessionRepository, VotingSessionRepository, VotingSessionRepositoryError,
};

#[cfg(test)]
mod tests;
