//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureTopicCommand, FixtureTopicQuery, FixtureVoteCommand, FixtureVoteResultsQuery,
    FixtureVotingSessionCommand, TopicCommand, TopicQuery, VoteCommand, VoteResultsQuery,
    VotingSessionCommand,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Topic creation.
    pub topics: Arc<dyn TopicCommand>,
    /// Topic lookups and listings.
    pub topics_query: Arc<dyn TopicQuery>,
    /// Voting session opening.
    pub sessions: Arc<dyn VotingSessionCommand>,
    /// Vote casting.
    pub votes: Arc<dyn VoteCommand>,
    /// Result tallies.
    pub results: Arc<dyn VoteResultsQuery>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            topics: Arc::new(FixtureTopicCommand),
            topics_query: Arc::new(FixtureTopicQuery),
            sessions: Arc::new(FixtureVotingSessionCommand),
            votes: Arc::new(FixtureVoteCommand),
            results: Arc::new(FixtureVoteResultsQuery),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub topics: Arc<dyn TopicCommand>,
    pub topics_query: Arc<dyn TopicQuery>,
    pub sessions: Arc<dyn VotingSessionCommand>,
    pub votes: Arc<dyn VoteCommand>,
    pub results: Arc<dyn VoteResultsQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use voting_backend::domain::ports::FixtureVoteCommand;
    /// use voting_backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     votes: Arc::new(FixtureVoteCommand),
    ///     ..HttpStatePorts::default()
    /// });
    /// let _votes = state.votes.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            topics,
            topics_query,
            sessions,
            votes,
            results,
        } = ports;
        Self {
            topics,
            topics_query,
            sessions,
            votes,
            results,
        }
    }
}
