//! Builders wiring repositories, services and adapters into HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use reqwest::Url;
use tracing::{info, warn};

use voting_backend::domain::ports::{
    EligibilityChecker, TopicRepository, VoteRepository, VotingSessionRepository,
};
use voting_backend::domain::{
    TopicService, VoteResultsService, VoteService, VotingSessionService,
};
use voting_backend::inbound::http::state::{HttpState, HttpStatePorts};
use voting_backend::outbound::eligibility::{
    AlwaysEligibleChecker, HttpEligibilityChecker, RandomEligibilityChecker,
};
use voting_backend::outbound::memory::InMemoryVotingStore;
use voting_backend::outbound::persistence::{
    DieselTopicRepository, DieselVoteRepository, DieselVotingSessionRepository,
};

use super::ServerConfig;
use super::config::{AppSettings, EligibilityMode, SettingsError};

/// Build the eligibility adapter selected by `settings`.
pub fn build_eligibility_checker(
    settings: &AppSettings,
) -> Result<Arc<dyn EligibilityChecker>, SettingsError> {
    let mode = settings.eligibility_mode()?;
    info!(?mode, "eligibility checker selected");
    match mode {
        EligibilityMode::Random => Ok(Arc::new(RandomEligibilityChecker::new())),
        EligibilityMode::Always => Ok(Arc::new(AlwaysEligibleChecker)),
        EligibilityMode::Http => {
            let raw = settings
                .eligibility_url
                .as_deref()
                .ok_or_else(|| SettingsError::EligibilityUrl {
                    message: "missing".to_owned(),
                })?;
            let base = Url::parse(raw).map_err(|err| SettingsError::EligibilityUrl {
                message: err.to_string(),
            })?;
            let checker = HttpEligibilityChecker::new(base, settings.eligibility_timeout())
                .map_err(|err| SettingsError::EligibilityUrl {
                    message: err.to_string(),
                })?;
            Ok(Arc::new(checker))
        }
    }
}

/// Wire every service over the given repositories.
fn build_ports<T, S, V>(
    topics: Arc<T>,
    sessions: Arc<S>,
    votes: Arc<V>,
    eligibility: Arc<dyn EligibilityChecker>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts
where
    T: TopicRepository + 'static,
    S: VotingSessionRepository + 'static,
    V: VoteRepository + 'static,
{
    let topic_service = Arc::new(TopicService::new(topics.clone(), clock.clone()));
    HttpStatePorts {
        topics: topic_service.clone(),
        topics_query: topic_service,
        sessions: Arc::new(VotingSessionService::new(
            topics.clone(),
            sessions.clone(),
            clock.clone(),
        )),
        votes: Arc::new(VoteService::new(
            sessions.clone(),
            votes.clone(),
            eligibility,
            clock.clone(),
        )),
        results: Arc::new(VoteResultsService::new(topics, sessions, votes, clock)),
    }
}

/// Build HTTP state backed by PostgreSQL when a pool is configured,
/// otherwise by a process-local in-memory store.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let eligibility = config.eligibility.clone();

    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselTopicRepository::new(pool.clone())),
            Arc::new(DieselVotingSessionRepository::new(pool.clone())),
            Arc::new(DieselVoteRepository::new(pool.clone())),
            eligibility,
            clock,
        ),
        None => {
            warn!("no database configured; votes are kept in memory only");
            let store = Arc::new(InMemoryVotingStore::new());
            build_ports(store.clone(), store.clone(), store, eligibility, clock)
        }
    };
    HttpState::new(ports)
}
