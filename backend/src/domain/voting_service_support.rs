//! Shared error mapping and user-facing messages for the voting services.

use crate::domain::Error;
use crate::domain::ports::{
    EligibilityCheckError, TopicRepositoryError, VoteRepositoryError, VotingSessionRepositoryError,
};

/// Conflict message for a title that is already registered.
pub const TOPIC_TITLE_TAKEN_MESSAGE: &str = "Já existe uma pauta com o título informado.";
/// Conflict message for a topic whose session is still open.
pub const SESSION_IN_PROGRESS_MESSAGE: &str =
    "Já existe uma sessão de votação em andamento para a pauta informada.";
/// Not-found message when a topic has no open session.
pub const NO_OPEN_SESSION_FOR_TOPIC_MESSAGE: &str =
    "Não existe nenhuma sessão de votação em aberto para o tópico informado.";
/// Not-found message when a session id is unknown or already closed.
pub const NO_OPEN_SESSION_WITH_ID_MESSAGE: &str =
    "Não existe nenhuma sessão de votação em aberto com o ID informado.";
/// Conflict message for a second vote on the same topic.
pub const ALREADY_VOTED_MESSAGE: &str =
    "O associado já votou nesta pauta. Só é permitido votar uma vez por pauta.";
/// Bad-request message for an identity the checker rejected.
pub const INELIGIBLE_MESSAGE: &str = "O CPF informado não está apto para votar.";

pub(crate) fn map_topic_repository_error(error: TopicRepositoryError) -> Error {
    match error {
        TopicRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("topic repository unavailable: {message}"))
        }
        TopicRepositoryError::Query { message } => {
            Error::internal(format!("topic repository error: {message}"))
        }
        TopicRepositoryError::DuplicateTitle { .. } => Error::conflict(TOPIC_TITLE_TAKEN_MESSAGE),
    }
}

pub(crate) fn map_session_repository_error(error: VotingSessionRepositoryError) -> Error {
    match error {
        VotingSessionRepositoryError::Connection { message } => Error::service_unavailable(
            format!("voting session repository unavailable: {message}"),
        ),
        VotingSessionRepositoryError::Query { message } => {
            Error::internal(format!("voting session repository error: {message}"))
        }
        VotingSessionRepositoryError::OpenSessionExists { .. } => {
            Error::conflict(SESSION_IN_PROGRESS_MESSAGE)
        }
    }
}

pub(crate) fn map_vote_repository_error(error: VoteRepositoryError) -> Error {
    match error {
        VoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("vote repository unavailable: {message}"))
        }
        VoteRepositoryError::Query { message } => {
            Error::internal(format!("vote repository error: {message}"))
        }
        VoteRepositoryError::Duplicate { .. } => Error::conflict(ALREADY_VOTED_MESSAGE),
    }
}

pub(crate) fn map_eligibility_error(error: EligibilityCheckError) -> Error {
    Error::service_unavailable(error.to_string())
}
