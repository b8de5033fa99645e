//! PostgreSQL-backed `VotingSessionRepository` implementation.
//!
//! Opening a session runs in a transaction holding a transaction-scoped
//! advisory lock keyed on the topic, so two concurrent requests for the same
//! topic cannot both pass the open-session check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::VotingSession;
use crate::domain::ports::{VotingSessionRepository, VotingSessionRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::VotingSessionRow;
use super::pool::DbPool;
use super::schema::voting_sessions;

const LOCK_TOPIC_SQL: &str = "SELECT pg_advisory_xact_lock(hashtextextended($1, 0))";

/// Diesel-backed implementation of the voting session repository port.
#[derive(Clone)]
pub struct DieselVotingSessionRepository {
    pool: DbPool,
}

impl DieselVotingSessionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> VotingSessionRepositoryError {
    map_diesel_error(
        error,
        VotingSessionRepositoryError::query,
        VotingSessionRepositoryError::connection,
        || VotingSessionRepositoryError::query("unexpected unique violation"),
    )
}

fn open_for_topic(
    topic_id: Uuid,
    now: DateTime<Utc>,
) -> voting_sessions::BoxedQuery<'static, diesel::pg::Pg> {
    voting_sessions::table
        .filter(voting_sessions::topic_id.eq(topic_id))
        .filter(voting_sessions::end_time.gt(now))
        .into_boxed()
}

#[async_trait]
impl VotingSessionRepository for DieselVotingSessionRepository {
    async fn exists_open_for_topic(
        &self,
        topic_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, VotingSessionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, VotingSessionRepositoryError::connection))?;

        diesel::select(diesel::dsl::exists(open_for_topic(*topic_id, now)))
            .get_result(&mut conn)
            .await
            .map_err(map_error)
    }

    async fn find_latest_open_for_topic(
        &self,
        topic_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<VotingSession>, VotingSessionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, VotingSessionRepositoryError::connection))?;

        open_for_topic(*topic_id, now)
            .order(voting_sessions::start_time.desc())
            .select(VotingSessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(VotingSession::from))
            .map_err(map_error)
    }

    async fn find_open_by_id(
        &self,
        session_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<VotingSession>, VotingSessionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, VotingSessionRepositoryError::connection))?;

        voting_sessions::table
            .find(session_id)
            .filter(voting_sessions::end_time.gt(now))
            .select(VotingSessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(VotingSession::from))
            .map_err(map_error)
    }

    async fn list_for_topic(
        &self,
        topic_id: &Uuid,
    ) -> Result<Vec<VotingSession>, VotingSessionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, VotingSessionRepositoryError::connection))?;

        let rows: Vec<VotingSessionRow> = voting_sessions::table
            .filter(voting_sessions::topic_id.eq(topic_id))
            .order((voting_sessions::start_time.asc(), voting_sessions::id.asc()))
            .select(VotingSessionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(rows.into_iter().map(VotingSession::from).collect())
    }

    async fn insert_exclusive(
        &self,
        session: &VotingSession,
    ) -> Result<(), VotingSessionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, VotingSessionRepositoryError::connection))?;

        let row = VotingSessionRow::from(session);
        let inserted: bool = conn
            .transaction(|conn| {
                async move {
                    sql_query(LOCK_TOPIC_SQL)
                        .bind::<Text, _>(row.topic_id.to_string())
                        .execute(conn)
                        .await?;

                    let overlapping: bool = diesel::select(diesel::dsl::exists(open_for_topic(
                        row.topic_id,
                        row.start_time,
                    )))
                    .get_result(conn)
                    .await?;
                    if overlapping {
                        return Ok(false);
                    }

                    diesel::insert_into(voting_sessions::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                    Ok(true)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_error)?;

        if inserted {
            Ok(())
        } else {
            debug!(topic_id = %session.topic_id, "overlapping voting session rejected");
            Err(VotingSessionRepositoryError::open_session_exists(
                session.topic_id,
            ))
        }
    }
}
