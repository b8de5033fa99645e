//! PostgreSQL-backed `VoteRepository` implementation.
//!
//! The unique index on `votes (topic_id, cpf)` is the authority on repeat
//! votes; a violation surfaces as [`VoteRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{VoteRepository, VoteRepositoryError};
use crate::domain::{Cpf, Vote};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewVoteRow, VoteRow};
use super::pool::DbPool;
use super::schema::votes;

/// Diesel-backed implementation of the vote repository port.
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error, topic_id: Uuid) -> VoteRepositoryError {
    map_diesel_error(
        error,
        VoteRepositoryError::query,
        VoteRepositoryError::connection,
        || VoteRepositoryError::duplicate(topic_id),
    )
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn exists_for_topic(
        &self,
        topic_id: &Uuid,
        cpf: &Cpf,
    ) -> Result<bool, VoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, VoteRepositoryError::connection))?;

        diesel::select(diesel::dsl::exists(
            votes::table
                .filter(votes::topic_id.eq(topic_id))
                .filter(votes::cpf.eq(cpf.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_error(err, *topic_id))
    }

    async fn list_for_topic(&self, topic_id: &Uuid) -> Result<Vec<Vote>, VoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, VoteRepositoryError::connection))?;

        let rows: Vec<VoteRow> = votes::table
            .filter(votes::topic_id.eq(topic_id))
            .order((votes::voted_at.asc(), votes::id.asc()))
            .select(VoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_error(err, *topic_id))?;
        Ok(rows.into_iter().map(Vote::from).collect())
    }

    async fn save(&self, vote: &Vote) -> Result<(), VoteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, VoteRepositoryError::connection))?;

        diesel::insert_into(votes::table)
            .values(NewVoteRow::from(vote))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_error(err, vote.topic_id))
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    use super::*;

    #[test]
    fn unique_violation_is_a_duplicate_vote() {
        let topic_id = Uuid::new_v4();
        let error = map_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("votes_topic_cpf_key".to_owned()),
            ),
            topic_id,
        );
        assert_eq!(error, VoteRepositoryError::duplicate(topic_id));
    }

    #[test]
    fn insert_row_stores_choice_as_boolean() {
        let vote = Vote {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            topic_id: Uuid::new_v4(),
            cpf: Cpf::normalize("529.982.247-25"),
            choice: crate::domain::Choice::Against,
            voted_at: chrono::Utc::now(),
        };
        let row = NewVoteRow::from(&vote);
        assert!(!row.choice);
        assert_eq!(row.cpf, "52998224725");
    }
}
