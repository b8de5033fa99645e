//! PostgreSQL-backed `TopicRepository` implementation using Diesel ORM.
//!
//! Listings page over `topics` first and then fetch the latest session of
//! each topic on the page with a single `DISTINCT ON` query.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TopicRepository, TopicRepositoryError};
use crate::domain::{
    SessionWindow, SortDirection, Topic, TopicPage, TopicPageRequest, TopicSortField,
    TopicSummary,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTopicRow, TopicRow, VotingSessionRow};
use super::pool::DbPool;
use super::schema::{topics, voting_sessions};

/// Diesel-backed implementation of the topic repository port.
#[derive(Clone)]
pub struct DieselTopicRepository {
    pool: DbPool,
}

impl DieselTopicRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error, title: &str) -> TopicRepositoryError {
    map_diesel_error(
        error,
        TopicRepositoryError::query,
        TopicRepositoryError::connection,
        || TopicRepositoryError::duplicate_title(title),
    )
}

fn map_read_error(error: diesel::result::Error) -> TopicRepositoryError {
    map_error(error, "")
}

type TopicPageQuery = topics::BoxedQuery<'static, Pg, SqlTypeOf<AsSelect<TopicRow, Pg>>>;

fn ordered_page(request: &TopicPageRequest) -> TopicPageQuery {
    let query = topics::table.select(TopicRow::as_select()).into_boxed();
    let query = match (request.sort_field(), request.direction()) {
        (TopicSortField::CreatedAt, SortDirection::Asc) => query.order_by(topics::created_at.asc()),
        (TopicSortField::CreatedAt, SortDirection::Desc) => {
            query.order_by(topics::created_at.desc())
        }
        (TopicSortField::Title, SortDirection::Asc) => query.order_by(topics::title.asc()),
        (TopicSortField::Title, SortDirection::Desc) => query.order_by(topics::title.desc()),
        (TopicSortField::Description, SortDirection::Asc) => {
            query.order_by(topics::description.asc())
        }
        (TopicSortField::Description, SortDirection::Desc) => {
            query.order_by(topics::description.desc())
        }
    };
    query
        .then_order_by(topics::id.asc())
        .limit(i64::from(request.size()))
        .offset(i64::try_from(request.offset()).unwrap_or(i64::MAX))
}

#[async_trait]
impl TopicRepository for DieselTopicRepository {
    async fn exists_by_title(&self, title: &str) -> Result<bool, TopicRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TopicRepositoryError::connection))?;

        diesel::select(diesel::dsl::exists(
            topics::table.filter(topics::title.eq(title)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_read_error)
    }

    async fn save(&self, topic: &Topic) -> Result<(), TopicRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TopicRepositoryError::connection))?;

        diesel::insert_into(topics::table)
            .values(NewTopicRow::from(topic))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_error(err, &topic.title))
    }

    async fn find_by_id(&self, topic_id: &Uuid) -> Result<Option<Topic>, TopicRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TopicRepositoryError::connection))?;

        topics::table
            .find(topic_id)
            .select(TopicRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Topic::from))
            .map_err(map_read_error)
    }

    async fn list_with_latest_session(
        &self,
        request: &TopicPageRequest,
    ) -> Result<TopicPage, TopicRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TopicRepositoryError::connection))?;

        let total: i64 = topics::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_read_error)?;
        let rows: Vec<TopicRow> = ordered_page(request)
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let latest: HashMap<Uuid, SessionWindow> = if ids.is_empty() {
            HashMap::new()
        } else {
            voting_sessions::table
                .filter(voting_sessions::topic_id.eq_any(ids))
                .order((
                    voting_sessions::topic_id,
                    voting_sessions::start_time.desc(),
                ))
                .distinct_on(voting_sessions::topic_id)
                .select(VotingSessionRow::as_select())
                .load::<VotingSessionRow>(&mut conn)
                .await
                .map_err(map_read_error)?
                .into_iter()
                .map(|row| (row.topic_id, SessionWindow::from(row)))
                .collect()
        };

        let content = rows
            .into_iter()
            .map(|row| TopicSummary {
                latest_session: latest.get(&row.id).copied(),
                topic: Topic::from(row),
            })
            .collect();

        Ok(TopicPage {
            content,
            request: *request,
            total_elements: u64::try_from(total).unwrap_or_default(),
        })
    }
}
